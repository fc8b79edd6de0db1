use actix_web::{web, HttpResponse};

use crate::database::Store;
use crate::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::utils::parse_object_id;

use super::products::INVALID_PRODUCT_ID;

pub const USER_NOT_FOUND: &str = "User not found.";
pub const USER_OR_PRODUCT_NOT_FOUND: &str = "User or product not found.";
pub const INVALID_USER_ID: &str = "Invalid user ID.";

const CREATE_FAILED: &str = "Could not create user.";
const LIST_FAILED: &str = "Could not retrieve users.";
const GET_FAILED: &str = "Could not retrieve user.";
const UPDATE_FAILED: &str = "Could not update user.";
const DELETE_FAILED: &str = "Could not delete user.";
const ATTACH_FAILED: &str = "Could not attach product to user.";

/// POST /users - Cria um usuário
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid body"),
        (status = 500, description = "Could not create user")
    )
)]
pub async fn create_user(
    db: web::Data<dyn Store>,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse {
    log::info!("📝 POST /users");

    let user = match body.into_inner().into_user() {
        Ok(user) => user,
        Err(e) => return e.to_response(USER_NOT_FOUND, CREATE_FAILED),
    };

    match db.create_user(user).await {
        Ok(created) => {
            let response = UserResponse::from(created);
            log::info!("✅ User created: {}", response.id);
            HttpResponse::Created().json(response)
        }
        Err(e) => e.to_response(USER_NOT_FOUND, CREATE_FAILED),
    }
}

/// GET /users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Could not retrieve users")
    )
)]
pub async fn list_users(db: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📋 GET /users");

    match db.list_users().await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(users)
        }
        Err(e) => e.to_response(USER_NOT_FOUND, LIST_FAILED),
    }
}

/// GET /users/{id} - Busca usuário por id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24 hex chars)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Could not retrieve user")
    )
)]
pub async fn get_user(db: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    log::info!("🔍 GET /users/{}", path);

    let id = match parse_object_id(&path, INVALID_USER_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(USER_NOT_FOUND, GET_FAILED),
    };

    match db.find_user(id).await {
        Ok(user) => {
            log::info!("✅ User found: {}", id);
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => e.to_response(USER_NOT_FOUND, GET_FAILED),
    }
}

/// PUT /users/{id} - Atualiza os campos enviados
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24 hex chars)")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed id or invalid body"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Could not update user")
    )
)]
pub async fn update_user(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    log::info!("🔧 PUT /users/{}", path);

    let id = match parse_object_id(&path, INVALID_USER_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(USER_NOT_FOUND, UPDATE_FAILED),
    };

    let set = match body.into_inner().into_set_document() {
        Ok(set) => set,
        Err(e) => return e.to_response(USER_NOT_FOUND, UPDATE_FAILED),
    };

    match db.update_user(id, set).await {
        Ok(user) => {
            log::info!("✅ User updated: {}", id);
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => e.to_response(USER_NOT_FOUND, UPDATE_FAILED),
    }
}

/// DELETE /users/{id} - Remove usuário e retorna o registro removido
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24 hex chars)")),
    responses(
        (status = 200, description = "Removed user", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Could not delete user")
    )
)]
pub async fn delete_user(db: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /users/{}", path);

    let id = match parse_object_id(&path, INVALID_USER_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(USER_NOT_FOUND, DELETE_FAILED),
    };

    match db.delete_user(id).await {
        Ok(user) => {
            log::info!("✅ User deleted: {}", id);
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => e.to_response(USER_NOT_FOUND, DELETE_FAILED),
    }
}

/// POST /users/{user_id}/purchased_products/{product_id}
///
/// Registra a compra anexando a referência do produto ao usuário.
/// Não há deduplicação nem baixa de estoque.
#[utoipa::path(
    post,
    path = "/users/{user_id}/purchased_products/{product_id}",
    tag = "Users",
    params(
        ("user_id" = String, Path, description = "User id (24 hex chars)"),
        ("product_id" = String, Path, description = "Product id (24 hex chars)")
    ),
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "User or product not found"),
        (status = 500, description = "Could not attach product to user")
    )
)]
pub async fn attach_product(
    db: web::Data<dyn Store>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (raw_user_id, raw_product_id) = path.into_inner();
    log::info!(
        "🛒 POST /users/{}/purchased_products/{}",
        raw_user_id,
        raw_product_id
    );

    let user_id = match parse_object_id(&raw_user_id, INVALID_USER_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(USER_OR_PRODUCT_NOT_FOUND, ATTACH_FAILED),
    };
    let product_id = match parse_object_id(&raw_product_id, INVALID_PRODUCT_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(USER_OR_PRODUCT_NOT_FOUND, ATTACH_FAILED),
    };

    if let Err(e) = db.find_product(product_id).await {
        return e.to_response(USER_OR_PRODUCT_NOT_FOUND, ATTACH_FAILED);
    }

    // Single $push: concurrent attachments to the same user cannot lose updates
    match db.push_purchased_product(user_id, product_id).await {
        Ok(user) => {
            log::info!("✅ Product {} attached to user {}", product_id, user_id);
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => e.to_response(USER_OR_PRODUCT_NOT_FOUND, ATTACH_FAILED),
    }
}
