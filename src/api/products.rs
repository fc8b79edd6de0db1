use actix_web::{web, HttpResponse};

use crate::database::Store;
use crate::models::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::utils::parse_object_id;

pub const PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const INVALID_PRODUCT_ID: &str = "Invalid product ID.";

const CREATE_FAILED: &str = "Could not create product.";
const LIST_FAILED: &str = "Could not retrieve products.";
const GET_FAILED: &str = "Could not retrieve product.";
const UPDATE_FAILED: &str = "Could not update product.";
const DELETE_FAILED: &str = "Could not delete product.";

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid body"),
        (status = 500, description = "Could not create product")
    )
)]
pub async fn create_product(
    db: web::Data<dyn Store>,
    body: web::Json<CreateProductRequest>,
) -> HttpResponse {
    log::info!("📝 POST /products");

    let product = match body.into_inner().into_product() {
        Ok(product) => product,
        Err(e) => return e.to_response(PRODUCT_NOT_FOUND, CREATE_FAILED),
    };

    match db.create_product(product).await {
        Ok(created) => {
            let response = ProductResponse::from(created);
            log::info!("✅ Product created: {}", response.id);
            HttpResponse::Created().json(response)
        }
        Err(e) => e.to_response(PRODUCT_NOT_FOUND, CREATE_FAILED),
    }
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Could not retrieve products")
    )
)]
pub async fn list_products(db: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📋 GET /products");

    match db.list_products().await {
        Ok(products) => {
            log::info!("✅ Listed {} products", products.len());
            let products: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::from).collect();
            HttpResponse::Ok().json(products)
        }
        Err(e) => e.to_response(PRODUCT_NOT_FOUND, LIST_FAILED),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24 hex chars)")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Could not retrieve product")
    )
)]
pub async fn get_product(db: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    log::info!("🔍 GET /products/{}", path);

    let id = match parse_object_id(&path, INVALID_PRODUCT_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(PRODUCT_NOT_FOUND, GET_FAILED),
    };

    match db.find_product(id).await {
        Ok(product) => {
            log::info!("✅ Product found: {}", id);
            HttpResponse::Ok().json(ProductResponse::from(product))
        }
        Err(e) => e.to_response(PRODUCT_NOT_FOUND, GET_FAILED),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24 hex chars)")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Malformed id or invalid body"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Could not update product")
    )
)]
pub async fn update_product(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
) -> HttpResponse {
    log::info!("🔧 PUT /products/{}", path);

    let id = match parse_object_id(&path, INVALID_PRODUCT_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(PRODUCT_NOT_FOUND, UPDATE_FAILED),
    };

    let set = match body.into_inner().into_set_document() {
        Ok(set) => set,
        Err(e) => return e.to_response(PRODUCT_NOT_FOUND, UPDATE_FAILED),
    };

    match db.update_product(id, set).await {
        Ok(product) => {
            log::info!("✅ Product updated: {}", id);
            HttpResponse::Ok().json(ProductResponse::from(product))
        }
        Err(e) => e.to_response(PRODUCT_NOT_FOUND, UPDATE_FAILED),
    }
}

/// Remove o produto. Referências em `purchased_products` não são limpas.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id (24 hex chars)")),
    responses(
        (status = 200, description = "Removed product", body = ProductResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Could not delete product")
    )
)]
pub async fn delete_product(db: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    log::info!("🗑️  DELETE /products/{}", path);

    let id = match parse_object_id(&path, INVALID_PRODUCT_ID) {
        Ok(id) => id,
        Err(e) => return e.to_response(PRODUCT_NOT_FOUND, DELETE_FAILED),
    };

    match db.delete_product(id).await {
        Ok(product) => {
            log::info!("✅ Product deleted: {}", id);
            HttpResponse::Ok().json(ProductResponse::from(product))
        }
        Err(e) => e.to_response(PRODUCT_NOT_FOUND, DELETE_FAILED),
    }
}
