use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop Service API",
        version = "1.0.0",
        description = "CRUD endpoints for users and products backed by MongoDB.\n\nPurchases are recorded by attaching a product reference to a user; duplicates are kept."
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::attach_product,

        // Products
        crate::api::products::create_product,
        crate::api::products::list_products,
        crate::api::products::get_product,
        crate::api::products::update_product,
        crate::api::products::delete_product,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,

            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::UserResponse,

            crate::models::CreateProductRequest,
            crate::models::UpdateProductRequest,
            crate::models::ProductResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check and request counters."),
        (name = "Users", description = "User CRUD and purchase attachment."),
        (name = "Products", description = "Product CRUD."),
    )
)]
pub struct ApiDoc;
