pub mod health;
pub mod metrics;
pub mod products;
pub mod swagger;
pub mod users;

#[cfg(test)]
pub mod test_support;

use actix_web::{error::InternalError, web, HttpResponse};

/// Rejects malformed JSON bodies with 400 and the same `{"error"}` shape
/// the handlers use.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            log::warn!("⚠️  Rejected request body: {}", err);
            let response = HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Invalid request body: {}", err)
            }));
            InternalError::from_response(err, response).into()
        })
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create_user))
                .route("", web::get().to(users::list_users))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user))
                .route(
                    "/{user_id}/purchased_products/{product_id}",
                    web::post().to(users::attach_product),
                ),
        )
        .service(
            web::scope("/products")
                .route("", web::post().to(products::create_product))
                .route("", web::get().to(products::list_products))
                .route("/{id}", web::get().to(products::get_product))
                .route("/{id}", web::put().to(products::update_product))
                .route("/{id}", web::delete().to(products::delete_product)),
        );
}
