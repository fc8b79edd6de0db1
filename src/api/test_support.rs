//! Shared fixtures for the handler tests.

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

use crate::database::memory::MemoryStore;
use crate::database::Store;
use crate::models::{ProductResponse, UserResponse};

pub fn test_app(
    store: Arc<MemoryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let db: Arc<dyn Store> = store;
    App::new()
        .app_data(web::Data::from(db))
        .configure(super::configure)
}

pub async fn read_json<T: DeserializeOwned>(res: ServiceResponse) -> T {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).expect("json body")
}

pub async fn create_user(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    name: &str,
) -> UserResponse {
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "name": name,
            "age": 30,
            "email": format!("{}@example.com", name.to_lowercase())
        }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
    read_json(res).await
}

pub async fn create_product(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    title: &str,
) -> ProductResponse {
    let req = test::TestRequest::post()
        .uri("/products")
        .set_json(json!({
            "title": title,
            "price": 19.99,
            "rating": 4.2,
            "number_of_stocks": 7
        }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
    read_json(res).await
}
