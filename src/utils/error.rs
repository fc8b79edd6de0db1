use std::fmt;

use actix_web::HttpResponse;
use mongodb::bson::oid::ObjectId;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    NotFound(String),
    InvalidId(String),
    Validation { field: &'static str, message: String },
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Renders the error as a JSON response. `failure` is the fixed message
    /// returned for database errors; the underlying cause is only logged.
    pub fn to_response(&self, not_found: &str, failure: &str) -> HttpResponse {
        match self {
            AppError::NotFound(what) => {
                log::warn!("⚠️  Not found: {}", what);
                HttpResponse::NotFound().json(serde_json::json!({ "error": not_found }))
            }
            AppError::InvalidId(msg) => {
                log::warn!("⚠️  {}", msg);
                HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
            }
            AppError::Validation { field, message } => {
                log::warn!("⚠️  Validation failed on '{}': {}", field, message);
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": message,
                    "field": field
                }))
            }
            AppError::DatabaseError(cause) => {
                log::error!("❌ {} ({})", failure, cause);
                HttpResponse::InternalServerError().json(serde_json::json!({ "error": failure }))
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            AppError::Validation { field, message } => {
                write!(f, "Invalid field '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

/// Parses a path segment as an ObjectId. `message` is what the client sees.
pub fn parse_object_id(raw: &str, message: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidId(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "Invalid user ID.").unwrap(), id);

        match parse_object_id("not-an-id", "Invalid user ID.") {
            Err(AppError::InvalidId(msg)) => assert_eq!(msg, "Invalid user ID."),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_database_error_hides_cause() {
        let err = AppError::DatabaseError("connection refused".into());
        let res = err.to_response("User not found.", "Could not retrieve user.");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(res.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Could not retrieve user.");
    }

    #[actix_web::test]
    async fn test_validation_error_names_field() {
        let err = AppError::validation("email", "email must contain '@'");
        let res = err.to_response("User not found.", "Could not create user.");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(res.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["field"], "email");
    }
}
