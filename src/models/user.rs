use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::legacy;
use crate::utils::AppError;

pub const MAX_AGE: i32 = 150;

/// Usuário armazenado na collection `users`. Documentos antigos podem
/// não ter todos os campos; ver `legacy`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "legacy::string")]
    pub name: String,
    #[serde(default, deserialize_with = "legacy::int32")]
    pub age: i32,
    #[serde(default, deserialize_with = "legacy::string")]
    pub email: String,
    /// Referências para `products`; duplicatas são permitidas
    #[serde(default)]
    pub purchased_products: Vec<ObjectId>,
}

/// Request para criar usuário
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub age: i32,
    pub email: String,
    #[serde(default)]
    pub purchased_products: Vec<String>,
}

/// Request para atualizar usuário (somente os campos presentes são gravados)
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub purchased_products: Option<Vec<String>>,
}

/// Response de usuário
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub purchased_products: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: u.name,
            age: u.age,
            email: u.email,
            purchased_products: u.purchased_products.iter().map(|id| id.to_hex()).collect(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name", "name must not be empty"));
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), AppError> {
    if !(0..=MAX_AGE).contains(&age) {
        return Err(AppError::validation(
            "age",
            format!("age must be between 0 and {}", MAX_AGE),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.trim().is_empty() && !domain.trim().is_empty(),
        _ => false,
    };
    if !valid {
        return Err(AppError::validation(
            "email",
            "email must have the form local@domain",
        ));
    }
    Ok(())
}

fn parse_product_refs(refs: &[String]) -> Result<Vec<ObjectId>, AppError> {
    refs.iter()
        .map(|raw| {
            ObjectId::parse_str(raw).map_err(|_| {
                AppError::validation(
                    "purchased_products",
                    format!("'{}' is not a valid product id", raw),
                )
            })
        })
        .collect()
}

impl CreateUserRequest {
    /// Valida os campos e constrói o documento a ser inserido
    pub fn into_user(self) -> Result<User, AppError> {
        validate_name(&self.name)?;
        validate_age(self.age)?;
        validate_email(&self.email)?;
        let purchased_products = parse_product_refs(&self.purchased_products)?;

        Ok(User {
            id: None,
            name: self.name.trim().to_string(),
            age: self.age,
            email: self.email.trim().to_string(),
            purchased_products,
        })
    }
}

impl UpdateUserRequest {
    /// Valida os campos presentes e monta o documento `$set`
    pub fn into_set_document(self) -> Result<Document, AppError> {
        let mut set = doc! {};

        if let Some(name) = self.name {
            validate_name(&name)?;
            set.insert("name", name.trim());
        }
        if let Some(age) = self.age {
            validate_age(age)?;
            set.insert("age", age);
        }
        if let Some(email) = self.email {
            validate_email(&email)?;
            set.insert("email", email.trim());
        }
        if let Some(refs) = self.purchased_products {
            set.insert("purchased_products", parse_product_refs(&refs)?);
        }

        Ok(set)
    }
}
