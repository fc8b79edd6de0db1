use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::legacy;
use crate::utils::AppError;

pub const MAX_RATING: f64 = 5.0;

/// Produto armazenado na collection `products`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "legacy::string")]
    pub title: String,
    #[serde(default, deserialize_with = "legacy::float")]
    pub price: f64,
    #[serde(default, deserialize_with = "legacy::float")]
    pub rating: f64,
    #[serde(default, deserialize_with = "legacy::int64")]
    pub number_of_stocks: i64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub number_of_stocks: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub number_of_stocks: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub number_of_stocks: i64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: p.title,
            price: p.price,
            rating: p.rating,
            number_of_stocks: p.number_of_stocks,
        }
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("title", "title must not be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("price", "price must be a non-negative number"));
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<(), AppError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(AppError::validation(
            "rating",
            format!("rating must be between 0 and {}", MAX_RATING),
        ));
    }
    Ok(())
}

fn validate_stock(number_of_stocks: i64) -> Result<(), AppError> {
    if number_of_stocks < 0 {
        return Err(AppError::validation(
            "number_of_stocks",
            "number_of_stocks must not be negative",
        ));
    }
    Ok(())
}

impl CreateProductRequest {
    pub fn into_product(self) -> Result<Product, AppError> {
        validate_title(&self.title)?;
        validate_price(self.price)?;
        validate_rating(self.rating)?;
        validate_stock(self.number_of_stocks)?;

        Ok(Product {
            id: None,
            title: self.title.trim().to_string(),
            price: self.price,
            rating: self.rating,
            number_of_stocks: self.number_of_stocks,
        })
    }
}

impl UpdateProductRequest {
    pub fn into_set_document(self) -> Result<Document, AppError> {
        let mut set = doc! {};

        if let Some(title) = self.title {
            validate_title(&title)?;
            set.insert("title", title.trim());
        }
        if let Some(price) = self.price {
            validate_price(price)?;
            set.insert("price", price);
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
            set.insert("rating", rating);
        }
        if let Some(number_of_stocks) = self.number_of_stocks {
            validate_stock(number_of_stocks)?;
            set.insert("number_of_stocks", number_of_stocks);
        }

        Ok(set)
    }
}
