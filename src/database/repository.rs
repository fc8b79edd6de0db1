//! Persistence ports used by the HTTP handlers.
//!
//! Id-based operations return `Err(AppError::NotFound)` when no document
//! matches, so handlers can tell an absent record from a failed operation.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::models::{Product, User};
use crate::utils::AppError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user and returns it with the generated `_id`.
    async fn create_user(&self, user: User) -> Result<User, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn find_user(&self, id: ObjectId) -> Result<User, AppError>;
    /// Applies `set` as a `$set` and returns the post-update document.
    /// An empty `set` returns the stored document unchanged.
    async fn update_user(&self, id: ObjectId, set: Document) -> Result<User, AppError>;
    /// Removes the user and returns what was removed.
    async fn delete_user(&self, id: ObjectId) -> Result<User, AppError>;
    /// Appends `product_id` to `purchased_products` in a single update.
    async fn push_purchased_product(
        &self,
        user_id: ObjectId,
        product_id: ObjectId,
    ) -> Result<User, AppError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: Product) -> Result<Product, AppError>;
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    async fn find_product(&self, id: ObjectId) -> Result<Product, AppError>;
    async fn update_product(&self, id: ObjectId, set: Document) -> Result<Product, AppError>;
    async fn delete_product(&self, id: ObjectId) -> Result<Product, AppError>;
}

/// Everything the HTTP layer needs from the document store.
#[async_trait]
pub trait Store: UserRepository + ProductRepository {
    async fn ping(&self) -> Result<(), AppError>;
}
