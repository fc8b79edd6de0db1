//! In-memory `Store` used by the handler tests.

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Document};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::repository::{ProductRepository, Store, UserRepository};
use crate::models::{Product, User};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    products: Mutex<Vec<Product>>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Makes every subsequent operation fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("connection refused".into()));
        }
        Ok(())
    }
}

fn apply_set<T: Serialize + DeserializeOwned>(record: &T, set: Document) -> Result<T, AppError> {
    let mut document = bson::to_document(record)?;
    for (key, value) in set {
        document.insert(key, value);
    }
    bson::from_document(document).map_err(|e| AppError::DatabaseError(e.to_string()))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, mut user: User) -> Result<User, AppError> {
        self.check_online()?;
        user.id = Some(ObjectId::new());
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.check_online()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_user(&self, id: ObjectId) -> Result<User, AppError> {
        self.check_online()?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    async fn update_user(&self, id: ObjectId, set: Document) -> Result<User, AppError> {
        self.check_online()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
        *user = apply_set(&*user, set)?;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: ObjectId) -> Result<User, AppError> {
        self.check_online()?;
        let mut users = self.users.lock().unwrap();
        let index = users
            .iter()
            .position(|u| u.id == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
        Ok(users.remove(index))
    }

    async fn push_purchased_product(
        &self,
        user_id: ObjectId,
        product_id: ObjectId,
    ) -> Result<User, AppError> {
        self.check_online()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == Some(user_id))
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;
        user.purchased_products.push(product_id);
        Ok(user.clone())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create_product(&self, mut product: Product) -> Result<Product, AppError> {
        self.check_online()?;
        product.id = Some(ObjectId::new());
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.check_online()?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn find_product(&self, id: ObjectId) -> Result<Product, AppError> {
        self.check_online()?;
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product {}", id)))
    }

    async fn update_product(&self, id: ObjectId, set: Document) -> Result<Product, AppError> {
        self.check_online()?;
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;
        *product = apply_set(&*product, set)?;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ObjectId) -> Result<Product, AppError> {
        self.check_online()?;
        let mut products = self.products.lock().unwrap();
        let index = products
            .iter()
            .position(|p| p.id == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;
        Ok(products.remove(index))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }
}
