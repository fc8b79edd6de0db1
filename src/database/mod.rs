pub mod repository;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use crate::models::{Product, User};
use crate::utils::AppError;

pub use repository::{ProductRepository, Store, UserRepository};

pub const USERS: &str = "users";
pub const PRODUCTS: &str = "products";
pub const DEFAULT_DATABASE: &str = "shop";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host:port/shop
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("📊 Using database '{}'", db_name);

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the lookup indexes. Failures are logged and ignored.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (USERS, "email"),
            (USERS, "purchased_products"),
            (PRODUCTS, "title"),
        ];

        for (collection, field) in indexes {
            let index = IndexModel::builder().keys(doc! { field: 1 }).build();
            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection, field),
                Err(e) => log::debug!("   ℹ️  Index not created for {}({}): {}", collection, field, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn users(&self) -> Collection<User> {
        self.collection(USERS)
    }

    fn products(&self) -> Collection<Product> {
        self.collection(PRODUCTS)
    }

    /// Closes the connection pool, waiting for in-flight operations.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

fn user_not_found(id: ObjectId) -> AppError {
    AppError::NotFound(format!("user {}", id))
}

fn product_not_found(id: ObjectId) -> AppError {
    AppError::NotFound(format!("product {}", id))
}

#[async_trait]
impl UserRepository for MongoDB {
    async fn create_user(&self, mut user: User) -> Result<User, AppError> {
        let result = self.users().insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_user(&self, id: ObjectId) -> Result<User, AppError> {
        self.users()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn update_user(&self, id: ObjectId, set: Document) -> Result<User, AppError> {
        if set.is_empty() {
            return self.find_user(id).await;
        }

        self.users()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete_user(&self, id: ObjectId) -> Result<User, AppError> {
        self.users()
            .find_one_and_delete(doc! { "_id": id })
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn push_purchased_product(
        &self,
        user_id: ObjectId,
        product_id: ObjectId,
    ) -> Result<User, AppError> {
        self.users()
            .find_one_and_update(
                doc! { "_id": user_id },
                doc! { "$push": { "purchased_products": product_id } },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }
}

#[async_trait]
impl ProductRepository for MongoDB {
    async fn create_product(&self, mut product: Product) -> Result<Product, AppError> {
        let result = self.products().insert_one(&product).await?;
        product.id = result.inserted_id.as_object_id();
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.products().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_product(&self, id: ObjectId) -> Result<Product, AppError> {
        self.products()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn update_product(&self, id: ObjectId, set: Document) -> Result<Product, AppError> {
        if set.is_empty() {
            return self.find_product(id).await;
        }

        self.products()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn delete_product(&self, id: ObjectId) -> Result<Product, AppError> {
        self.products()
            .find_one_and_delete(doc! { "_id": id })
            .await?
            .ok_or_else(|| product_not_found(id))
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
