use crate::models::ApplicationRecord;
use crate::services::store::ApplicationStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

/// MongoDB-backed application store. Cloning shares the underlying client.
#[derive(Clone)]
pub struct MongoApplicationStore {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoApplicationStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, collection = %collection, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for card-service");

        // Names are not unique; the index only serves delete-by-name.
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name("name_lookup".to_string())
                    .build(),
            )
            .build();

        self.applications()
            .create_index(name_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create name index on {}: {}", self.collection, e);
                AppError::from(e)
            })?;
        tracing::info!(collection = %self.collection, "Created index on name");

        Ok(())
    }

    pub fn applications(&self) -> Collection<ApplicationRecord> {
        self.db.collection(&self.collection)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes pooled connections. Other clones of this store become unusable.
    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB client");
        self.client.shutdown().await;
    }
}

#[async_trait]
impl ApplicationStore for MongoApplicationStore {
    async fn find_all(&self) -> Result<Vec<ApplicationRecord>, AppError> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();

        let cursor = self
            .applications()
            .find(None, options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query applications: {}", e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read applications cursor: {}", e);
            AppError::from(e)
        })
    }

    async fn insert(&self, record: &ApplicationRecord) -> Result<(), AppError> {
        self.applications()
            .insert_one(record, None)
            .await
            .map_err(|e| {
                tracing::error!(name = %record.name, "Failed to insert application: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, AppError> {
        let result = self
            .applications()
            .delete_one(doc! { "name": name }, None)
            .await
            .map_err(|e| {
                tracing::error!(name = %name, "Failed to delete application: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
