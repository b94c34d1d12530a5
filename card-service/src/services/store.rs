use crate::models::ApplicationRecord;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Mutex;

/// Persistence for application records: a single collection keyed loosely by
/// `name`.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// All records in storage order.
    async fn find_all(&self) -> Result<Vec<ApplicationRecord>, AppError>;

    async fn insert(&self, record: &ApplicationRecord) -> Result<(), AppError>;

    /// Removes at most one record with the given name and returns how many
    /// were removed.
    async fn delete_by_name(&self, name: &str) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Process-local store, used by tests and `STORAGE_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    records: Mutex<Vec<ApplicationRecord>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ApplicationRecord>>, AppError> {
        self.records.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn find_all(&self) -> Result<Vec<ApplicationRecord>, AppError> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, record: &ApplicationRecord) -> Result<(), AppError> {
        self.lock()?.push(record.clone());
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, AppError> {
        let mut records = self.lock()?;
        match records.iter().position(|r| r.name == name) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ApplicationRecord {
        ApplicationRecord::new(name.to_string(), 500, 2_000.0, "1000.00".to_string())
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = InMemoryApplicationStore::new();
        store.insert(&record("Ana")).await.unwrap();
        store.insert(&record("Bruno")).await.unwrap();

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[tokio::test]
    async fn delete_removes_only_first_match() {
        let store = InMemoryApplicationStore::new();
        store.insert(&record("Ana")).await.unwrap();
        store.insert(&record("Ana")).await.unwrap();

        assert_eq!(store.delete_by_name("Ana").await.unwrap(), 1);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_of_missing_name_is_a_no_op() {
        let store = InMemoryApplicationStore::new();
        store.insert(&record("Ana")).await.unwrap();

        assert_eq!(store.delete_by_name("Carla").await.unwrap(), 0);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
