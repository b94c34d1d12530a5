use crate::domain::{credit_limit, CreditLimitError, ScoreBand};
use crate::models::ApplicationRecord;
use crate::services::metrics;
use crate::services::score::ScoreSource;
use crate::services::store::ApplicationStore;
use service_core::error::AppError;
use std::sync::Arc;

impl From<CreditLimitError> for AppError {
    fn from(err: CreditLimitError) -> Self {
        match err {
            CreditLimitError::InvalidIncome(_) => AppError::BadRequest(anyhow::Error::new(err)),
            // The score never comes from the caller, so a bad one is our fault.
            CreditLimitError::InvalidScore(_) => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

/// List/create/delete over the application store.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
    scores: Arc<dyn ScoreSource>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>, scores: Arc<dyn ScoreSource>) -> Self {
        Self { store, scores }
    }

    pub fn store(&self) -> &Arc<dyn ApplicationStore> {
        &self.store
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_applications(&self) -> Result<Vec<ApplicationRecord>, AppError> {
        let records = self.store.find_all().await?;
        tracing::debug!(count = records.len(), "Listed applications");
        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_application(
        &self,
        name: String,
        income: f64,
    ) -> Result<ApplicationRecord, AppError> {
        let score = self.scores.next_score();
        let limit = credit_limit(score, income).map_err(|e| {
            tracing::warn!(score, income, "Credit limit calculation rejected input: {}", e);
            AppError::from(e)
        })?;

        let record = ApplicationRecord::new(name, score, income, limit.descriptor());
        self.store.insert(&record).await?;

        if let Some(band) = ScoreBand::for_score(score) {
            metrics::record_application_created(band);
            tracing::info!(
                name = %record.name,
                score,
                band = %band,
                credit_limit = %record.credit_limit,
                "Credit card application created"
            );
        }

        Ok(record)
    }

    /// Succeeds whether or not a record matched.
    #[tracing::instrument(skip(self))]
    pub async fn delete_application(&self, name: &str) -> Result<u64, AppError> {
        let deleted = self.store.delete_by_name(name).await?;
        metrics::record_application_deleted(deleted);
        tracing::info!(name = %name, deleted, "Credit card application delete processed");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::score::FixedScore;
    use crate::services::store::InMemoryApplicationStore;

    fn service(score: u16) -> ApplicationService {
        ApplicationService::new(
            Arc::new(InMemoryApplicationStore::new()),
            Arc::new(FixedScore(score)),
        )
    }

    #[tokio::test]
    async fn create_uses_generated_score_and_persists() {
        let service = service(650);

        let record = service
            .create_application("Ana".to_string(), 2_000.0)
            .await
            .unwrap();

        assert_eq!(record.score, 650);
        assert_eq!(record.credit_limit, "1000.00");

        let stored = service.list_applications().await.unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[tokio::test]
    async fn create_with_double_income_band() {
        let record = service(900)
            .create_application("Ana".to_string(), 2_000.0)
            .await
            .unwrap();

        assert_eq!(record.credit_limit, "4000.00");
    }

    #[tokio::test]
    async fn create_rejects_negative_income_without_persisting() {
        let service = service(700);

        let err = service
            .create_application("Ana".to_string(), -10.0)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(service.list_applications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn broken_score_source_is_an_internal_error() {
        let err = service(0)
            .create_application("Ana".to_string(), 2_000.0)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn deleting_missing_name_twice_is_idempotent() {
        let service = service(500);

        let first = service.delete_application("nobody").await.unwrap();
        let second = service.delete_application("nobody").await.unwrap();

        assert_eq!(first, 0);
        assert_eq!(first, second);
    }
}
