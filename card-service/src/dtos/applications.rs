use crate::models::ApplicationRecord;
use serde::{Deserialize, Serialize};

pub const CREATED_MESSAGE: &str = "Credit card application created successfully";
pub const REMOVED_MESSAGE: &str = "Credit card application removed successfully";

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub name: String,
    pub income: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub name: String,
    pub score: u16,
    pub income: f64,
    pub credit_limit: String,
    pub created_at: String,
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            name: record.name,
            score: record.score,
            income: record.income,
            credit_limit: record.credit_limit,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateApplicationResponse {
    pub message: String,
    pub application: ApplicationResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteApplicationResponse {
    pub message: String,
    pub deleted: u64,
}
