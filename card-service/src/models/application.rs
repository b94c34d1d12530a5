use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted credit card application as stored in the collection.
///
/// Records are written once and never updated; `score` is always generated
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationRecord {
    pub name: String,
    pub score: u16,
    pub income: f64,
    pub credit_limit: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(name: String, score: u16, income: f64, credit_limit: String) -> Self {
        Self {
            name,
            score,
            income,
            credit_limit,
            created_at: Utc::now(),
        }
    }
}
