pub mod applications;
pub mod database;
pub mod metrics;
pub mod score;
pub mod store;

pub use applications::ApplicationService;
pub use database::MongoApplicationStore;
pub use metrics::{get_metrics, init_metrics};
pub use score::{FixedScore, RandomScore, ScoreSource};
pub use store::{ApplicationStore, InMemoryApplicationStore};
