pub mod applications;
pub mod health;

pub use applications::{create_application, delete_application, list_applications};
pub use health::{health_check, metrics_endpoint, readiness_check};
