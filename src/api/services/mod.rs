pub mod catalog;
pub mod health;

pub use catalog::{ErrorCode, MediaContext, catalog_routes};
pub use health::{AppStartTime, HealthService, health_routes};
