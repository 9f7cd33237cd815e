//! HTTP API layer for the contact service.

pub mod cache;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use cache::{CacheConfig, ReadThroughCache, RecordCache};
pub use routes::router;
pub use service::{ContactService, Page};
pub use state::{ApiConfig, AppState};
