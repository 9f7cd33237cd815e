//! Document persistence for contact requests.

pub mod client;
pub mod config;
pub mod health;
pub mod memory;
pub mod postgres;
pub mod schema;
pub mod store;

pub use client::connect;
pub use config::*;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::ContactStore;
