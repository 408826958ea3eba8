//! Storefront Cache - read-through catalog service
//!
//! Caches Square locations and catalog views behind a pluggable cache
//! (in-memory or Redis) and groups catalog items per location and category.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
