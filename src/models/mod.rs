//! Request and Response models for the storefront API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, and the
//! catalog views the pipelines produce and cache.

pub mod catalog;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use catalog::{
    CatalogItem, CategorySummary, GroupedCatalog, ItemVariation, Location, UNCATEGORIZED,
};
pub use requests::{InvalidateQuery, LocationQuery};
pub use responses::{ErrorDetail, ErrorResponse, HealthResponse, InvalidateResponse};
