//! Upstream Module
//!
//! The catalog/location source the pipelines read through to on a cache miss.
//!
//! # Sources
//! - `SquareClient` - Square REST API (locations list, paginated catalog search)

mod records;
mod square;

use async_trait::async_trait;
use thiserror::Error;

pub use records::{
    CatalogObject, CategoryData, CategoryRecord, CategoryRef, ImageData, ImageRecord, ItemData,
    ItemRecord, Money, RawAddress, RawLocation, VariationData, VariationRecord,
};
pub use square::SquareClient;

// == Upstream Error ==
/// Failure talking to the upstream source. Always propagated to the caller.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure or undecodable response body
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
}

// == Catalog Source ==
/// Opaque fetch operations backing the read-through pipelines.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every location known upstream, active or not.
    async fn list_locations(&self) -> Result<Vec<RawLocation>, UpstreamError>;

    /// The whole catalog as one flat list: items from every page followed by
    /// their related categories and images.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogObject>, UpstreamError>;
}
