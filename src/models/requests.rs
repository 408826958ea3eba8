//! Request DTOs for the storefront API
//!
//! Query strings accepted by the HTTP handlers.

use serde::Deserialize;

/// Query for the catalog endpoints (`?location_id=...`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub location_id: Option<String>,
}

impl LocationQuery {
    /// Returns the location id as sent, when present and non-blank.
    pub fn location_id(&self) -> Option<&str> {
        self.location_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Query for cache invalidation (`?location_id=...` or `?prefix=...`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateQuery {
    /// Drop both catalog views of one location
    #[serde(default)]
    pub location_id: Option<String>,
    /// Drop every key under a raw prefix
    #[serde(default)]
    pub prefix: Option<String>,
}
