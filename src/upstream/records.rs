//! Upstream record shapes
//!
//! Wire types for Square locations and catalog objects. Every payload field
//! is optional: upstream data is handled defensively rather than validated.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

// == Locations ==
/// Location as returned by the locations endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub address_line_1: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub administrative_district_level_1: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

// == Catalog Objects ==
/// One record of the flattened catalog, discriminated by its `type` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogObject {
    #[serde(rename = "ITEM")]
    Item(ItemRecord),
    #[serde(rename = "CATEGORY")]
    Category(CategoryRecord),
    #[serde(rename = "IMAGE")]
    Image(ImageRecord),
    /// Any other object type (taxes, modifier lists, ...); dropped on partition
    #[serde(other)]
    Other,
}

impl CatalogObject {
    /// Decodes raw JSON objects one by one, skipping any that don't decode.
    pub fn decode_all(raw: Vec<Value>) -> Vec<CatalogObject> {
        raw.into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(object) => Some(object),
                Err(e) => {
                    warn!("Skipping malformed catalog object: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub present_at_all_locations: Option<bool>,
    #[serde(default)]
    pub present_at_location_ids: Option<Vec<String>>,
    #[serde(default)]
    pub item_data: Option<ItemData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryRef>>,
    /// Legacy single-category reference
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_ids: Option<Vec<String>>,
    /// Variations that decoded; malformed ones are dropped individually
    #[serde(default, deserialize_with = "lenient_variations")]
    pub variations: Option<Vec<VariationRecord>>,
}

fn lenient_variations<'de, D>(deserializer: D) -> Result<Option<Vec<VariationRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| {
        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(variation) => Some(variation),
                Err(e) => {
                    warn!("Skipping malformed item variation: {}", e);
                    None
                }
            })
            .collect()
    }))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariationRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub item_variation_data: Option<VariationData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariationData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_money: Option<Money>,
}

/// Amount in minor currency units (cents).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Money {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category_data: Option<CategoryData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub image_data: Option<ImageData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}
