//! Catalog view models
//!
//! Output shapes of the aggregation and location pipelines. These are both
//! the HTTP response bodies and the values stored in the cache.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Category name used when an item's category can't be resolved
pub const UNCATEGORIZED: &str = "Uncategorized";

// == Item Variation ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVariation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Price in major currency units
    pub price: f64,
    pub currency: String,
}

// == Catalog Item ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub variations: Vec<ItemVariation>,
}

// == Grouped Catalog ==
/// Items grouped by category name, in first-seen category order.
///
/// Serializes as a JSON object; key order is kept on both encode and decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedCatalog {
    groups: Vec<(String, Vec<CatalogItem>)>,
}

impl GroupedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` to the group `category`, creating the group at the end
    /// if it doesn't exist yet.
    pub fn push(&mut self, category: &str, item: CatalogItem) {
        match self.groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, items)) => items.push(item),
            None => self.groups.push((category.to_string(), vec![item])),
        }
    }

    /// Items of one category.
    pub fn get(&self, category: &str) -> Option<&[CatalogItem]> {
        self.groups
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    /// Category names in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GroupedCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, items) in &self.groups {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupedCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupedCatalogVisitor;

        impl<'de> Visitor<'de> for GroupedCatalogVisitor {
            type Value = GroupedCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, items)) = access.next_entry::<String, Vec<CatalogItem>>()? {
                    groups.push((name, items));
                }
                Ok(GroupedCatalog { groups })
            }
        }

        deserializer.deserialize_map(GroupedCatalogVisitor)
    }
}

// == Category Summary ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

// == Location ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub address: String,
}
