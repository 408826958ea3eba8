//! Catalog aggregation
//!
//! Pure functions reshaping the flat upstream catalog into location-scoped
//! views. Nothing here touches the cache or the network.

use std::collections::HashMap;

use crate::models::{
    CatalogItem, CategorySummary, GroupedCatalog, ItemVariation, Location, UNCATEGORIZED,
};
use crate::upstream::{
    CatalogObject, CategoryRecord, ImageRecord, ItemData, ItemRecord, RawLocation, VariationRecord,
};

/// Minor currency units per major unit
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

const DEFAULT_VARIATION_NAME: &str = "Default";
const DEFAULT_CURRENCY: &str = "USD";
const ACTIVE_STATUS: &str = "ACTIVE";

// == Catalog Index ==
/// The upstream records partitioned by kind, with id lookups built.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    /// Item records in upstream order
    pub items: Vec<ItemRecord>,
    /// Category id -> display name
    pub category_names: HashMap<String, String>,
    /// Image id -> URL
    pub image_urls: HashMap<String, String>,
}

impl CatalogIndex {
    /// Partitions `records` and builds the category and image maps.
    ///
    /// Categories without a name and images without a URL are left out.
    pub fn build(records: Vec<CatalogObject>) -> Self {
        let mut index = Self::default();
        let mut categories = Vec::new();
        let mut images = Vec::new();

        for record in records {
            match record {
                CatalogObject::Item(item) => index.items.push(item),
                CatalogObject::Category(category) => categories.push(category),
                CatalogObject::Image(image) => images.push(image),
                CatalogObject::Other => {}
            }
        }

        index.category_names = category_name_map(categories);
        index.image_urls = image_url_map(images);
        index
    }

    /// Item records present at `location_id` that carry an item payload.
    pub fn items_at<'a>(
        &'a self,
        location_id: &'a str,
    ) -> impl Iterator<Item = (&'a ItemRecord, &'a ItemData)> + 'a {
        self.items.iter().filter_map(move |item| {
            let data = item.item_data.as_ref()?;
            is_present_at(item, location_id).then_some((item, data))
        })
    }

    /// Display name of the item's category, `Uncategorized` when unresolved.
    pub fn category_name(&self, data: &ItemData) -> String {
        category_id(data)
            .and_then(|id| self.category_names.get(id))
            .cloned()
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }

    /// URL of the item's first image, if it resolves.
    pub fn image_url(&self, data: &ItemData) -> Option<String> {
        let first = data.image_ids.as_ref()?.first()?;
        self.image_urls.get(first).cloned()
    }

    /// Output shape of one item.
    pub fn format_item(&self, item: &ItemRecord, data: &ItemData) -> CatalogItem {
        CatalogItem {
            id: item.id.clone(),
            name: data.name.clone(),
            description: data.description.clone(),
            category: self.category_name(data),
            image_url: self.image_url(data),
            variations: data
                .variations
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(format_variation)
                .collect(),
        }
    }
}

fn category_name_map(categories: Vec<CategoryRecord>) -> HashMap<String, String> {
    categories
        .into_iter()
        .filter_map(|category| {
            let name = category.category_data?.name?;
            Some((category.id?, name))
        })
        .collect()
}

fn image_url_map(images: Vec<ImageRecord>) -> HashMap<String, String> {
    images
        .into_iter()
        .filter_map(|image| {
            let url = image.image_data?.url?;
            Some((image.id?, url))
        })
        .collect()
}

// == Presence ==
/// An item is listed at a location when it is present everywhere or the
/// location is among its explicit locations.
pub fn is_present_at(item: &ItemRecord, location_id: &str) -> bool {
    item.present_at_all_locations == Some(true)
        || item
            .present_at_location_ids
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|id| id == location_id))
}

/// First category reference of an item, falling back to the legacy
/// single `category_id` field.
pub fn category_id(data: &ItemData) -> Option<&str> {
    match data.categories.as_deref() {
        Some([first, ..]) => first.id.as_deref(),
        _ => data.category_id.as_deref(),
    }
}

// == Money ==
/// Converts an amount in minor units (cents) to major units.
///
/// A single division of two exactly representable integers, so the result
/// is the closest `f64` to the decimal amount.
pub fn minor_to_major(amount: i64) -> f64 {
    amount as f64 / MINOR_UNITS_PER_MAJOR as f64
}

pub fn format_variation(variation: &VariationRecord) -> ItemVariation {
    let data = variation.item_variation_data.as_ref();
    let money = data.and_then(|d| d.price_money.as_ref());

    ItemVariation {
        id: variation.id.clone(),
        name: data
            .and_then(|d| d.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_VARIATION_NAME.to_string()),
        price: minor_to_major(money.and_then(|m| m.amount).unwrap_or(0)),
        currency: money
            .and_then(|m| m.currency.clone())
            .filter(|currency| !currency.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    }
}

// == Views ==
/// Items at `location_id` grouped by category name.
pub fn group_by_category(index: &CatalogIndex, location_id: &str) -> GroupedCatalog {
    let mut grouped = GroupedCatalog::new();
    for (item, data) in index.items_at(location_id) {
        let formatted = index.format_item(item, data);
        let category = formatted.category.clone();
        grouped.push(&category, formatted);
    }
    grouped
}

/// Per-category count of items at `location_id`, in first-seen order.
///
/// Only items whose category resolves are counted; categories without any
/// matching item are not listed.
pub fn summarize_categories(index: &CatalogIndex, location_id: &str) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (_, data) in index.items_at(location_id) {
        let Some(id) = category_id(data) else {
            continue;
        };
        let Some(name) = index.category_names.get(id) else {
            continue;
        };

        match positions.get(id) {
            Some(&pos) => summaries[pos].item_count += 1,
            None => {
                positions.insert(id, summaries.len());
                summaries.push(CategorySummary {
                    id: id.to_string(),
                    name: name.clone(),
                    item_count: 1,
                });
            }
        }
    }

    summaries
}

/// Active locations with their address flattened to one line.
pub fn active_locations(raw: Vec<RawLocation>) -> Vec<Location> {
    raw.into_iter()
        .filter(|location| location.status.as_deref() == Some(ACTIVE_STATUS))
        .map(|location| Location {
            address: format_address(&location),
            id: location.id,
            name: location.name,
            timezone: location.timezone,
            status: location.status,
        })
        .collect()
}

/// `line 1, locality, region, postal code`, skipping blank parts.
pub fn format_address(location: &RawLocation) -> String {
    let Some(address) = location.address.as_ref() else {
        return String::new();
    };

    [
        &address.address_line_1,
        &address.locality,
        &address.administrative_district_level_1,
        &address.postal_code,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{CategoryRef, Money, RawAddress, VariationData};

    fn variation(id: &str, amount: Option<i64>) -> VariationRecord {
        VariationRecord {
            id: Some(id.to_string()),
            item_variation_data: Some(VariationData {
                name: Some(id.to_string()),
                price_money: Some(Money {
                    amount,
                    currency: Some("USD".to_string()),
                }),
            }),
        }
    }

    fn item(id: &str, all: bool, locations: &[&str], category: Option<&str>) -> CatalogObject {
        CatalogObject::Item(ItemRecord {
            id: id.to_string(),
            present_at_all_locations: Some(all),
            present_at_location_ids: Some(locations.iter().map(|s| s.to_string()).collect()),
            item_data: Some(ItemData {
                name: Some(id.to_string()),
                categories: category.map(|c| {
                    vec![CategoryRef {
                        id: Some(c.to_string()),
                    }]
                }),
                variations: Some(vec![variation(&format!("{}-v", id), Some(500))]),
                ..ItemData::default()
            }),
        })
    }

    fn category(id: &str, name: Option<&str>) -> CatalogObject {
        CatalogObject::Category(CategoryRecord {
            id: Some(id.to_string()),
            category_data: Some(crate::upstream::CategoryData {
                name: name.map(str::to_string),
            }),
        })
    }

    fn image(id: &str, url: &str) -> CatalogObject {
        CatalogObject::Image(ImageRecord {
            id: Some(id.to_string()),
            image_data: Some(crate::upstream::ImageData {
                url: Some(url.to_string()),
            }),
        })
    }

    #[test]
    fn test_index_partitions_and_skips_nameless_records() {
        let index = CatalogIndex::build(vec![
            item("burger", true, &[], Some("Main")),
            category("Main", Some("Main Courses")),
            category("Nameless", None),
            image("img", "https://img/1.png"),
            CatalogObject::Other,
        ]);

        assert_eq!(index.items.len(), 1);
        assert_eq!(index.category_names.len(), 1);
        assert_eq!(index.category_names["Main"], "Main Courses");
        assert_eq!(index.image_urls["img"], "https://img/1.png");
    }

    #[test]
    fn test_presence_is_non_exclusive_or() {
        let both = ItemRecord {
            present_at_all_locations: Some(true),
            present_at_location_ids: Some(vec!["loc_X".to_string()]),
            ..ItemRecord::default()
        };
        assert!(is_present_at(&both, "loc_Y"));

        let listed = ItemRecord {
            present_at_location_ids: Some(vec!["loc_X".to_string()]),
            ..ItemRecord::default()
        };
        assert!(is_present_at(&listed, "loc_X"));
        assert!(!is_present_at(&listed, "loc_Y"));

        assert!(!is_present_at(&ItemRecord::default(), "loc_X"));
    }

    #[test]
    fn test_category_resolution() {
        let index = CatalogIndex::build(vec![category("Main", Some("Main Courses"))]);

        let first_wins = ItemData {
            categories: Some(vec![
                CategoryRef {
                    id: Some("Main".to_string()),
                },
                CategoryRef {
                    id: Some("Sides".to_string()),
                },
            ]),
            ..ItemData::default()
        };
        assert_eq!(index.category_name(&first_wins), "Main Courses");

        let legacy = ItemData {
            category_id: Some("Main".to_string()),
            ..ItemData::default()
        };
        assert_eq!(index.category_name(&legacy), "Main Courses");

        assert_eq!(index.category_name(&ItemData::default()), UNCATEGORIZED);

        let dangling = ItemData {
            categories: Some(vec![CategoryRef {
                id: Some("Gone".to_string()),
            }]),
            ..ItemData::default()
        };
        assert_eq!(index.category_name(&dangling), UNCATEGORIZED);
    }

    #[test]
    fn test_image_resolution_uses_first_reference() {
        let index = CatalogIndex::build(vec![image("a", "https://img/a.png"), image("b", "https://img/b.png")]);

        let data = ItemData {
            image_ids: Some(vec!["b".to_string(), "a".to_string()]),
            ..ItemData::default()
        };
        assert_eq!(index.image_url(&data).as_deref(), Some("https://img/b.png"));

        let missing = ItemData {
            image_ids: Some(vec!["zzz".to_string()]),
            ..ItemData::default()
        };
        assert!(index.image_url(&missing).is_none());
        assert!(index.image_url(&ItemData::default()).is_none());
    }

    #[test]
    fn test_price_conversion() {
        assert_eq!(minor_to_major(1299), 12.99);
        assert_eq!(minor_to_major(1250), 12.5);
        assert_eq!(minor_to_major(0), 0.0);
        assert_eq!(minor_to_major(5), 0.05);

        assert_eq!(format_variation(&variation("v", Some(1299))).price, 12.99);
        assert_eq!(format_variation(&variation("v", None)).price, 0.0);
    }

    #[test]
    fn test_variation_defaults() {
        let bare = format_variation(&VariationRecord::default());
        assert_eq!(bare.name, "Default");
        assert_eq!(bare.currency, "USD");
        assert_eq!(bare.price, 0.0);
        assert!(bare.id.is_none());
    }

    #[test]
    fn test_items_without_payload_are_skipped() {
        let index = CatalogIndex::build(vec![
            CatalogObject::Item(ItemRecord {
                id: "bare".to_string(),
                present_at_all_locations: Some(true),
                ..ItemRecord::default()
            }),
            item("burger", true, &[], None),
        ]);

        let grouped = group_by_category(&index, "loc_1");
        assert_eq!(grouped.get(UNCATEGORIZED).unwrap().len(), 1);
        assert_eq!(grouped.get(UNCATEGORIZED).unwrap()[0].id, "burger");
    }

    #[test]
    fn test_group_order_follows_first_seen() {
        let index = CatalogIndex::build(vec![
            item("fries", true, &[], Some("Sides")),
            item("burger", true, &[], Some("Main")),
            item("slaw", true, &[], Some("Sides")),
            category("Main", Some("Main Courses")),
            category("Sides", Some("Sides")),
        ]);

        let grouped = group_by_category(&index, "loc_1");
        let order: Vec<&str> = grouped.categories().collect();
        assert_eq!(order, vec!["Sides", "Main Courses"]);

        let sides: Vec<&str> = grouped
            .get("Sides")
            .unwrap()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(sides, vec!["fries", "slaw"]);
    }

    #[test]
    fn test_summary_omits_empty_and_unresolved_categories() {
        let index = CatalogIndex::build(vec![
            item("burger", true, &[], Some("Main")),
            item("salad", false, &["loc_2"], Some("Salads")),
            item("mystery", true, &[], None),
            category("Main", Some("Main Courses")),
            category("Salads", Some("Salads")),
        ]);

        let summary = summarize_categories(&index, "loc_1");
        assert_eq!(
            summary,
            vec![CategorySummary {
                id: "Main".to_string(),
                name: "Main Courses".to_string(),
                item_count: 1,
            }]
        );
    }

    #[test]
    fn test_active_locations_and_address() {
        let raw = vec![
            RawLocation {
                id: Some("loc_1".to_string()),
                name: Some("Downtown".to_string()),
                status: Some("ACTIVE".to_string()),
                timezone: Some("America/New_York".to_string()),
                address: Some(RawAddress {
                    address_line_1: Some("1 Main St".to_string()),
                    locality: Some("Springfield".to_string()),
                    administrative_district_level_1: None,
                    postal_code: Some("12345".to_string()),
                }),
            },
            RawLocation {
                id: Some("loc_2".to_string()),
                status: Some("INACTIVE".to_string()),
                ..RawLocation::default()
            },
            RawLocation {
                id: Some("loc_3".to_string()),
                status: Some("ACTIVE".to_string()),
                ..RawLocation::default()
            },
        ];

        let locations = active_locations(raw);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].address, "1 Main St, Springfield, 12345");
        assert_eq!(locations[0].timezone.as_deref(), Some("America/New_York"));
        assert_eq!(locations[1].id.as_deref(), Some("loc_3"));
        assert_eq!(locations[1].address, "");
    }

    #[test]
    fn test_blank_address_parts_are_dropped() {
        let location = RawLocation {
            address: Some(RawAddress {
                address_line_1: Some(String::new()),
                locality: Some("Springfield".to_string()),
                ..RawAddress::default()
            }),
            ..RawLocation::default()
        };
        assert_eq!(format_address(&location), "Springfield");
    }
}
