//! Market items and the price catalog built from raw pages

use super::page::Page;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Decorative token the feed appends to every item name.
const NAME_SUFFIX: &str = "Card";
/// Marks bundle and special variants in the feed.
const VARIANT_MARKER: char = '[';

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub price: i64,
    /// Dust obtained by salvaging one unit, 0 when unknown.
    pub dust_yield: u32,
    pub dust_value: Option<f64>,
}

impl Item {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            dust_yield: 0,
            dust_value: None,
        }
    }

    /// Records the salvage yield and derives the price paid per unit of dust.
    pub fn set_dust_yield(&mut self, dust_yield: u32) {
        self.dust_yield = dust_yield;
        self.dust_value = if dust_yield > 0 {
            Some(self.price as f64 / dust_yield as f64)
        } else {
            None
        };
    }

    pub fn is_salvageable(&self) -> bool {
        self.dust_value.is_some_and(|v| v > 0.0)
    }
}

/// Strips the decorative suffix and surrounding whitespace from a feed name.
pub fn clean_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(NAME_SUFFIX)
        .unwrap_or(trimmed)
        .trim()
}

/// Reads `global.latest`, which the feed sends either as a number or a numeric string.
fn latest_price(record: &Value) -> Option<i64> {
    match record.get("global")?.get("latest")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Current prices keyed by cleaned item name.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    items: HashMap<String, Item>,
}

impl PriceCatalog {
    /// Flattens pages into a catalog. Later pages overwrite earlier entries
    /// with the same name.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut catalog = Self::default();
        for record in pages.iter().flatten() {
            let Some(raw_name) = record.get("name").and_then(Value::as_str) else {
                warn!(?record, "Skipping record without a name");
                continue;
            };
            let Some(price) = latest_price(record) else {
                warn!(name = raw_name, "Skipping record without a usable price");
                continue;
            };
            let name = clean_name(raw_name);
            if price <= 0 || name.contains(VARIANT_MARKER) {
                continue;
            }
            catalog.insert(Item::new(name, price));
        }
        debug!("Built catalog with {} items", catalog.len());
        catalog
    }

    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Merges salvage yields by name. Names the catalog does not carry are ignored.
    pub fn apply_dust_yields(&mut self, yields: &HashMap<String, u32>) {
        for (name, dust_yield) in yields {
            match self.items.get_mut(name) {
                Some(item) => item.set_dust_yield(*dust_yield),
                None => debug!("No market price for dust table entry: {}", name),
            }
        }
    }
}
