//! Look Catalog
//!
//! The ordered, read-only list of looks the widget rotates through.
//! Construction validates the catalog so the carousel never sees an
//! empty deck.

use super::models::{Look, LookItem};
use crate::error::{ShopError, ShopResult};
use std::collections::HashSet;

/// Validated, immutable catalog of looks
#[derive(Debug, Clone, PartialEq)]
pub struct LookCatalog {
    looks: Vec<Look>,
}

impl LookCatalog {
    /// Builds a catalog, failing fast on an empty list, duplicate ids,
    /// looks without items or prices that are negative or not finite
    pub fn new(looks: Vec<Look>) -> ShopResult<Self> {
        if looks.is_empty() {
            return Err(ShopError::EmptyCatalog);
        }

        let mut look_ids = HashSet::new();
        for look in &looks {
            if !look_ids.insert(look.id.as_str()) {
                return Err(ShopError::DuplicateLookId(look.id.clone()));
            }
            if look.items.is_empty() {
                return Err(ShopError::EmptyLook(look.id.clone()));
            }

            let mut item_ids = HashSet::new();
            for item in &look.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ShopError::DuplicateItemId {
                        look: look.id.clone(),
                        item: item.id.clone(),
                    });
                }
                if !item.unit_price.is_finite() || item.unit_price < 0.0 {
                    return Err(ShopError::InvalidPrice {
                        look: look.id.clone(),
                        item: item.id.clone(),
                    });
                }
            }
        }

        Ok(Self { looks })
    }

    /// Number of looks, always at least one
    pub fn len(&self) -> usize {
        self.looks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.looks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Look> {
        self.looks.get(index)
    }

    pub fn looks(&self) -> &[Look] {
        &self.looks
    }

    /// The catalog shipped with the storefront
    pub fn builtin() -> Self {
        Self {
            looks: vec![
                look(
                    "boy",
                    "Boy Look",
                    "categories/boys-trousers.jpg",
                    vec![
                        item("boy-1", "Cozy Knit Cardigan", "3-4y", 42.00, "products/kids-cardigan.jpg"),
                        item("boy-2", "Comfort Fit Trousers", "3-4y", 28.00, "products/kids-trousers.jpg"),
                        item("boy-3", "Cotton Crew Socks", "3-4y", 12.00, "products/kids-cardigan.jpg"),
                    ],
                ),
                look(
                    "girl",
                    "Girl Look",
                    "categories/girls-dresses.jpg",
                    vec![
                        item("girl-1", "Embroidered Linen Dress", "2-3y", 38.00, "products/baby-dress.jpg"),
                        item("girl-2", "Knit Cardigan", "2-3y", 36.00, "products/kids-cardigan.jpg"),
                        item("girl-3", "Hair Accessories Set", "One Size", 14.00, "products/baby-dress.jpg"),
                    ],
                ),
                look(
                    "newborn",
                    "Newborn Look",
                    "categories/newborn.jpg",
                    vec![
                        item("newborn-1", "Organic Cotton Onesie", "0-3m", 24.00, "products/baby-onesie.jpg"),
                        item("newborn-2", "Merino Wool Blanket", "One Size", 65.00, "products/baby-blanket.jpg"),
                        item("newborn-3", "Soft Knit Booties", "0-6m", 18.00, "products/baby-onesie.jpg"),
                    ],
                ),
            ],
        }
    }
}

impl Default for LookCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn look(id: &str, display_name: &str, hero_image: &str, items: Vec<LookItem>) -> Look {
    Look {
        id: id.into(),
        display_name: display_name.into(),
        hero_image: hero_image.into(),
        items,
    }
}

fn item(id: &str, name: &str, size: &str, unit_price: f64, thumbnail: &str) -> LookItem {
    LookItem {
        id: id.into(),
        name: name.into(),
        size: size.into(),
        unit_price,
        thumbnail: thumbnail.into(),
    }
}
