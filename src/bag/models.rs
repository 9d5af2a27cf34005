//! Bag Domain Models
//!
//! The bag is the cart collaborator that receives bundles from the
//! widget. It keeps lines only; payment and checkout live elsewhere.

use serde::{Deserialize, Serialize};

/// Returns the default quantity (1) for bag lines
fn default_quantity() -> u32 {
    1
}

/// One garment in a bag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BagLine {
    /// Look the garment was bundled from
    pub look_id: String,

    pub item_id: String,
    pub name: String,
    pub size: String,

    /// Unit price in GBP before the bundle discount
    pub unit_price: f64,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Bundle discount the line was added with
    pub discount_percent: u8,
}

/// Response for bag reads and bundle additions
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagView {
    pub bag_id: String,
    pub lines: Vec<BagLine>,

    /// e.g. "2x Cozy Knit Cardigan, 1x Cotton Crew Socks"
    pub summary: String,

    /// Discounted total, formatted
    pub total: String,
}
