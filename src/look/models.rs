//! Shop the Look Domain Models
//!
//! This module contains the data structures of the look catalog, the
//! derived pricing and transform values, and the request/response
//! payloads of the widget API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Models
// =============================================================================

/// A single garment offered within a look
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LookItem {
    /// Identifier, unique within the parent look
    pub id: String,

    /// Product name
    pub name: String,

    /// Size label (e.g. "3-4y", "One Size")
    pub size: String,

    /// Unit price in GBP
    pub unit_price: f64,

    /// Thumbnail image reference
    pub thumbnail: String,
}

/// A curated outfit bundle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Look {
    /// Identifier, unique within the catalog
    pub id: String,

    /// Label shown on the active card
    pub display_name: String,

    /// Lifestyle image reference
    pub hero_image: String,

    /// Garments in display order
    pub items: Vec<LookItem>,
}

impl Look {
    pub fn item(&self, item_id: &str) -> Option<&LookItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.item(item_id).is_some()
    }
}

// =============================================================================
// Presentation Configuration
// =============================================================================

/// Display currency for formatted prices
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Gbp,
    Eur,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Eur => "€",
        }
    }

    /// Conversion rate from GBP
    pub fn rate(self) -> f64 {
        match self {
            Currency::Gbp => 1.0,
            Currency::Eur => 1.17,
        }
    }
}

/// Depth curve used for the card deck
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    #[default]
    Layered,
    Compact,
}

/// How a selected garment is marked in the item list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionIndicator {
    #[default]
    Checkmark,
    Dot,
}

// =============================================================================
// Derived Values
// =============================================================================

/// Visual placement of one card in the deck
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackTransform {
    /// Circular distance from the active card
    pub relative: usize,

    /// Vertical offset in pixels
    pub offset_y: f32,

    pub scale: f32,
    pub opacity: f32,
    pub blur_px: f32,

    /// Stacking order, higher is in front
    pub z_index: u8,

    /// Only the front card accepts drags and clicks
    pub interactive: bool,
}

/// Price summary of the current selection
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub selected_count: usize,
    pub subtotal: f64,
    pub discount_percent: u8,
    pub discount_amount: f64,
    pub final_total: f64,
    pub incentive_message: String,
}

/// Formatted strings for a [`PricingSummary`]
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceDisplay {
    pub subtotal: String,
    pub savings: Option<String>,
    pub final_total: String,
}

/// States of the carousel controller
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarouselPhase {
    #[default]
    Idle,
    Paused,
    Dragging,
}

/// Result of releasing a drag on the active card
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DragOutcome {
    Forward,
    Backward,
    SnapBack,
}

// =============================================================================
// Widget API Payloads
// =============================================================================

/// Input for mounting a widget session
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountInput {
    /// Viewport hint, only affects presentation density
    #[serde(default)]
    pub small_screen: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleInput {
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PointerInput {
    /// True on hover/touch start, false on hover/touch end
    pub inside: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStartInput {
    pub card_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndInput {
    /// Total horizontal travel in pixels, negative is leftwards
    pub offset_x: f64,

    /// Release velocity in pixels per second
    pub velocity_x: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBundleInput {
    /// Target bag, created when absent
    pub bag_id: Option<String>,
}

/// One card of the deck as seen by the rendering layer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub look_id: String,
    pub hero_image: String,
    pub transform: StackTransform,
}

/// One garment row of the active look
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: LookItem,
    pub price: String,
    pub selected: bool,
}

/// Full snapshot of a widget session
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetView {
    pub session_id: String,
    pub active_index: usize,
    pub look_count: usize,
    pub phase: CarouselPhase,
    pub look_id: String,
    pub display_name: String,
    pub hero_image: String,
    pub items: Vec<ItemView>,
    pub cards: Vec<CardView>,
    pub summary: PricingSummary,
    pub prices: PriceDisplay,
    pub can_add_bundle: bool,
    pub selection_indicator: SelectionIndicator,

    /// "k / N", only for small screens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_hint: Option<String>,
}

/// What the bag collaborator receives on "add bundle"
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleOrder {
    pub look_id: String,
    pub items: Vec<LookItem>,
    pub summary: PricingSummary,
}
