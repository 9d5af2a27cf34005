//! Bundle Selection & Pricing
//!
//! The selection set of the active look and the pure functions that
//! turn it into a [`PricingSummary`].

use super::models::{Look, PricingSummary};
use std::collections::HashSet;

/// Selected item ids of the active look
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    /// Every item of `look` selected
    pub fn all_of(look: &Look) -> Self {
        Self {
            ids: look.items.iter().map(|i| i.id.clone()).collect(),
        }
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.ids.contains(item_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flips membership of `item_id`. Ids outside `look` are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, look: &Look, item_id: &str) -> bool {
        if !look.contains_item(item_id) {
            return false;
        }
        if !self.ids.remove(item_id) {
            self.ids.insert(item_id.to_string());
        }
        true
    }
}

/// Bundle discount tier for a number of selected items
pub fn discount_percent(count: usize) -> u8 {
    match count {
        0 | 1 => 0,
        2 => 5,
        _ => 10,
    }
}

/// Nudge towards the next discount tier
pub fn incentive_message(count: usize) -> &'static str {
    match count {
        0 => "Curate your look to unlock up to 10% discount",
        1 => "Add one more item to unlock a 5% bundle discount",
        2 => "Add a third item to increase your bundle discount to 10%",
        _ => "Maximum 10% bundle discount applied",
    }
}

/// Prices the items of `look` contained in `selection`.
///
/// Amounts keep full precision; rounding happens only when formatting.
pub fn compute_summary(look: &Look, selection: &Selection) -> PricingSummary {
    let selected: Vec<_> = look
        .items
        .iter()
        .filter(|i| selection.contains(&i.id))
        .collect();

    let count = selected.len();
    let subtotal: f64 = selected.iter().map(|i| i.unit_price).sum();
    let percent = discount_percent(count);
    let discount_amount = subtotal * f64::from(percent) / 100.0;

    PricingSummary {
        selected_count: count,
        subtotal,
        discount_percent: percent,
        discount_amount,
        final_total: subtotal - discount_amount,
        incentive_message: incentive_message(count).to_string(),
    }
}
