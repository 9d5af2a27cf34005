//! Bag Business Logic Helpers
//!
//! Conversion of bundles into bag lines, merging and formatting.

use super::models::BagLine;
use crate::look::models::BundleOrder;

/// One line per selected garment, carrying the bundle's discount tier
pub fn lines_from_bundle(order: &BundleOrder) -> Vec<BagLine> {
    order
        .items
        .iter()
        .map(|item| BagLine {
            look_id: order.look_id.clone(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            size: item.size.clone(),
            unit_price: item.unit_price,
            quantity: 1,
            discount_percent: order.summary.discount_percent,
        })
        .collect()
}

/// Merges `new_lines` into `bag`, aggregating quantities for existing
/// entries and inserting brand new ones.
///
/// Lines match on look id, item id and discount tier. A garment bought at
/// a different tier gets its own line so each unit keeps the price it was
/// charged.
pub fn merge_into_bag(bag: &mut Vec<BagLine>, new_lines: Vec<BagLine>) {
    for incoming in new_lines {
        if let Some(existing) = bag
            .iter_mut()
            .find(|l| {
                l.look_id == incoming.look_id
                    && l.item_id == incoming.item_id
                    && l.discount_percent == incoming.discount_percent
            })
        {
            existing.quantity += incoming.quantity;
        } else {
            bag.push(incoming);
        }
    }
}

/// Sum of all lines after their bundle discount
pub fn bag_total(lines: &[BagLine]) -> f64 {
    lines
        .iter()
        .map(|l| {
            let gross = l.unit_price * f64::from(l.quantity);
            gross - gross * f64::from(l.discount_percent) / 100.0
        })
        .sum()
}

/// Produces a human-readable one-line summary for a list of bag lines.
///
/// Example output: `"2x Cozy Knit Cardigan, 1x Cotton Crew Socks"`.
pub fn format_line_summary(lines: &[BagLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.name))
        .collect::<Vec<_>>()
        .join(", ")
}
