//! Shop the Look Helpers
//!
//! Small pure functions shared by the widget, the REST handlers and the
//! MCP tools.

use super::models::{Currency, PriceDisplay, PricingSummary};
use uuid::Uuid;

/// Formats a GBP amount in `currency` with exactly two decimals.
///
/// Halves round away from zero, so `4.125` shows as `4.13`; `{:.2}` alone
/// would round to even.
///
/// Example: `format_price(42.0, Currency::Eur)` gives `"€49.14"`.
pub fn format_price(amount_gbp: f64, currency: Currency) -> String {
    let cents = (amount_gbp * currency.rate() * 100.0).round();
    format!("{}{:.2}", currency.symbol(), cents / 100.0)
}

/// Display strings for a summary. Savings are omitted when no discount applies.
pub fn format_summary(summary: &PricingSummary, currency: Currency) -> PriceDisplay {
    PriceDisplay {
        subtotal: format_price(summary.subtotal, currency),
        savings: (summary.discount_amount > 0.0)
            .then(|| format!("Save {}", format_price(summary.discount_amount, currency))),
        final_total: format_price(summary.final_total, currency),
    }
}

/// Returns the provided id or creates a new UUID string when `None`.
pub fn get_or_create_id(id: Option<String>) -> String {
    id.unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}
