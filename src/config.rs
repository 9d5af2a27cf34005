//! Service configuration
//!
//! Values come from the process environment; a `.env` file is loaded
//! first when present.

use crate::error::{ShopError, ShopResult};
use crate::look::carousel::GestureThresholds;
use crate::look::models::{Currency, SelectionIndicator, VisualStyle};
use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

/// Default auto-advance period of the deck
pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 3000;

/// Runtime settings of the Shop the Look service
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Auto-advance period, `None` disables the timer
    pub auto_advance: Option<Duration>,

    pub thresholds: GestureThresholds,
    pub currency: Currency,
    pub style: VisualStyle,
    pub indicator: SelectionIndicator,

    /// Explicit assets directory for the widget template
    pub assets_dir: Option<PathBuf>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            auto_advance: Some(Duration::from_millis(DEFAULT_AUTO_ADVANCE_MS)),
            thresholds: GestureThresholds::default(),
            currency: Currency::default(),
            style: VisualStyle::default(),
            indicator: SelectionIndicator::default(),
            assets_dir: None,
        }
    }
}

impl ShopConfig {
    /// Reads `.env` (if any) and the `SHOP_*` environment variables
    pub fn from_env() -> ShopResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, unset keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ShopResult<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("SHOP_BIND_ADDR") {
            config.bind_addr = parse("SHOP_BIND_ADDR", &addr)?;
        }
        if let Some(ms) = lookup("SHOP_AUTO_ADVANCE_MS") {
            let ms: u64 = parse("SHOP_AUTO_ADVANCE_MS", &ms)?;
            config.auto_advance = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(px) = lookup("SHOP_DRAG_DISTANCE_PX") {
            config.thresholds.distance_px = parse_positive("SHOP_DRAG_DISTANCE_PX", &px)?;
        }
        if let Some(v) = lookup("SHOP_DRAG_VELOCITY_PX_S") {
            config.thresholds.velocity_px_s = parse_positive("SHOP_DRAG_VELOCITY_PX_S", &v)?;
        }
        if let Some(currency) = lookup("SHOP_CURRENCY") {
            config.currency = match currency.to_ascii_uppercase().as_str() {
                "GBP" => Currency::Gbp,
                "EUR" => Currency::Eur,
                other => return Err(invalid("SHOP_CURRENCY", other)),
            };
        }
        if let Some(style) = lookup("SHOP_VISUAL_STYLE") {
            config.style = match style.to_ascii_lowercase().as_str() {
                "layered" => VisualStyle::Layered,
                "compact" => VisualStyle::Compact,
                other => return Err(invalid("SHOP_VISUAL_STYLE", other)),
            };
        }
        if let Some(indicator) = lookup("SHOP_SELECTION_INDICATOR") {
            config.indicator = match indicator.to_ascii_lowercase().as_str() {
                "checkmark" => SelectionIndicator::Checkmark,
                "dot" => SelectionIndicator::Dot,
                other => return Err(invalid("SHOP_SELECTION_INDICATOR", other)),
            };
        }
        config.assets_dir = lookup("SHOP_ASSETS_DIR").map(PathBuf::from);

        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> ShopError {
    ShopError::Config(format!("{key}={value:?}"))
}

fn parse<T: FromStr>(key: &str, value: &str) -> ShopResult<T> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_positive(key: &str, value: &str) -> ShopResult<f64> {
    let n: f64 = parse(key, value)?;
    if n.is_finite() && n > 0.0 {
        Ok(n)
    } else {
        Err(invalid(key, value))
    }
}
