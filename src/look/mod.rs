//! Shop the Look Domain Module
//!
//! This module contains the bundle widget, including:
//! - Catalog and domain models
//! - Carousel state machine, gestures and depth transforms
//! - Selection and bundle pricing
//! - Widget sessions, auto-advance timers and REST handlers

pub mod autoplay;
pub mod carousel;
pub mod catalog;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod pricing;
pub mod state;
pub mod widget;

// Re-export commonly used types for convenience
pub use catalog::LookCatalog;
pub use handlers::routes;
pub use state::{AppState, SharedState};
pub use widget::ShopTheLook;
