//! Bag Domain Module
//!
//! The receiving end of "Add Bundle to Bag":
//! - Bag lines and response models
//! - Conversion, merge and formatting helpers
//! - REST read handler

pub mod handlers;
pub mod helpers;
pub mod models;

pub use handlers::routes;
