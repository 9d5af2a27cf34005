//! Shop the Look Library
//!
//! Backend of the "Shop the Look" bundle widget: a rotating deck of
//! curated outfits with tiered bundle pricing, served over REST and MCP.

// Domain modules
pub mod bag;
pub mod look;
pub mod mcp;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
