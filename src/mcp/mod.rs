//! Model Context Protocol (MCP) Module
//!
//! This module exposes the widget to MCP clients:
//! - Protocol models (JsonRpcRequest, tool arguments, constants)
//! - RPC helpers (success/error responses, widget metadata)
//! - MCP handlers (initialize, tools/list, tools/call, etc.)

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
