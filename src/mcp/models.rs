//! MCP Protocol Models and Constants
//!
//! This module contains all data structures and constants related to the
//! Model Context Protocol (MCP) specification and the widget tools.

use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Opens (or re-reads) a Shop the Look widget session
pub const SHOP_TOOL_NAME: &str = "shop_the_look";
/// Flips one garment of the active look
pub const TOGGLE_TOOL_NAME: &str = "toggle_look_item";
/// Moves the deck forward or backward
pub const NAVIGATE_TOOL_NAME: &str = "navigate_look";
/// Hands the current bundle to a bag
pub const ADD_BUNDLE_TOOL_NAME: &str = "add_bundle_to_bag";
/// Unmounts a widget session and stops its timer
pub const CLOSE_TOOL_NAME: &str = "close_look";
/// URI for the widget template
pub const WIDGET_TEMPLATE_URI: &str = "ui://widget/shop-the-look.html";
/// MIME type for the widget
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
/// Server identifier
pub const SERVER_NAME: &str = "shop-the-look-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

// =============================================================================
// Tool Arguments
// =============================================================================

/// Arguments of `shop_the_look`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShopTheLookArgs {
    /// Existing session to read; a new one is mounted when absent
    pub session_id: Option<String>,

    #[serde(default)]
    pub small_screen: bool,
}

/// Arguments of `toggle_look_item`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToggleItemArgs {
    pub session_id: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Arguments of `navigate_look`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NavigateArgs {
    pub session_id: String,
    pub direction: Direction,
}

/// Arguments of `add_bundle_to_bag`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddBundleArgs {
    pub session_id: String,
    pub bag_id: Option<String>,
}

/// Arguments of `close_look`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CloseLookArgs {
    pub session_id: String,
}
