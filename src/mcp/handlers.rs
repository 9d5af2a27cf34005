//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the Model Context Protocol handlers for the widget.
//! It exports `handle_tool_call` publicly to make it accessible for tests.

use super::{helpers::*, models::*};
use crate::bag::handlers::bag_view;
use crate::look::{models::WidgetView, state::*};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse))
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "JSON-RPC parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, -32700, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    info!(method = method_name, id = %id, "MCP call");

    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "resources/list" => rpc_success(id, handle_resources_list()),
        "resources/read" => rpc_success(id, handle_resources_read(&state).await),
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match handle_tool_call(&state, tool_name, args) {
                Ok(result) => rpc_success(id, result),
                Err(msg) => rpc_error(id, -32602, msg),
            }
        }
        "ping" => rpc_success(id, json!({})),
        _ => {
            warn!(method = method_name, "unknown MCP method");
            rpc_error(id, -32601, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true },
            "resources": { "listChanged": true, "subscribe": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn session_schema(extra: Value) -> Value {
    let mut properties = json!({ "sessionId": { "type": "string" } });
    if let (Some(target), Some(extra)) = (properties.as_object_mut(), extra.as_object()) {
        target.extend(extra.clone());
    }
    properties
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": SHOP_TOOL_NAME,
                "title": "Shop the look",
                "description": "Opens the Shop the Look bundle widget, or returns the state of an open one.",
                "inputSchema": {
                    "type": "object",
                    "properties": session_schema(json!({
                        "smallScreen": { "type": "boolean", "default": false }
                    })),
                    "additionalProperties": false
                },
                "_meta": widget_meta(None)
            },
            {
                "name": TOGGLE_TOOL_NAME,
                "title": "Toggle look item",
                "description": "Adds or removes one garment of the active look from the bundle.",
                "inputSchema": {
                    "type": "object",
                    "properties": session_schema(json!({
                        "itemId": { "type": "string" }
                    })),
                    "required": ["sessionId", "itemId"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(None)
            },
            {
                "name": NAVIGATE_TOOL_NAME,
                "title": "Navigate looks",
                "description": "Shows the next or previous look. Selection resets to the whole look.",
                "inputSchema": {
                    "type": "object",
                    "properties": session_schema(json!({
                        "direction": { "type": "string", "enum": ["next", "previous"] }
                    })),
                    "required": ["sessionId", "direction"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(None)
            },
            {
                "name": ADD_BUNDLE_TOOL_NAME,
                "title": "Add bundle to bag",
                "description": "Adds the selected garments of the active look to a bag at the bundle price.",
                "inputSchema": {
                    "type": "object",
                    "properties": session_schema(json!({
                        "bagId": { "type": "string" }
                    })),
                    "required": ["sessionId"],
                    "additionalProperties": false
                },
                "_meta": widget_meta(None)
            },
            {
                "name": CLOSE_TOOL_NAME,
                "title": "Close look",
                "description": "Closes a Shop the Look widget session and stops its auto-advance timer.",
                "inputSchema": {
                    "type": "object",
                    "properties": session_schema(json!({})),
                    "required": ["sessionId"],
                    "additionalProperties": false
                }
            }
        ],
        "_meta": widget_meta(None)
    })
}

/// Handles `resources/list` request.
fn handle_resources_list() -> Value {
    json!({
        "resources": [{
            "name": "Shop the look",
            "uri": WIDGET_TEMPLATE_URI,
            "mimeType": WIDGET_MIME_TYPE,
            "_meta": widget_meta(None)
        }],
        "_meta": widget_meta(None)
    })
}

/// Handles `resources/read` request.
async fn handle_resources_read(state: &AppState) -> Value {
    let html = state.load_widget_html().await.unwrap_or_default();
    json!({
        "contents": [{
            "uri": WIDGET_TEMPLATE_URI,
            "mimeType": WIDGET_MIME_TYPE,
            "text": html,
            "_meta": widget_meta(None)
        }],
        "_meta": widget_meta(None)
    })
}

/// Handles `tools/call` request (Business Logic).
pub fn handle_tool_call(state: &AppState, name: &str, args: Value) -> Result<Value, String> {
    match name {
        SHOP_TOOL_NAME => handle_shop_tool(state, args),
        TOGGLE_TOOL_NAME => handle_toggle_tool(state, args),
        NAVIGATE_TOOL_NAME => handle_navigate_tool(state, args),
        ADD_BUNDLE_TOOL_NAME => handle_add_bundle_tool(state, args),
        CLOSE_TOOL_NAME => handle_close_tool(state, args),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))
}

/// Tool result carrying the widget snapshot
fn view_result(view: WidgetView) -> Result<Value, String> {
    let text = describe_view(&view);
    let meta = widget_meta(Some(&view.session_id));
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": view,
        "_meta": meta
    }))
}

fn handle_shop_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: ShopTheLookArgs = if args.is_null() {
        ShopTheLookArgs::default()
    } else {
        parse_args(args)?
    };

    let view = match input.session_id {
        Some(id) => state.view(&id),
        None => state.mount(input.small_screen),
    }
    .map_err(|e| e.to_string())?;

    view_result(view)
}

fn handle_toggle_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: ToggleItemArgs = parse_args(args)?;
    let view = state
        .toggle(&input.session_id, &input.item_id)
        .map_err(|e| e.to_string())?;
    view_result(view)
}

fn handle_navigate_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: NavigateArgs = parse_args(args)?;
    let view = match input.direction {
        Direction::Next => state.advance(&input.session_id),
        Direction::Previous => state.retreat(&input.session_id),
    }
    .map_err(|e| e.to_string())?;
    view_result(view)
}

fn handle_add_bundle_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: AddBundleArgs = parse_args(args)?;
    let (bag_id, order) = state
        .add_bundle(&input.session_id, input.bag_id)
        .map_err(|e| e.to_string())?;

    let bag = bag_view(state, bag_id);
    let message = format!("Bag {} now holds: {}. Total {}.", bag.bag_id, bag.summary, bag.total);

    Ok(json!({
        "content": [{ "type": "text", "text": message }],
        "structuredContent": {
            "order": order,
            "bag": bag
        },
        "_meta": widget_meta(Some(&input.session_id))
    }))
}

fn handle_close_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: CloseLookArgs = parse_args(args)?;
    state
        .unmount(&input.session_id)
        .map_err(|e| e.to_string())?;

    Ok(json!({
        "content": [{ "type": "text", "text": "Shop the Look closed." }],
        "structuredContent": {
            "sessionId": input.session_id,
            "closed": true
        }
    }))
}
