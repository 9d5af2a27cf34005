//! REST API handlers for bag reads

use super::{helpers::*, models::*};
use crate::look::{
    helpers::format_price,
    state::{AppState, SharedState},
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Creates routes for bag-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/bag/:bag_id", get(get_bag))
}

/// Builds the response body for a bag
pub fn bag_view(state: &AppState, bag_id: String) -> BagView {
    let lines = state.bag_lines(&bag_id);
    BagView {
        summary: format_line_summary(&lines),
        total: format_price(bag_total(&lines), state.config.currency),
        bag_id,
        lines,
    }
}

/// Endpoint: GET /bag/:bag_id
/// Unknown bags read as empty.
async fn get_bag(State(state): State<SharedState>, Path(bag_id): Path<String>) -> Json<BagView> {
    Json(bag_view(&state, bag_id))
}
