//! REST API handlers for the Shop the Look widget
//!
//! Every interaction returns the fresh [`WidgetView`] so the rendering
//! layer can redraw the deck and the price block in one go.

use super::{models::*, state::SharedState};
use crate::bag::handlers::bag_view;
use crate::error::ShopError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

type ViewResult = Result<Json<WidgetView>, ShopError>;

/// Creates routes for widget sessions
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/looks", get(list_looks))
        .route("/looks/sessions", post(mount))
        .route("/looks/sessions/:id", get(view).delete(unmount))
        .route("/looks/sessions/:id/toggle", post(toggle))
        .route("/looks/sessions/:id/advance", post(advance))
        .route("/looks/sessions/:id/retreat", post(retreat))
        .route("/looks/sessions/:id/pointer", post(pointer))
        .route("/looks/sessions/:id/drag/start", post(drag_start))
        .route("/looks/sessions/:id/drag/end", post(drag_end))
        .route("/looks/sessions/:id/bundle", post(add_bundle))
}

/// Endpoint: GET /looks
async fn list_looks(State(state): State<SharedState>) -> Json<Vec<Look>> {
    Json(state.catalog.looks().to_vec())
}

/// Endpoint: POST /looks/sessions
/// Mounts a widget; the deck starts on the first look, fully selected.
/// The body is optional.
async fn mount(
    State(state): State<SharedState>,
    payload: Option<Json<MountInput>>,
) -> Result<impl IntoResponse, ShopError> {
    let small_screen = payload.map(|Json(p)| p.small_screen).unwrap_or_default();
    let view = state.mount(small_screen)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Endpoint: GET /looks/sessions/:id
async fn view(State(state): State<SharedState>, Path(id): Path<String>) -> ViewResult {
    state.view(&id).map(Json)
}

/// Endpoint: DELETE /looks/sessions/:id
async fn unmount(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ShopError> {
    state.unmount(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Endpoint: POST /looks/sessions/:id/toggle
async fn toggle(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleInput>,
) -> ViewResult {
    state.toggle(&id, &payload.item_id).map(Json)
}

/// Endpoint: POST /looks/sessions/:id/advance
/// Click on the stack.
async fn advance(State(state): State<SharedState>, Path(id): Path<String>) -> ViewResult {
    state.advance(&id).map(Json)
}

/// Endpoint: POST /looks/sessions/:id/retreat
async fn retreat(State(state): State<SharedState>, Path(id): Path<String>) -> ViewResult {
    state.retreat(&id).map(Json)
}

/// Endpoint: POST /looks/sessions/:id/pointer
async fn pointer(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<PointerInput>,
) -> ViewResult {
    state.pointer(&id, payload.inside).map(Json)
}

/// Endpoint: POST /looks/sessions/:id/drag/start
async fn drag_start(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<DragStartInput>,
) -> ViewResult {
    state.drag_start(&id, payload.card_index).map(Json)
}

/// Endpoint: POST /looks/sessions/:id/drag/end
async fn drag_end(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<DragEndInput>,
) -> Result<impl IntoResponse, ShopError> {
    let (outcome, view) = state.drag_end(&id, payload.offset_x, payload.velocity_x)?;
    Ok(Json(json!({ "outcome": outcome, "view": view })))
}

/// Endpoint: POST /looks/sessions/:id/bundle
/// Hands the selected items and their price to the bag.
async fn add_bundle(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<AddBundleInput>,
) -> Result<impl IntoResponse, ShopError> {
    let (bag_id, order) = state.add_bundle(&id, payload.bag_id)?;
    let bag = bag_view(&state, bag_id);
    Ok(Json(json!({ "order": order, "bag": bag })))
}
