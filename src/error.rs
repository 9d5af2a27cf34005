//! Error taxonomy for the Shop the Look service
//!
//! Catalog problems are fatal at start-up, session lookups and bundle
//! actions map onto HTTP status codes for the REST surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised by the catalog, the widget sessions and configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShopError {
    #[error("Look catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate look id: {0}")]
    DuplicateLookId(String),

    #[error("Look {look} contains duplicate item id {item}")]
    DuplicateItemId { look: String, item: String },

    #[error("Look {look} item {item} has an invalid price")]
    InvalidPrice { look: String, item: String },

    #[error("Look {0} has no items")]
    EmptyLook(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Bundle is empty, select at least one item")]
    EmptyBundle,

    #[error("Card {index} is not the active card and cannot be dragged")]
    CardNotDraggable { index: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ShopError {
    /// HTTP status used when the error crosses the REST boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShopError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ShopError::EmptyBundle | ShopError::CardNotDraggable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ShopResult<T> = Result<T, ShopError>;
