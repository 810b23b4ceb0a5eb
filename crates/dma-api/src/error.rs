//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use dma_core::error::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("invalid survey: {0}")]
  Validation(ValidationErrors),

  #[error("constraint violation: {0}")]
  Conflict(String),

  #[error("store unavailable: {0}")]
  Unavailable(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("malformed request body: {message}")]
  Malformed { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Malformed {
      status:  rejection.status(),
      message: rejection.body_text(),
    }
  }
}

impl From<dma_core::Error> for ApiError {
  fn from(err: dma_core::Error) -> Self {
    match err {
      dma_core::Error::Validation(errs) => Self::Validation(errs),
      dma_core::Error::ConstraintViolation(m) => Self::Conflict(m),
      dma_core::Error::StoreUnavailable(m) => Self::Unavailable(m),
      dma_core::Error::CorruptRow(m) => Self::Internal(m),
    }
  }
}

/// Convert a backend error via the core taxonomy, logging it on the way.
pub(crate) fn store_error<E: Into<dma_core::Error>>(err: E) -> ApiError {
  let err = ApiError::from(err.into());
  tracing::warn!(error = %err, "survey store request failed");
  err
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errs) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
          "error":    errs.to_string(),
          "fields":   errs.fields(),
          "problems": errs,
        })),
      )
        .into_response(),
      ApiError::Conflict(m) => {
        (StatusCode::CONFLICT, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Unavailable(m) => {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": m })))
          .into_response()
      }
      ApiError::Internal(m) => {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": m })))
          .into_response()
      }
      ApiError::Malformed { status, message } => {
        (status, Json(json!({ "error": message }))).into_response()
      }
    }
  }
}
