//! Handlers for `/responses`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/responses` | Body: [`dma_core::survey::SurveyForm`]; returns 201 + [`Receipt`] |
//! | `GET`  | `/responses` | Every response, newest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use dma_core::{
  response::{Receipt, ResponseSummary},
  store::SurveyStore,
};

use crate::{
  error::{ApiError, store_error},
  extract::SurveyBody,
};

/// `POST /responses`: validate, score and persist one survey.
///
/// A form with an unanswered question or a blank organisation is rejected
/// with 422 before the store is touched. A body that is not a survey form
/// gets the same JSON error shape.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  SurveyBody(form): SurveyBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: SurveyStore,
{
  let submission = form.validate().map_err(ApiError::Validation)?;
  let receipt: Receipt = store.insert(submission).await.map_err(store_error)?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

/// `GET /responses`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ResponseSummary>>, ApiError>
where
  S: SurveyStore,
{
  let responses = store.list_responses().await.map_err(store_error)?;
  Ok(Json(responses))
}
