//! Request extractors whose rejections use the API's JSON error body.

use axum::{
  Json,
  extract::{FromRequest, Request},
};
use dma_core::survey::SurveyForm;

use crate::error::ApiError;

/// A JSON [`SurveyForm`] body.
///
/// Unlike a bare [`Json`] extractor, a body that fails to parse is rejected
/// with `{"error": ...}` and the status axum chose for it.
pub struct SurveyBody(pub SurveyForm);

impl<S> FromRequest<S> for SurveyBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(form) = Json::<SurveyForm>::from_request(req, state).await?;
    Ok(SurveyBody(form))
  }
}
