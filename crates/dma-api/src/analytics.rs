//! Read-only aggregate endpoints. Each request re-queries the store.

use std::sync::Arc;

use axum::{Json, extract::State};
use dma_core::{
  analytics::{self, Analytics},
  questionnaire::Questionnaire,
  response::{LevelCount, SummaryStatistics},
  store::SurveyStore,
};

use crate::error::{ApiError, store_error};

/// `GET /statistics`
pub async fn statistics<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<SummaryStatistics>, ApiError>
where
  S: SurveyStore,
{
  let stats = store.summary_statistics().await.map_err(store_error)?;
  Ok(Json(stats))
}

/// `GET /distribution`
pub async fn distribution<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<LevelCount>>, ApiError>
where
  S: SurveyStore,
{
  let dist = store.level_distribution().await.map_err(store_error)?;
  Ok(Json(dist))
}

/// `GET /analytics`: statistics, distribution and listing in one response.
pub async fn snapshot<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Analytics>, ApiError>
where
  S: SurveyStore,
{
  let snap = analytics::snapshot(store.as_ref()).await.map_err(store_error)?;
  Ok(Json(snap))
}

/// `GET /questionnaire`
pub async fn questionnaire() -> Json<Questionnaire> {
  Json(Questionnaire::standard())
}
