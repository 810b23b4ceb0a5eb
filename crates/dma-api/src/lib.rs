//! JSON REST API for the DMA survey.
//!
//! Exposes an axum [`Router`] backed by any [`dma_core::store::SurveyStore`].
//! Transport concerns (binding, tracing layers, shutdown) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", dma_api::api_router(store.clone()))
//! ```

pub mod analytics;
pub mod error;
pub mod extract;
pub mod responses;

use std::sync::Arc;

use axum::{Router, routing::get};
use dma_core::store::SurveyStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SurveyStore + 'static,
{
  Router::new()
    .route("/responses", get(responses::list::<S>).post(responses::create::<S>))
    .route("/statistics", get(analytics::statistics::<S>))
    .route("/distribution", get(analytics::distribution::<S>))
    .route("/analytics", get(analytics::snapshot::<S>))
    .route("/questionnaire", get(analytics::questionnaire))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use dma_core::{
    analytics::Analytics,
    questionnaire::Questionnaire,
    response::{LevelCount, Receipt, ResponseSummary, SummaryStatistics},
    scoring::MaturityLevel,
  };
  use dma_store_sqlite::SqliteStore;
  use serde::de::DeserializeOwned;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn send(
    store:  Arc<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    api_router(store)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn read_json<T: DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── POST /responses ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_returns_201_with_receipt() {
    let store = make_store().await;
    let resp = send(
      store.clone(),
      "POST",
      "/responses",
      Some(json!({ "organisation": "Acme", "ratings": [5, 5, 4, 5, 5] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let receipt: Receipt = read_json(resp).await;
    assert_eq!(receipt.total_score, 24);
    assert_eq!(receipt.maturity_level, MaturityLevel::Expert);

    let listed: Vec<ResponseSummary> =
      read_json(send(store, "GET", "/responses", None).await).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, receipt.id);
  }

  #[tokio::test]
  async fn unanswered_question_returns_422_and_writes_nothing() {
    let store = make_store().await;
    let resp = send(
      store.clone(),
      "POST",
      "/responses",
      Some(json!({ "organisation": "Acme", "ratings": [1, 2, null, 4, 5] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = read_json(resp).await;
    assert_eq!(body["fields"], json!(["q3"]));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn out_of_range_and_blank_organisation_reported_together() {
    let store = make_store().await;
    let resp = send(
      store.clone(),
      "POST",
      "/responses",
      Some(json!({ "organisation": "  ", "ratings": [0, 2, 3, 4, 6] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = read_json(resp).await;
    assert_eq!(body["fields"], json!(["organisation", "q1", "q5"]));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn malformed_body_gets_json_error() {
    let store = make_store().await;
    let resp = send(
      store.clone(),
      "POST",
      "/responses",
      Some(json!({ "organisation": "A", "ratings": [1, 2, 3.5, 4, 5] })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = read_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|m| m.contains("ratings")));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn missing_content_type_gets_json_error() {
    let store = make_store().await;
    let resp = api_router(store)
      .oneshot(
        Request::post("/responses")
          .body(Body::from(r#"{"organisation":"A"}"#))
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body: Value = read_json(resp).await;
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn closed_store_returns_503() {
    let store = make_store().await;
    SqliteStore::clone(&store).close().await.unwrap();

    let resp = send(store, "GET", "/statistics", None).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
  }

  // ── Aggregates ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn statistics_on_empty_store_are_zero() {
    let store = make_store().await;
    let resp = send(store, "GET", "/statistics", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stats: SummaryStatistics = read_json(resp).await;
    assert_eq!(stats, SummaryStatistics::default());
  }

  #[tokio::test]
  async fn distribution_and_analytics_follow_submissions() {
    let store = make_store().await;
    for ratings in [[1, 1, 1, 1, 1], [5, 5, 5, 5, 5], [5, 5, 5, 5, 4]] {
      let resp = send(
        store.clone(),
        "POST",
        "/responses",
        Some(json!({ "organisation": "Org", "ratings": ratings })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let dist: Vec<LevelCount> =
      read_json(send(store.clone(), "GET", "/distribution", None).await).await;
    assert_eq!(dist, vec![
      LevelCount { level: MaturityLevel::Expert, count: 2 },
      LevelCount { level: MaturityLevel::Beginner, count: 1 },
    ]);

    let snap: Analytics =
      read_json(send(store, "GET", "/analytics", None).await).await;
    assert_eq!(snap.statistics.total_responses, 3);
    assert_eq!(snap.statistics.min_score, 5);
    assert_eq!(snap.statistics.max_score, 25);
    assert_eq!(snap.distribution, dist);
    assert_eq!(snap.responses.len(), 3);
  }

  #[tokio::test]
  async fn questionnaire_lists_five_questions_and_rubric() {
    let store = make_store().await;
    let q: Questionnaire =
      read_json(send(store, "GET", "/questionnaire", None).await).await;
    assert_eq!(q.questions.len(), 5);
    assert_eq!(q.rubric.len(), 5);
    assert_eq!(q.rubric[0].level, MaturityLevel::Beginner);
    assert_eq!((q.rubric[4].min_score, q.rubric[4].max_score), (21, 25));
  }
}
