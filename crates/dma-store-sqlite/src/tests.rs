//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use dma_core::{
  analytics,
  scoring::{MaturityLevel, classify},
  store::SurveyStore,
  survey::{Contact, Rating, Ratings, Submission, SurveyForm},
};

use crate::{SqliteStore, encode::{RawNewRow, encode_dt}};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ratings(values: [u8; 5]) -> Ratings {
  Ratings::new(values.map(|v| Rating::new(v).expect("rating in range")))
}

fn submission(org: &str, values: [u8; 5]) -> Submission {
  Submission::new(org, ratings(values)).unwrap()
}

fn raw_row(scores: [i64; 5]) -> RawNewRow {
  let total: i64 = scores.iter().sum();
  RawNewRow {
    organisation:   "Raw Org".into(),
    name:           String::new(),
    address:        String::new(),
    email:          String::new(),
    contact_number: String::new(),
    scores,
    total_score:    total,
    maturity_level: MaturityLevel::from_total(total.clamp(0, 25) as u8)
      .label()
      .to_owned(),
    created_at:     encode_dt(Utc::now()),
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_schema_is_idempotent_and_keeps_rows() {
  let s = store().await;
  s.insert(submission("Acme", [3, 3, 3, 3, 3])).await.unwrap();

  s.ensure_schema().await.unwrap();
  s.ensure_schema().await.unwrap();

  assert_eq!(s.count().await.unwrap(), 1);
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_then_list_returns_new_row_first() {
  let s = store().await;
  s.insert(submission("Older Org", [1, 1, 1, 1, 1])).await.unwrap();

  let values = [4, 5, 3, 4, 2];
  let receipt = s.insert(submission("Newer Org", values)).await.unwrap();
  let expected = classify(&ratings(values));
  assert_eq!(receipt.total_score, expected.total);
  assert_eq!(receipt.maturity_level, expected.level);

  let listed = s.list_responses().await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].id, receipt.id);
  assert_eq!(listed[0].organisation, "Newer Org");
  assert_eq!(listed[0].total_score, 18);
  assert_eq!(listed[0].maturity_level, MaturityLevel::Advanced);
  assert_eq!(listed[1].organisation, "Older Org");
  assert!(listed[0].created_at >= listed[1].created_at);
}

#[tokio::test]
async fn ids_increase_and_are_not_reused() {
  let s = store().await;
  let a = s.insert(submission("A", [2, 2, 2, 2, 2])).await.unwrap();
  let b = s.insert(submission("B", [2, 2, 2, 2, 2])).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn optional_fields_stored_as_empty_strings() {
  let s = store().await;
  let sub = submission("Acme", [3, 3, 3, 3, 3]).with_contact(Contact {
    name: "Ada".into(),
    ..Contact::default()
  });
  s.insert(sub).await.unwrap();
  s.insert(submission("Bare", [3, 3, 3, 3, 3])).await.unwrap();

  let listed = s.list_responses().await.unwrap();
  let bare = listed.iter().find(|r| r.organisation == "Bare").unwrap();
  let named = listed.iter().find(|r| r.organisation == "Acme").unwrap();
  assert_eq!(bare.name, "");
  assert_eq!(named.name, "Ada");

  let blank_email: i64 = s
    .conn
    .call(|conn| {
      Ok(conn.query_row(
        "SELECT COUNT(*) FROM dma_survey_results WHERE email = ''",
        [],
        |r| r.get(0),
      )?)
    })
    .await
    .unwrap();
  assert_eq!(blank_email, 2);
}

#[tokio::test]
async fn out_of_range_rating_rejected_before_store() {
  let s = store().await;
  let before = s.count().await.unwrap();

  for bad in [0, 6] {
    let form = SurveyForm {
      organisation: "Acme".into(),
      ratings: [Some(3), Some(bad), Some(3), Some(3), Some(3)],
      ..Default::default()
    };
    assert!(form.validate().is_err());
  }

  assert_eq!(s.count().await.unwrap(), before);
}

#[tokio::test]
async fn store_rejects_out_of_range_scores_as_constraint_violation() {
  let s = store().await;

  for bad in [0, 6] {
    let err = s.insert_row(raw_row([bad, 3, 3, 3, 3])).await.unwrap_err();
    assert!(err.is_constraint_violation(), "{err}");
    assert!(matches!(
      dma_core::Error::from(err),
      dma_core::Error::ConstraintViolation(_)
    ));
  }

  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn store_rejects_inconsistent_total_and_level() {
  let s = store().await;

  let mut wrong_total = raw_row([3, 3, 3, 3, 3]);
  wrong_total.total_score = 14;
  let err = s.insert_row(wrong_total).await.unwrap_err();
  assert!(err.is_constraint_violation());

  let mut wrong_level = raw_row([3, 3, 3, 3, 3]);
  wrong_level.maturity_level = MaturityLevel::Expert.label().to_owned();
  let err = s.insert_row(wrong_level).await.unwrap_err();
  assert!(err.is_constraint_violation());

  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn blank_organisation_bypassing_validation_is_rejected() {
  let s = store().await;
  let sub = Submission {
    organisation: String::new(),
    contact:      Contact::default(),
    ratings:      ratings([3, 3, 3, 3, 3]),
  };
  let err = s.insert(sub).await.unwrap_err();
  assert!(err.is_constraint_violation());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn concurrent_inserts_get_distinct_ids() {
  let s = store().await;
  let before = s.summary_statistics().await.unwrap().total_responses;

  let (a, b) = tokio::join!(
    s.insert(submission("Left", [1, 2, 3, 4, 5])),
    s.insert(submission("Right", [5, 4, 3, 2, 1])),
  );
  let (a, b) = (a.unwrap(), b.unwrap());
  assert_ne!(a.id, b.id);

  let after = s.summary_statistics().await.unwrap().total_responses;
  assert_eq!(after, before + 2);
}

#[tokio::test]
async fn closed_store_reports_unavailable() {
  let s = store().await;
  let handle = s.clone();
  s.close().await.unwrap();

  let err = handle.summary_statistics().await.unwrap_err();
  assert!(!err.is_constraint_violation());
  assert!(matches!(
    dma_core::Error::from(err),
    dma_core::Error::StoreUnavailable(_)
  ));
}

// ─── Summary statistics ──────────────────────────────────────────────────────

#[tokio::test]
async fn summary_on_empty_store_is_all_zero() {
  let s = store().await;
  let stats = s.summary_statistics().await.unwrap();
  assert_eq!(stats.total_responses, 0);
  assert_eq!(stats.average_score, 0.0);
  assert_eq!(stats.min_score, 0);
  assert_eq!(stats.max_score, 0);
  assert_eq!(stats.question_averages, [0.0; 5]);
}

#[tokio::test]
async fn summary_aggregates_scores_and_questions() {
  let s = store().await;
  s.insert(submission("A", [1, 2, 3, 4, 5])).await.unwrap();
  s.insert(submission("B", [3, 2, 1, 4, 5])).await.unwrap();
  s.insert(submission("C", [5, 5, 5, 4, 5])).await.unwrap();

  let stats = s.summary_statistics().await.unwrap();
  assert_eq!(stats.total_responses, 3);
  assert_eq!(stats.min_score, 15);
  assert_eq!(stats.max_score, 24);
  assert!((stats.average_score - 18.0).abs() < 1e-9);
  assert!((stats.question_averages[0] - 3.0).abs() < 1e-9);
  assert!((stats.question_averages[2] - 3.0).abs() < 1e-9);
  assert!((stats.question_averages[3] - 4.0).abs() < 1e-9);
  assert!((stats.question_averages[4] - 5.0).abs() < 1e-9);
}

// ─── Level distribution ──────────────────────────────────────────────────────

#[tokio::test]
async fn distribution_one_per_level() {
  let s = store().await;
  // Totals 5, 8, 13, 18, 23.
  for values in [
    [1, 1, 1, 1, 1],
    [2, 2, 2, 1, 1],
    [3, 3, 3, 2, 2],
    [4, 4, 4, 3, 3],
    [5, 5, 5, 4, 4],
  ] {
    s.insert(submission("Org", values)).await.unwrap();
  }

  let dist = s.level_distribution().await.unwrap();
  assert_eq!(dist.len(), 5);
  assert!(dist.iter().all(|lc| lc.count == 1));
  // Equal counts fall back to order of first appearance.
  let levels: Vec<_> = dist.iter().map(|lc| lc.level).collect();
  assert_eq!(levels, vec![
    MaturityLevel::Beginner,
    MaturityLevel::Emerging,
    MaturityLevel::Progressing,
    MaturityLevel::Advanced,
    MaturityLevel::Expert,
  ]);
}

#[tokio::test]
async fn distribution_orders_by_count_and_omits_empty_levels() {
  let s = store().await;
  s.insert(submission("A", [3, 3, 3, 3, 3])).await.unwrap(); // Progressing
  s.insert(submission("B", [5, 5, 5, 5, 5])).await.unwrap(); // Expert
  s.insert(submission("C", [5, 5, 5, 5, 4])).await.unwrap(); // Expert

  let dist = s.level_distribution().await.unwrap();
  assert_eq!(dist.len(), 2);
  assert_eq!(dist[0].level, MaturityLevel::Expert);
  assert_eq!(dist[0].count, 2);
  assert_eq!(dist[1].level, MaturityLevel::Progressing);
  assert_eq!(dist[1].count, 1);
}

// ─── Analytics snapshot ──────────────────────────────────────────────────────

#[tokio::test]
async fn snapshot_reflects_every_committed_insert() {
  let s = store().await;
  let empty = analytics::snapshot(&s).await.unwrap();
  assert!(empty.is_empty());
  assert!(empty.distribution.is_empty());

  s.insert(submission("Acme", [2, 2, 2, 2, 2])).await.unwrap();
  let one = analytics::snapshot(&s).await.unwrap();
  assert_eq!(one.statistics.total_responses, 1);
  assert_eq!(one.responses.len(), 1);

  s.insert(submission("Beta", [4, 4, 4, 4, 4])).await.unwrap();
  let two = analytics::snapshot(&s).await.unwrap();
  assert_eq!(two.statistics.total_responses, 2);
  assert_eq!(two.responses[0].organisation, "Beta");
}
