//! The `SurveyStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `dma-store-sqlite`).
//! Higher layers (`dma-api`, `dma-server`) depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  response::{LevelCount, Receipt, ResponseSummary, SummaryStatistics},
  survey::Submission,
};

/// Abstraction over a survey response store.
///
/// Responses are append-only: there is no update or delete. Every read goes
/// to the backing store, so a read issued after a committed insert observes
/// that insert.
///
/// Backend errors convert into [`crate::Error`] so callers can tell a
/// constraint rejection apart from an unreachable store.
pub trait SurveyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  /// Create the response table if it is absent. Never alters existing data.
  fn ensure_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Score `submission` and persist it as one new row, all-or-nothing.
  fn insert(
    &self,
    submission: Submission,
  ) -> impl Future<Output = Result<Receipt, Self::Error>> + Send + '_;

  /// Count, score mean/min/max and per-question means over all rows.
  fn summary_statistics(
    &self,
  ) -> impl Future<Output = Result<SummaryStatistics, Self::Error>> + Send + '_;

  /// Rows per maturity level present, most frequent first. Ties go to the
  /// level that appeared first.
  fn level_distribution(
    &self,
  ) -> impl Future<Output = Result<Vec<LevelCount>, Self::Error>> + Send + '_;

  /// Every response, newest first.
  fn list_responses(
    &self,
  ) -> impl Future<Output = Result<Vec<ResponseSummary>, Self::Error>> + Send + '_;
}
