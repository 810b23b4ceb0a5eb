//! Read models returned by a survey store.
//!
//! None of these are stored; they are derived from the response rows on every
//! request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{scoring::MaturityLevel, survey::QUESTION_COUNT};

/// What the respondent gets back after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub id:             i64,
  pub total_score:    u8,
  pub maturity_level: MaturityLevel,
}

/// One row of the response listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSummary {
  pub id:             i64,
  pub organisation:   String,
  /// Empty when the respondent gave no name.
  pub name:           String,
  pub total_score:    u8,
  pub maturity_level: MaturityLevel,
  pub created_at:     DateTime<Utc>,
}

/// Aggregates over every stored response.
///
/// With no responses every field is zero; [`Default`] is that state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
  pub total_responses:   u64,
  pub average_score:     f64,
  pub min_score:         u8,
  pub max_score:         u8,
  /// Mean rating of each question, in question order.
  pub question_averages: [f64; QUESTION_COUNT],
}

impl SummaryStatistics {
  pub fn is_empty(&self) -> bool { self.total_responses == 0 }
}

/// Number of responses that landed in one maturity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
  pub level: MaturityLevel,
  pub count: u64,
}
