//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 UTC strings with a fixed number of fractional
//! digits so that lexical order in SQL equals chronological order.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use dma_core::{response::ResponseSummary, scoring::MaturityLevel};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── MaturityLevel ───────────────────────────────────────────────────────────

pub fn encode_level(level: MaturityLevel) -> &'static str { level.label() }

pub fn decode_level(s: &str) -> Result<MaturityLevel> {
  MaturityLevel::from_str(s).map_err(|_| Error::UnknownLevel(s.to_owned()))
}

// ─── Scores ──────────────────────────────────────────────────────────────────

pub fn decode_score(v: i64) -> Result<u8> {
  u8::try_from(v).map_err(|_| Error::ScoreOutOfRange(v))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// Column values for one insert, exactly as they are bound.
///
/// Kept separate from [`dma_core::survey::Submission`] so tests can push rows
/// that bypass validation and exercise the table constraints.
#[derive(Debug, Clone)]
pub struct RawNewRow {
  pub organisation:   String,
  pub name:           String,
  pub address:        String,
  pub email:          String,
  pub contact_number: String,
  pub scores:         [i64; 5],
  pub total_score:    i64,
  pub maturity_level: String,
  pub created_at:     String,
}

/// One row of the response listing as read from SQLite.
pub struct RawResponse {
  pub survey_id:      i64,
  pub organisation:   String,
  pub name:           String,
  pub total_score:    i64,
  pub maturity_level: String,
  pub created_at:     String,
}

impl RawResponse {
  pub fn into_summary(self) -> Result<ResponseSummary> {
    Ok(ResponseSummary {
      id:             self.survey_id,
      organisation:   self.organisation,
      name:           self.name,
      total_score:    decode_score(self.total_score)?,
      maturity_level: decode_level(&self.maturity_level)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}
