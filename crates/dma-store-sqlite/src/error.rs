//! Error type for `dma-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] dma_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown maturity level: {0:?}")]
  UnknownLevel(String),

  #[error("score out of range: {0}")]
  ScoreOutOfRange(i64),
}

impl Error {
  /// True when SQLite rejected a write because of a CHECK, NOT NULL or
  /// UNIQUE constraint.
  pub fn is_constraint_violation(&self) -> bool {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(e, _),
      )) => e.code == ErrorCode::ConstraintViolation,
      Error::Core(dma_core::Error::ConstraintViolation(_)) => true,
      _ => false,
    }
  }
}

impl From<Error> for dma_core::Error {
  fn from(err: Error) -> Self {
    if err.is_constraint_violation() {
      return match err {
        Error::Core(core) => core,
        other => dma_core::Error::ConstraintViolation(other.to_string()),
      };
    }
    match err {
      Error::Core(core) => core,
      Error::Database(e) => dma_core::Error::StoreUnavailable(e.to_string()),
      other @ (Error::DateParse(_)
      | Error::UnknownLevel(_)
      | Error::ScoreOutOfRange(_)) => {
        dma_core::Error::CorruptRow(other.to_string())
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
