//! Error types for `dma-core`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The failure taxonomy surfaced to whoever drives a survey store.
///
/// None of these are fatal: a failed submission or analytics read leaves the
/// store able to serve the next request.
#[derive(Debug, Error)]
pub enum Error {
  /// The form was rejected before any store interaction.
  #[error("invalid survey: {0}")]
  Validation(ValidationErrors),

  /// The store could not be reached or failed for a reason unrelated to the
  /// data being written.
  #[error("store unavailable: {0}")]
  StoreUnavailable(String),

  /// The store refused a write because it violates a table constraint.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  /// A stored row could not be decoded into the read model.
  #[error("corrupt row: {0}")]
  CorruptRow(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Validation ──────────────────────────────────────────────────────────────

/// A single problem with a submitted survey form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum FieldError {
  /// The organisation was absent or blank.
  MissingOrganisation,
  /// The respondent never chose a rating for this question.
  Unanswered { question: usize },
  /// The rating lies outside `1..=5`.
  OutOfRange { question: usize, value: i64 },
}

impl FieldError {
  /// The form field this problem refers to (`organisation`, `q1`..`q5`).
  pub fn field(&self) -> String {
    match self {
      Self::MissingOrganisation => "organisation".to_owned(),
      Self::Unanswered { question } | Self::OutOfRange { question, .. } => {
        format!("q{question}")
      }
    }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingOrganisation => f.write_str("organisation is required"),
      Self::Unanswered { question } => {
        write!(f, "question {question} has not been answered")
      }
      Self::OutOfRange { question, value } => {
        write!(f, "question {question} rating {value} is outside 1..=5")
      }
    }
  }
}

/// Every problem found in one form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn push(&mut self, err: FieldError) { self.0.push(err); }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> { self.0.iter() }

  /// Names of the offending fields, e.g. `["organisation", "q3"]`.
  pub fn fields(&self) -> Vec<String> {
    self.0.iter().map(FieldError::field).collect()
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, err) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{err}")?;
    }
    Ok(())
  }
}

impl From<ValidationErrors> for Error {
  fn from(errs: ValidationErrors) -> Self { Self::Validation(errs) }
}
