//! Survey input: the raw form a respondent fills in and the validated
//! submission a store accepts.
//!
//! A rating must be chosen explicitly. An unanswered question is a validation
//! error; it is never defaulted to `1`.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationErrors};

/// Number of questions in the assessment.
pub const QUESTION_COUNT: usize = 5;

// ─── Rating ──────────────────────────────────────────────────────────────────

/// A single Likert rating, guaranteed to lie within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  /// Returns `None` when `value` is outside `1..=5`.
  pub fn new(value: u8) -> Option<Self> {
    (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
  }

  pub fn get(self) -> u8 { self.0 }
}

impl From<Rating> for u8 {
  fn from(r: Rating) -> Self { r.0 }
}

/// One rating per question, in question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ratings([Rating; QUESTION_COUNT]);

impl Ratings {
  pub fn new(ratings: [Rating; QUESTION_COUNT]) -> Self { Self(ratings) }

  pub fn iter(&self) -> impl Iterator<Item = Rating> + '_ {
    self.0.iter().copied()
  }

  pub fn as_array(&self) -> [u8; QUESTION_COUNT] { self.0.map(Rating::get) }
}

// ─── Raw form ────────────────────────────────────────────────────────────────

/// The form as the presentation layer collected it, before validation.
///
/// Ratings are `Option` so that "not yet chosen" is distinguishable from any
/// value; they are wide integers so an out-of-range value can be reported
/// rather than failing deserialisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyForm {
  #[serde(default)]
  pub organisation:   String,
  pub name:           Option<String>,
  pub address:        Option<String>,
  pub email:          Option<String>,
  pub contact_number: Option<String>,
  #[serde(default)]
  pub ratings:        [Option<i64>; QUESTION_COUNT],
}

impl SurveyForm {
  /// Check presence and range of every field, collecting all problems.
  pub fn validate(self) -> Result<Submission, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let organisation = self.organisation.trim().to_owned();
    if organisation.is_empty() {
      errors.push(FieldError::MissingOrganisation);
    }

    let mut ratings = [Rating(Rating::MIN); QUESTION_COUNT];
    for (i, raw) in self.ratings.iter().enumerate() {
      let question = i + 1;
      match raw {
        None => errors.push(FieldError::Unanswered { question }),
        Some(value) => {
          match u8::try_from(*value).ok().and_then(Rating::new) {
            Some(r) => ratings[i] = r,
            None => errors.push(FieldError::OutOfRange {
              question,
              value: *value,
            }),
          }
        }
      }
    }

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(Submission {
      organisation,
      contact: Contact {
        name:           self.name.unwrap_or_default(),
        address:        self.address.unwrap_or_default(),
        email:          self.email.unwrap_or_default(),
        contact_number: self.contact_number.unwrap_or_default(),
      },
      ratings: Ratings(ratings),
    })
  }
}

// ─── Validated submission ────────────────────────────────────────────────────

/// Optional respondent details. Absent fields are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub name:           String,
  pub address:        String,
  pub email:          String,
  pub contact_number: String,
}

/// A survey ready to be persisted.
///
/// Produced by [`SurveyForm::validate`] or [`Submission::new`]. The fields are
/// public; a caller that assembles one by hand with a blank organisation is
/// stopped by the store's own constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub organisation: String,
  pub contact:      Contact,
  pub ratings:      Ratings,
}

impl Submission {
  /// Build a submission with no contact details.
  pub fn new(
    organisation: impl Into<String>,
    ratings: Ratings,
  ) -> Result<Self, ValidationErrors> {
    let organisation = organisation.into().trim().to_owned();
    if organisation.is_empty() {
      return Err(ValidationErrors(vec![FieldError::MissingOrganisation]));
    }
    Ok(Self { organisation, contact: Contact::default(), ratings })
  }

  pub fn with_contact(mut self, contact: Contact) -> Self {
    self.contact = contact;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(org: &str, ratings: [Option<i64>; QUESTION_COUNT]) -> SurveyForm {
    SurveyForm { organisation: org.into(), ratings, ..Default::default() }
  }

  #[test]
  fn rating_bounds() {
    assert!(Rating::new(0).is_none());
    assert_eq!(Rating::new(1).map(Rating::get), Some(1));
    assert_eq!(Rating::new(5).map(Rating::get), Some(5));
    assert!(Rating::new(6).is_none());
  }

  #[test]
  fn complete_form_validates() {
    let sub = form("Acme", [Some(1), Some(2), Some(3), Some(4), Some(5)])
      .validate()
      .unwrap();
    assert_eq!(sub.organisation, "Acme");
    assert_eq!(sub.ratings.as_array(), [1, 2, 3, 4, 5]);
    assert_eq!(sub.contact, Contact::default());
  }

  #[test]
  fn unanswered_question_is_not_defaulted() {
    let errs = form("Acme", [Some(3), Some(3), None, Some(3), Some(3)])
      .validate()
      .unwrap_err();
    assert_eq!(errs.0, vec![FieldError::Unanswered { question: 3 }]);
    assert_eq!(errs.fields(), vec!["q3"]);
  }

  #[test]
  fn out_of_range_ratings_are_reported() {
    let errs = form("Acme", [Some(0), Some(6), Some(3), Some(-1), Some(300)])
      .validate()
      .unwrap_err();
    assert_eq!(errs.fields(), vec!["q1", "q2", "q4", "q5"]);
    assert!(errs.0.contains(&FieldError::OutOfRange { question: 2, value: 6 }));
  }

  #[test]
  fn blank_organisation_and_missing_ratings_collected_together() {
    let errs = form("   ", [None; QUESTION_COUNT]).validate().unwrap_err();
    assert_eq!(errs.0.len(), 6);
    assert_eq!(errs.0[0], FieldError::MissingOrganisation);
    assert!(errs.to_string().starts_with("organisation is required; "));
  }

  #[test]
  fn optional_fields_carried_through() {
    let mut f = form("Acme", [Some(2); QUESTION_COUNT]);
    f.email = Some("ops@acme.test".into());
    let sub = f.validate().unwrap();
    assert_eq!(sub.contact.email, "ops@acme.test");
    assert_eq!(sub.contact.name, "");
  }

  #[test]
  fn form_deserialises_nulls_as_unanswered() {
    let f: SurveyForm = serde_json::from_str(
      r#"{"organisation":"Acme","ratings":[1,null,3,4,5]}"#,
    )
    .unwrap();
    let errs = f.validate().unwrap_err();
    assert_eq!(errs.fields(), vec!["q2"]);
  }

  #[test]
  fn submission_new_rejects_blank_organisation() {
    let ratings = Ratings::new([Rating::new(3).unwrap(); QUESTION_COUNT]);
    assert!(Submission::new("", ratings).is_err());
    assert_eq!(Submission::new(" Acme ", ratings).unwrap().organisation, "Acme");
  }
}
