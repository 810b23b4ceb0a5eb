//! The scoring rubric: five ratings summed into a total and bucketed into a
//! maturity level.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::survey::Ratings;

// ─── Maturity level ──────────────────────────────────────────────────────────

/// The five ordered bands a total score falls into.
///
/// The display string is the label persisted in the `maturity_level` column
/// and returned over the API, so it must never change.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum MaturityLevel {
  #[serde(rename = "Beginner Level")]
  #[strum(serialize = "Beginner Level")]
  Beginner,
  #[serde(rename = "Emerging Level")]
  #[strum(serialize = "Emerging Level")]
  Emerging,
  #[serde(rename = "Progressing Level")]
  #[strum(serialize = "Progressing Level")]
  Progressing,
  #[serde(rename = "Advanced Level")]
  #[strum(serialize = "Advanced Level")]
  Advanced,
  #[serde(rename = "Expert Level")]
  #[strum(serialize = "Expert Level")]
  Expert,
}

impl MaturityLevel {
  /// Band lookup with inclusive upper bounds: `..=5`, `6..=10`, `11..=15`,
  /// `16..=20`, `21..`.
  pub fn from_total(total: u8) -> Self {
    match total {
      0..=5 => Self::Beginner,
      6..=10 => Self::Emerging,
      11..=15 => Self::Progressing,
      16..=20 => Self::Advanced,
      _ => Self::Expert,
    }
  }

  /// The label stored in the database, e.g. `"Advanced Level"`.
  pub fn label(self) -> &'static str { self.into() }

  /// The totals reachable within this band.
  pub fn range(self) -> RangeInclusive<u8> {
    match self {
      Self::Beginner => 5..=5,
      Self::Emerging => 6..=10,
      Self::Progressing => 11..=15,
      Self::Advanced => 16..=20,
      Self::Expert => 21..=25,
    }
  }

  /// Rubric text shown next to a respondent's result.
  pub fn description(self) -> &'static str {
    match self {
      Self::Beginner => {
        "Minimal prioritisation of data. Data is rarely seen as an \
         organisational priority, hardly discussed in teams, and leadership \
         shows little willingness to invest. Data-related skills are absent, \
         and analytical work is handled manually or intuitively."
      }
      Self::Emerging => {
        "Data is acknowledged but inconsistently valued. Data may be rated as \
         important but discussions are occasional and adoption is partial. \
         Leaders begin to recognise data's role but investments remain \
         tentative. Data exposure is low, existing through ad hoc engagements \
         that lack strategy or structure for sustained skill development."
      }
      Self::Progressing => {
        "Growing acceptance of data. Data is discussed more frequently, and \
         used for learning and evaluation. Leadership commitment starts \
         translating into structured practices. Some internal capacity \
         exists, supported by periodic external inputs."
      }
      Self::Advanced => {
        "Strong data-driven mindset. The data culture supports systematic use \
         across teams. Dedicated data staff and structured collaborations \
         reflect a maturing system. Employees regularly discuss data, leaders \
         actively invest resources, and data is embedded in decision-making \
         and problem identification."
      }
      Self::Expert => {
        "Data is considered a core organisational value. Data science is \
         institutionalised. Skilled professionals drive insights across \
         functions, supported by leadership that champions ethical, \
         evidence-driven, and transparent data practices. Employees \
         consistently engage in discussions, and knowledge-sharing systems \
         are in place."
      }
    }
  }
}

// ─── Classification ──────────────────────────────────────────────────────────

/// The outcome of scoring one set of ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
  /// Sum of the five ratings, always within `5..=25`.
  pub total: u8,
  pub level: MaturityLevel,
}

/// Score a complete set of ratings.
pub fn classify(ratings: &Ratings) -> Classification {
  let total = ratings.iter().map(|r| r.get()).sum();
  Classification { total, level: MaturityLevel::from_total(total) }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;
  use crate::survey::Rating;

  fn ratings(values: [u8; 5]) -> Ratings {
    Ratings::new(values.map(|v| Rating::new(v).unwrap()))
  }

  #[test]
  fn band_boundaries() {
    let cases = [
      (5, MaturityLevel::Beginner),
      (6, MaturityLevel::Emerging),
      (10, MaturityLevel::Emerging),
      (11, MaturityLevel::Progressing),
      (15, MaturityLevel::Progressing),
      (16, MaturityLevel::Advanced),
      (20, MaturityLevel::Advanced),
      (21, MaturityLevel::Expert),
      (25, MaturityLevel::Expert),
    ];
    for (total, level) in cases {
      assert_eq!(MaturityLevel::from_total(total), level, "total {total}");
    }
  }

  #[test]
  fn classify_sums_every_valid_tuple() {
    for a in 1..=5u8 {
      for b in 1..=5u8 {
        for c in 1..=5u8 {
          for d in 1..=5u8 {
            for e in 1..=5u8 {
              let got = classify(&ratings([a, b, c, d, e]));
              let total = a + b + c + d + e;
              assert_eq!(got.total, total);
              assert!(got.level.range().contains(&total));
            }
          }
        }
      }
    }
  }

  #[test]
  fn bands_cover_every_total_exactly_once() {
    for total in 5..=25u8 {
      let hits = MaturityLevel::iter()
        .filter(|l| l.range().contains(&total))
        .count();
      assert_eq!(hits, 1, "total {total}");
    }
  }

  #[test]
  fn labels_roundtrip_through_strum_and_serde() {
    for level in MaturityLevel::iter() {
      assert_eq!(MaturityLevel::from_str(level.label()).unwrap(), level);
      let json = serde_json::to_string(&level).unwrap();
      assert_eq!(json, format!("\"{}\"", level.label()));
    }
    assert_eq!(MaturityLevel::Progressing.to_string(), "Progressing Level");
  }

  #[test]
  fn levels_are_ordered() {
    assert!(MaturityLevel::Beginner < MaturityLevel::Emerging);
    assert!(MaturityLevel::Advanced < MaturityLevel::Expert);
  }
}
