//! The fixed assessment: question texts and the scoring rubric.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{scoring::MaturityLevel, survey::QUESTION_COUNT};

pub const QUESTIONS: [&str; QUESTION_COUNT] = [
  "To what extent is data considered an organisational priority and \
   importance, currently?",
  "To what extent does your organisation currently employ or engage \
   individuals with data analysis or data science expertise?",
  "To what extent is data used for internal learning, evaluation, and to \
   identify needs and problems?",
  "To what extent do employees in your organisation discuss topics related to \
   data (both project and administrative data) with their peers and senior \
   management?",
  "To what extent are leaders willing to invest resources (time, money, \
   effort) into data-driven practices and solutions?",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  /// 1-based.
  pub number: usize,
  pub text:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricBand {
  pub level:       MaturityLevel,
  pub min_score:   u8,
  pub max_score:   u8,
  pub description: String,
}

/// The questions and rubric bundled for clients that render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
  pub questions: Vec<Question>,
  pub rubric:    Vec<RubricBand>,
}

impl Questionnaire {
  pub fn standard() -> Self {
    let questions = QUESTIONS
      .iter()
      .enumerate()
      .map(|(i, text)| Question { number: i + 1, text: (*text).to_owned() })
      .collect();

    let rubric = MaturityLevel::iter()
      .map(|level| RubricBand {
        level,
        min_score: *level.range().start(),
        max_score: *level.range().end(),
        description: level.description().to_owned(),
      })
      .collect();

    Self { questions, rubric }
  }
}
