//! The community analytics snapshot shown after a submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  response::{LevelCount, ResponseSummary, SummaryStatistics},
  store::SurveyStore,
};

/// Everything the results view renders on one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
  pub statistics:   SummaryStatistics,
  pub distribution: Vec<LevelCount>,
  /// Newest first.
  pub responses:    Vec<ResponseSummary>,
  pub taken_at:     DateTime<Utc>,
}

impl Analytics {
  /// True when nobody has submitted yet.
  pub fn is_empty(&self) -> bool { self.statistics.is_empty() }
}

/// Run the three read queries against `store` and bundle the results.
pub async fn snapshot<S: SurveyStore>(store: &S) -> Result<Analytics, S::Error> {
  let statistics = store.summary_statistics().await?;
  let distribution = store.level_distribution().await?;
  let responses = store.list_responses().await?;
  Ok(Analytics { statistics, distribution, responses, taken_at: Utc::now() })
}
