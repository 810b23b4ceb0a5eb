//! [`SqliteStore`]: the SQLite implementation of [`SurveyStore`].

use std::path::Path;

use chrono::Utc;
use dma_core::{
  response::{LevelCount, Receipt, ResponseSummary, SummaryStatistics},
  scoring::classify,
  store::SurveyStore,
  survey::Submission,
};
use tracing::{debug, info};

use crate::{
  encode::{RawNewRow, RawResponse, decode_level, decode_score, encode_dt, encode_level},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A survey store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. The store is
/// opened explicitly at startup and should be [closed](Self::close) at
/// shutdown.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and ensure the schema exists.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    info!(path = %path.display(), "opened survey store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection, waiting for queued calls to finish.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    info!("closed survey store");
    Ok(())
  }

  /// Write one row inside a transaction and return its `survey_id`.
  ///
  /// Either the row is committed or nothing is written.
  pub(crate) async fn insert_row(&self, row: RawNewRow) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO dma_survey_results (
             organisation, name, address, email, contact_number,
             question_1_score, question_2_score, question_3_score,
             question_4_score, question_5_score,
             total_score, maturity_level, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            row.organisation,
            row.name,
            row.address,
            row.email,
            row.contact_number,
            row.scores[0],
            row.scores[1],
            row.scores[2],
            row.scores[3],
            row.scores[4],
            row.total_score,
            row.maturity_level,
            row.created_at,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;
    Ok(id)
  }

  /// Number of stored responses.
  pub async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM dma_survey_results", [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }
}

// ─── SurveyStore impl ────────────────────────────────────────────────────────

impl SurveyStore for SqliteStore {
  type Error = crate::Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, submission: Submission) -> Result<Receipt> {
    let score = classify(&submission.ratings);
    let contact = submission.contact;

    let row = RawNewRow {
      organisation:   submission.organisation,
      name:           contact.name,
      address:        contact.address,
      email:          contact.email,
      contact_number: contact.contact_number,
      scores:         submission.ratings.as_array().map(i64::from),
      total_score:    i64::from(score.total),
      maturity_level: encode_level(score.level).to_owned(),
      created_at:     encode_dt(Utc::now()),
    };
    let organisation = row.organisation.clone();

    let id = self.insert_row(row).await?;
    info!(id, %organisation, total = score.total, level = %score.level, "recorded survey response");

    Ok(Receipt { id, total_score: score.total, maturity_level: score.level })
  }

  async fn summary_statistics(&self) -> Result<SummaryStatistics> {
    type Row = (i64, Option<f64>, Option<i64>, Option<i64>, [Option<f64>; 5]);

    let (count, avg, min, max, question_avgs): Row = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT
             COUNT(*),
             AVG(total_score), MIN(total_score), MAX(total_score),
             AVG(question_1_score), AVG(question_2_score),
             AVG(question_3_score), AVG(question_4_score),
             AVG(question_5_score)
           FROM dma_survey_results",
          [],
          |r| {
            Ok((
              r.get(0)?,
              r.get(1)?,
              r.get(2)?,
              r.get(3)?,
              [r.get(4)?, r.get(5)?, r.get(6)?, r.get(7)?, r.get(8)?],
            ))
          },
        )?)
      })
      .await?;

    debug!(count, "computed summary statistics");

    // Aggregates over an empty table are NULL; report them as zero.
    Ok(SummaryStatistics {
      total_responses:   count.max(0) as u64,
      average_score:     avg.unwrap_or_default(),
      min_score:         min.map(decode_score).transpose()?.unwrap_or_default(),
      max_score:         max.map(decode_score).transpose()?.unwrap_or_default(),
      question_averages: question_avgs.map(Option::unwrap_or_default),
    })
  }

  async fn level_distribution(&self) -> Result<Vec<LevelCount>> {
    let raws: Vec<(String, i64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT maturity_level, COUNT(*) AS n, MIN(survey_id) AS first_id
           FROM dma_survey_results
           GROUP BY maturity_level
           ORDER BY n DESC, first_id ASC",
        )?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(level, count)| {
        Ok(LevelCount { level: decode_level(&level)?, count: count.max(0) as u64 })
      })
      .collect()
  }

  async fn list_responses(&self) -> Result<Vec<ResponseSummary>> {
    let raws: Vec<RawResponse> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT survey_id, organisation, name, total_score, maturity_level, created_at
           FROM dma_survey_results
           ORDER BY created_at DESC, survey_id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawResponse {
              survey_id:      row.get(0)?,
              organisation:   row.get(1)?,
              name:           row.get(2)?,
              total_score:    row.get(3)?,
              maturity_level: row.get(4)?,
              created_at:     row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResponse::into_summary).collect()
  }
}
