//! SQL schema for the DMA survey store.
//!
//! Executed at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// The store enforces the scoring invariants itself: each rating is within
/// `1..=5`, the total is their sum, and the level matches the total's band.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per completed survey. Rows are never updated or deleted.
CREATE TABLE IF NOT EXISTS dma_survey_results (
    survey_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    organisation     TEXT    NOT NULL CHECK (length(trim(organisation)) > 0),
    name             TEXT    NOT NULL DEFAULT '',
    address          TEXT    NOT NULL DEFAULT '',
    email            TEXT    NOT NULL DEFAULT '',
    contact_number   TEXT    NOT NULL DEFAULT '',
    question_1_score INTEGER NOT NULL CHECK (question_1_score BETWEEN 1 AND 5),
    question_2_score INTEGER NOT NULL CHECK (question_2_score BETWEEN 1 AND 5),
    question_3_score INTEGER NOT NULL CHECK (question_3_score BETWEEN 1 AND 5),
    question_4_score INTEGER NOT NULL CHECK (question_4_score BETWEEN 1 AND 5),
    question_5_score INTEGER NOT NULL CHECK (question_5_score BETWEEN 1 AND 5),
    total_score      INTEGER NOT NULL,
    maturity_level   TEXT    NOT NULL,
    created_at       TEXT    NOT NULL,  -- RFC 3339 UTC, fixed microsecond width
    CHECK (total_score = question_1_score + question_2_score + question_3_score
                       + question_4_score + question_5_score),
    CHECK (maturity_level = CASE
             WHEN total_score <= 5  THEN 'Beginner Level'
             WHEN total_score <= 10 THEN 'Emerging Level'
             WHEN total_score <= 15 THEN 'Progressing Level'
             WHEN total_score <= 20 THEN 'Advanced Level'
             ELSE 'Expert Level'
           END)
);

CREATE INDEX IF NOT EXISTS dma_survey_results_created_idx
    ON dma_survey_results(created_at);

PRAGMA user_version = 1;
";
