//! Core types and trait definitions for the DMA (Data Maturity Assessment)
//! survey.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the scoring rubric, input validation, the read models returned by a survey
//! store, and the [`store::SurveyStore`] trait that backends implement.

pub mod analytics;
pub mod error;
pub mod poll;
pub mod questionnaire;
pub mod response;
pub mod scoring;
pub mod store;
pub mod survey;

pub use error::{Error, Result};
