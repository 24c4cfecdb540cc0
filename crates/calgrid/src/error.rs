//! Error types for Calgrid operations.
//!
//! This module provides the main error type [`CalgridError`] which wraps
//! the error conditions that can occur while loading and laying out a
//! calendar.

use std::io;

use thiserror::Error;

use crate::{dataset::DatasetError, schedule::ScheduleError};

/// The main error type for Calgrid operations.
///
/// # Diagnostic Variants
///
/// The `Dataset` variant keeps the source text next to the structured
/// issues, so front ends can render each issue against its span.
#[derive(Debug, Error)]
pub enum CalgridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Dataset { err: DatasetError, src: String },

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalgridError {
    /// Create a new `Dataset` error with the associated source text.
    pub fn new_dataset_error(err: DatasetError, src: impl Into<String>) -> Self {
        Self::Dataset {
            err,
            src: src.into(),
        }
    }
}
