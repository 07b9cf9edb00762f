//! Error types for eventflow operations.
//!
//! This module provides the main error type [`FlowError`] which wraps the
//! error conditions that can occur while loading, laying out, and exporting a
//! flow diagram. Layout itself never fails; layout warnings only become an
//! error when the caller asks for it (see [`FlowError::Validation`]).

use std::io;

use thiserror::Error;

use crate::layout::LayoutWarning;

/// The main error type for eventflow operations.
///
/// The `Input` variant keeps the original source text so that callers can
/// point at the offending line and column.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input document: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed with {} warning(s)", .0.len())]
    Validation(Vec<LayoutWarning>),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for FlowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl FlowError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
