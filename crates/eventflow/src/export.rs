//! Export functionality for flow diagrams.
//!
//! This module provides the [`Exporter`] trait that turns a laid out
//! [`FlowGraph`] and the current selection into an output document. It is the
//! last stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON document
//!     ↓ parse
//! FlowDocument
//!     ↓ layout
//! FlowGraph ──► highlight(selected)
//!     ↓ export (this module)
//! SVG / JSON text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`json`] — A render model for external front ends via [`json::JsonExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`FlowError::Export`] at the crate boundary.
//!
//! [`FlowError::Export`]: crate::FlowError::Export

/// JSON render model backend.
pub mod json;
/// SVG export backend.
pub mod svg;

use eventflow_core::identifier::NodeId;

use crate::graph::FlowGraph;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `graph` with the emphasis implied by `selected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the graph cannot be converted to the
    /// target format, or [`Error::Json`] if serialization fails.
    fn export(&self, graph: &FlowGraph, selected: Option<&NodeId>) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// A serialization failure of the JSON model.
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
