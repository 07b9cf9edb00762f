//! Error adapter for converting FlowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`FlowError::Validation`] carries every layout warning that was denied;
//! each warning is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use eventflow::{FlowError, layout::LayoutWarning};

/// Adapter for a malformed input document.
///
/// Points at the line and column reported by the JSON parser.
pub struct InputAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the reported position, at most one byte wide.
    fn span(&self) -> SourceSpan {
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column());
        let len = usize::from(offset < self.src.len());
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input document")
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("eventflow::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err.classify() {
            Category::Data => {
                "expected `commandEvents: [{ from, to: [..] }]` and \
                 `policyCommands: [{ policy, fromEvent, toCommand }]`"
            }
            Category::Eof => "the document ends early",
            Category::Syntax | Category::Io => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for a single denied layout warning.
#[derive(Debug)]
pub struct WarningAdapter<'a>(pub &'a LayoutWarning);

impl fmt::Display for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for WarningAdapter<'_> {}

impl MietteDiagnostic for WarningAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            LayoutWarning::UndeclaredCommand { .. } => "eventflow::undeclared_command",
            LayoutWarning::EmptyLabel { .. } => "eventflow::empty_label",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            LayoutWarning::UndeclaredCommand { command, .. } => {
                let help = format!(
                    "add a `commandEvents` entry with `\"from\": \"{command}\"`, or set \
                     `undeclared_commands = \"materialize\"` in the layout configuration"
                );
                Some(Box::new(help) as Box<dyn fmt::Display + 'a>)
            }
            LayoutWarning::EmptyLabel { .. } => None,
        }
    }
}

/// Adapter for non-diagnostic [`FlowError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors, configuration errors, and export errors.
pub struct ErrorAdapter<'a>(pub &'a FlowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowError::Io(_) => "eventflow::io",
            FlowError::Input { .. } => "eventflow::input",
            FlowError::Config(_) => "eventflow::config",
            FlowError::Validation(_) => "eventflow::validation",
            FlowError::Export(_) => "eventflow::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A malformed input document with source location.
    Input(InputAdapter<'a>),
    /// A single denied layout warning.
    Warning(WarningAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(i) => fmt::Display::fmt(i, f),
            Reportable::Warning(w) => fmt::Display::fmt(w, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) | Reportable::Warning(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.code(),
            Reportable::Warning(w) => w.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.help(),
            Reportable::Warning(w) => w.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(i) => i.source_code(),
            Reportable::Warning(w) => w.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(i) => i.labels(),
            Reportable::Warning(w) => w.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts a 1-based line and column into a byte offset, clamped to `src`.
///
/// A column of 0 points at the start of the line.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

/// Convert a [`FlowError`] into a list of reportable errors.
///
/// For [`FlowError::Validation`], this returns one [`Reportable`] for each
/// warning. For other error variants, this returns a single [`Reportable`].
pub fn to_reportables(err: &FlowError) -> Vec<Reportable<'_>> {
    match err {
        FlowError::Input { err, src } => vec![Reportable::Input(InputAdapter::new(err, src))],
        FlowError::Validation(warnings) => warnings
            .iter()
            .map(|w| Reportable::Warning(WarningAdapter(w)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
