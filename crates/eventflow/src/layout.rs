//! Rule-based layout of command/event/policy diagrams.
//!
//! The layout places every entity in one of three columns (commands, events,
//! policies from left to right) and derives vertical positions from the
//! input order alone. There is no automatic graph layout: the same input
//! sequence always yields the same coordinates.
//!
//! # Passes
//!
//! ```text
//! commandEvents  ──► commands pass        (commands, emitted events, command→event edges)
//! policyCommands ──► external-events pass (events never emitted by a command)
//!                ──► color pass           (one palette color per triggering event)
//!                ──► policies pass        (policies, event→policy and policy→command edges)
//! ```
//!
//! See [`LayoutBuilder`] for the exact placement rules.

mod builder;
pub mod palette;

pub use builder::LayoutBuilder;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use eventflow_core::identifier::NodeKind;

/// A non-fatal problem noticed while laying out the input.
///
/// Layout accepts every well-shaped input; these describe input that still
/// produced a diagram but probably not the intended one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "warning", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// A policy issues a command that no command record declares.
    #[error("policy `{policy}` issues undeclared command `{command}` ({resolution})")]
    UndeclaredCommand {
        policy: String,
        command: String,
        resolution: Resolution,
    },

    /// A node was created with an empty name.
    #[error("{kind} with an empty name")]
    EmptyLabel { kind: NodeKind },
}

/// How the layout dealt with an undeclared command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// The policy→command edge was left out.
    EdgeDropped,
    /// A command node was created for it.
    NodeCreated,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeDropped => f.write_str("edge dropped"),
            Self::NodeCreated => f.write_str("node created"),
        }
    }
}
