//! Input records describing a command/event/policy model.
//!
//! These mirror the input document verbatim:
//!
//! ```json
//! {
//!   "commandEvents": [{ "from": "PlaceOrder", "to": ["OrderPlaced"] }],
//!   "policyCommands": [
//!     { "policy": "NotifyWarehouse", "fromEvent": "OrderPlaced", "toCommand": "ShipOrder" }
//!   ]
//! }
//! ```
//!
//! No field is validated here. Empty names and empty event lists are carried
//! through unchanged and produce degenerate nodes downstream.

use serde::{Deserialize, Serialize};

/// A command and the events it emits, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEvent {
    pub from: String,
    #[serde(default)]
    pub to: Vec<String>,
}

impl CommandEvent {
    pub fn new<I, S>(from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }
}

/// A policy triggered by an event that issues a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCommand {
    pub policy: String,
    pub from_event: String,
    pub to_command: String,
}

impl PolicyCommand {
    pub fn new(
        policy: impl Into<String>,
        from_event: impl Into<String>,
        to_command: impl Into<String>,
    ) -> Self {
        Self {
            policy: policy.into(),
            from_event: from_event.into(),
            to_command: to_command.into(),
        }
    }
}

/// The complete input document.
///
/// # Examples
///
/// ```
/// use eventflow_core::semantic::FlowDocument;
///
/// let doc: FlowDocument = serde_json::from_str(r#"{
///     "commandEvents": [{ "from": "PlaceOrder", "to": ["OrderPlaced"] }]
/// }"#).unwrap();
///
/// assert_eq!(doc.command_events.len(), 1);
/// assert!(doc.policy_commands.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    #[serde(default)]
    pub command_events: Vec<CommandEvent>,
    #[serde(default)]
    pub policy_commands: Vec<PolicyCommand>,
}

impl FlowDocument {
    pub fn new(command_events: Vec<CommandEvent>, policy_commands: Vec<PolicyCommand>) -> Self {
        Self {
            command_events,
            policy_commands,
        }
    }
}
