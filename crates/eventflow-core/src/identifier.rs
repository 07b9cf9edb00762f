//! Node and edge identifiers.
//!
//! A node is identified by its kind and label together, rendered as
//! `<kind>-<label>` (for example `command-PlaceOrder`). A command and an event
//! sharing a label are therefore distinct nodes, while two declarations of the
//! same entity of the same kind resolve to the same [`NodeId`].
//!
//! Edge identifiers are derived from their endpoints as
//! `<source-id>-<target-id>`, see [`EdgeId::between`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three entity kinds of a flow diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// An action that emits one or more events.
    Command,
    /// An occurrence, emitted by a command or arriving from outside.
    Event,
    /// A reaction to an event that issues a command.
    Policy,
}

impl NodeKind {
    /// All kinds, in column order from left to right.
    pub const ALL: [NodeKind; 3] = [NodeKind::Command, NodeKind::Event, NodeKind::Policy];

    /// Returns the identifier prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Event => "event",
            Self::Policy => "policy",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Error returned when a string is not a valid [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node id `{0}`, expected `command-<name>`, `event-<name>` or `policy-<name>`")]
pub struct ParseNodeIdError(String);

/// Kind-prefixed node identifier.
///
/// # Examples
///
/// ```
/// use eventflow_core::identifier::{NodeId, NodeKind};
///
/// let id = NodeId::new(NodeKind::Event, "OrderPlaced");
/// assert_eq!(id, "event-OrderPlaced");
/// assert_eq!(id.kind(), NodeKind::Event);
/// assert_eq!(id.label(), "OrderPlaced");
///
/// let parsed: NodeId = "event-OrderPlaced".parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct NodeId {
    kind: NodeKind,
    label: String,
}

impl NodeId {
    /// Creates the identifier of the `kind` node named `label`.
    pub fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }

    /// Shorthand for `NodeId::new(NodeKind::Command, label)`.
    pub fn command(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Command, label)
    }

    /// Shorthand for `NodeId::new(NodeKind::Event, label)`.
    pub fn event(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Event, label)
    }

    /// Shorthand for `NodeId::new(NodeKind::Policy, label)`.
    pub fn policy(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Policy, label)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.label)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find_map(|kind| {
                s.strip_prefix(kind.prefix())
                    .and_then(|rest| rest.strip_prefix('-'))
                    .map(|label| Self::new(kind, label))
            })
            .ok_or_else(|| ParseNodeIdError(s.to_string()))
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        other
            .strip_prefix(self.kind.prefix())
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|label| label == self.label)
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Identifier of a directed edge, `<source-id>-<target-id>`.
///
/// The id is a rendering label and is not guaranteed unique: labels that
/// contain `-` can make two endpoint pairs produce the same string. Graphs
/// deduplicate edges on their endpoints instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Derives the identifier of the edge from `source` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventflow_core::identifier::{EdgeId, NodeId};
    ///
    /// let id = EdgeId::between(&NodeId::command("PlaceOrder"), &NodeId::event("OrderPlaced"));
    /// assert_eq!(id.as_str(), "command-PlaceOrder-event-OrderPlaced");
    /// ```
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("{source}-{target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn node_id_strategy() -> impl Strategy<Value = NodeId> {
        (0usize..3, ".*").prop_map(|(kind, label)| NodeId::new(NodeKind::ALL[kind], label))
    }

    /// Parsing the displayed form yields the same id, whatever the label contains.
    fn check_display_parses_back(id: NodeId) -> Result<(), TestCaseError> {
        let parsed: NodeId = id.to_string().parse().expect("displayed ids always parse");
        prop_assert_eq!(parsed, id);
        Ok(())
    }

    proptest! {
        #[test]
        fn display_parses_back(id in node_id_strategy()) {
            check_display_parses_back(id)?;
        }
    }
}
