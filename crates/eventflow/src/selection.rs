//! Interactive selection state.
//!
//! [`Selection`] holds at most one selected node and implements the click
//! rules of the diagram view. [`SelectionController`] adds the side effect of
//! a node click: the node's label is copied to a [`ClipboardSink`] and a
//! short-lived "copied" indicator is shown.
//!
//! Time is passed in explicitly as an [`Instant`] so the indicator can be
//! driven by any event loop.

use std::time::{Duration, Instant};

use log::{debug, error};
use thiserror::Error;

use eventflow_core::identifier::NodeId;

use crate::graph::GraphNode;

/// How long the "copied" indicator stays visible after a successful copy.
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

/// Error returned by a [`ClipboardSink`].
#[derive(Debug, Error)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Destination for copied node labels.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The currently selected node, if any.
///
/// # Examples
///
/// ```
/// use eventflow::{identifier::NodeId, selection::Selection};
///
/// let mut selection = Selection::default();
/// selection.click_node(&NodeId::command("Pay"));
/// assert_eq!(selection.selected(), Some(&NodeId::command("Pay")));
///
/// // Clicking the selected node again clears it.
/// selection.click_node(&NodeId::command("Pay"));
/// assert_eq!(selection.selected(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    /// Selects `node`, or clears the selection if `node` is already selected.
    pub fn click_node(&mut self, node: &NodeId) {
        if self.selected.as_ref() == Some(node) {
            self.selected = None;
        } else {
            self.selected = Some(node.clone());
        }
    }

    /// Clears the selection.
    pub fn click_canvas(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }
}

/// The label most recently copied and when the copy happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFeedback {
    label: String,
    copied_at: Instant,
}

impl CopiedFeedback {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` while the indicator should still be shown at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.copied_at) < COPIED_FEEDBACK
    }
}

/// Selection plus the copy-on-click behavior.
#[derive(Debug)]
pub struct SelectionController<C> {
    selection: Selection,
    clipboard: C,
    copied: Option<CopiedFeedback>,
}

impl<C: ClipboardSink> SelectionController<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            selection: Selection::default(),
            clipboard,
            copied: None,
        }
    }

    /// Handles a click on `node`: toggles the selection and copies the label.
    ///
    /// A clipboard failure is logged and otherwise ignored; the selection
    /// still changes and the previous indicator is left as it was.
    pub fn click_node(&mut self, node: &GraphNode, now: Instant) {
        self.selection.click_node(node.id());
        debug!(node:% = node.id(), selected = self.selection.selected().is_some(); "Node clicked");

        match self.clipboard.write_text(node.label()) {
            Ok(()) => {
                self.copied = Some(CopiedFeedback {
                    label: node.label().to_string(),
                    copied_at: now,
                });
            }
            Err(err) => error!(node:% = node.id(), err:%; "Failed to copy node label"),
        }
    }

    /// Handles a click on empty canvas.
    pub fn click_canvas(&mut self) {
        self.selection.click_canvas();
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selection.selected()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the copied label if the indicator is still visible at `now`.
    pub fn copied_label(&self, now: Instant) -> Option<&str> {
        self.copied
            .as_ref()
            .filter(|copied| copied.is_visible(now))
            .map(CopiedFeedback::label)
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}
