//! Configuration types for eventflow diagram layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional; missing fields keep the defaults below,
//! which reproduce the reference three-column layout.
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Column positions, vertical spacing, node geometry, and
//!   the handling of policies that target undeclared commands.
//! - [`StyleConfig`] - Visual options such as background color and edge routing.
//!
//! # Example
//!
//! ```
//! # use eventflow::config::{AppConfig, UndeclaredCommands};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().command_x(), 100.0);
//! assert_eq!(config.layout().undeclared_commands(), UndeclaredCommands::Skip);
//! assert!(config.style().background_color().unwrap().is_none());
//! ```

use serde::Deserialize;

use eventflow_core::{color::Color, draw::EdgeCurve};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// What to do with a policy whose `toCommand` was never declared by any
/// command record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeclaredCommands {
    /// Drop the policy→command edge and record a warning.
    #[default]
    Skip,
    /// Create the command node below the existing ones and keep the edge.
    Materialize,
}

/// Layout constants for the three-column diagram.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// X coordinate of the command column.
    command_x: f32,
    /// X coordinate of the event column.
    event_x: f32,
    /// X coordinate of the policy column.
    policy_x: f32,
    /// Vertical distance between consecutive events of one command.
    event_step: f32,
    /// Vertical gap after each command band, each external event, and each policy.
    spacing: f32,
    /// Fixed width of every node.
    node_width: f32,
    /// Font size of every node label.
    font_size: f32,
    undeclared_commands: UndeclaredCommands,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            command_x: 100.0,
            event_x: 600.0,
            policy_x: 1100.0,
            event_step: 100.0,
            spacing: 75.0,
            node_width: 400.0,
            font_size: 16.0,
            undeclared_commands: UndeclaredCommands::Skip,
        }
    }
}

impl LayoutConfig {
    pub fn command_x(&self) -> f32 {
        self.command_x
    }

    pub fn event_x(&self) -> f32 {
        self.event_x
    }

    pub fn policy_x(&self) -> f32 {
        self.policy_x
    }

    pub fn event_step(&self) -> f32 {
        self.event_step
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn undeclared_commands(&self) -> UndeclaredCommands {
        self.undeclared_commands
    }

    /// Returns a copy of this configuration with a different undeclared
    /// command policy.
    pub fn with_undeclared_commands(mut self, undeclared_commands: UndeclaredCommands) -> Self {
        self.undeclared_commands = undeclared_commands;
        self
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for exported SVG, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Routing of every edge.
    #[serde(default)]
    edge_curve: EdgeCurve,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, edge_curve: EdgeCurve) -> Self {
        Self {
            background_color,
            edge_curve,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn edge_curve(&self) -> EdgeCurve {
        self.edge_curve
    }
}
