//! Command-line argument definitions for the Eventflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, output format, the
//! selected node, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use eventflow::identifier::{NodeId, ParseNodeIdError};

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Rendered SVG image
    #[default]
    Svg,
    /// JSON render model
    Json,
}

/// Command-line arguments for the Eventflow diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    pub format: Format,

    /// Node to highlight, e.g. `event-OrderPlaced`
    #[arg(long, value_parser = parse_node_id)]
    pub select: Option<NodeId>,

    /// Fail if the layout records any warning
    #[arg(long)]
    pub deny_warnings: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_node_id(value: &str) -> Result<NodeId, ParseNodeIdError> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["eventflow", "flow.json"]).unwrap();
        assert_eq!(args.input, "flow.json");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.format, Format::Svg);
        assert!(args.select.is_none());
        assert!(!args.deny_warnings);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_select_and_format() {
        let args = Args::try_parse_from([
            "eventflow",
            "flow.json",
            "--format",
            "json",
            "--select",
            "policy-NotifyWarehouse",
            "--deny-warnings",
        ])
        .unwrap();
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.select, Some(NodeId::policy("NotifyWarehouse")));
        assert!(args.deny_warnings);
    }

    #[test]
    fn test_invalid_selection_is_rejected() {
        let result = Args::try_parse_from(["eventflow", "flow.json", "--select", "OrderPlaced"]);
        assert!(result.is_err());
    }
}
