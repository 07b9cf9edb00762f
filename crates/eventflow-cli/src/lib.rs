//! CLI logic for the Eventflow diagram tool.
//!
//! This module contains the core CLI logic: load configuration, lay out the
//! input document, and write the rendered output.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::fs;

use log::{info, warn};

use eventflow::{FlowBuilder, FlowError};

/// Run the Eventflow CLI application
///
/// This function processes the input file through the Eventflow pipeline
/// and writes the resulting SVG or JSON model to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FlowError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Layout warnings when `--deny-warnings` is set
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), FlowError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing flow"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = FlowBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let graph = builder.build(&document);

    if args.deny_warnings {
        builder.deny_warnings(&graph)?;
    } else {
        for warning in graph.warnings() {
            warn!("{warning}");
        }
    }

    let selected = args.select.as_ref();
    if let Some(id) = selected.filter(|id| !graph.contains_node(id)) {
        warn!(selected:% = id; "Selected node is not in the diagram");
    }

    let output = match args.format {
        Format::Svg => builder.render_svg(&graph, selected)?,
        Format::Json => builder.render_json(&graph, selected)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Output exported successfully");

    Ok(())
}
