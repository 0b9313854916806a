//! CLI logic for the Strata diagram tool.
//!
//! The `inventory` command turns an inventory export into one tiered diagram
//! per application; the `relationships` command draws a relationship map.

pub mod args;
pub mod error_adapter;

mod config;
mod output;

pub use args::Args;

use std::fs;

use log::{error, info, warn};

use strata::{
    DiagramBuilder, StrataError,
    export::{self, Graph, RenderFormat},
};

use args::{Command, InventoryArgs, RelationshipArgs};
use output::OutputDir;

/// File the unique-name table is written to, next to the diagrams.
pub const UNIQUE_NAMES_FILE: &str = "unique_names.csv";

/// Run the Strata CLI application
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed CSV input
/// - Export and rendering errors
///
/// A failure confined to one application is logged and does not end the run.
pub fn run(args: &Args) -> Result<(), StrataError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    match &args.command {
        Command::Inventory(cmd) => run_inventory(&builder, cmd),
        Command::Relationships(cmd) => run_relationships(&builder, cmd),
    }
}

fn run_inventory(builder: &DiagramBuilder, args: &InventoryArgs) -> Result<(), StrataError> {
    info!(
        input_path = args.input,
        output_dir = args.output;
        "Processing inventory"
    );

    let source = fs::read_to_string(&args.input)?;
    let mut inventory = builder.load_inventory(&source)?;

    if let Some(xref_path) = &args.xref {
        let xref_source = fs::read_to_string(xref_path)?;
        inventory = inventory.with_xref(builder.load_xref(&xref_source)?);
    }

    if inventory.is_empty() {
        warn!(input_path = args.input; "No inventory rows matched the configured filter");
    }

    let output = OutputDir::create(&args.output)?;
    output.clear_stale()?;

    let mut report = builder.run(&inventory)?;

    let mut render_failures = Vec::new();
    for diagram in report.diagrams() {
        let stem = output::file_stem(diagram.application());
        let path = output.write(&format!("{stem}.dot"), diagram.dot())?;
        info!(app = diagram.application(), path = path.display().to_string(); "Diagram written");

        let Some(format) = args.render else {
            continue;
        };
        if let Err(err) = render(builder, &output, &stem, diagram.graph(), format) {
            error!(app = diagram.application(), err:% = err; "Diagram not rendered");
            render_failures.push(err);
        }
    }
    for failure in render_failures {
        report.record_failure(failure);
    }

    let mut table = Vec::new();
    report.unique_names().write_csv(&mut table)?;
    let path = output.write(UNIQUE_NAMES_FILE, table)?;
    info!(
        path = path.display().to_string(),
        entries = report.unique_names().len();
        "Unique names written"
    );

    if !report.failures().is_empty() {
        warn!(
            written = report.diagrams().len(),
            failed = report.failures().len();
            "Some applications were skipped or not rendered"
        );
    }

    Ok(())
}

fn run_relationships(builder: &DiagramBuilder, args: &RelationshipArgs) -> Result<(), StrataError> {
    info!(
        input_path = args.input,
        scope:% = args.app;
        "Processing relationship sheet"
    );

    let source = fs::read_to_string(&args.input)?;
    let sheet = builder.load_relationships(&source)?;
    let map = builder.relationship_map(&sheet, &args.app, args.legend)?;

    let output = OutputDir::create(&args.output)?;
    let stem = output::file_stem(&args.app.file_stem(args.legend));
    let path = output.write(&format!("{stem}.dot"), export::to_dot(&map))?;
    info!(path = path.display().to_string(); "Relationship map written");

    if let Some(format) = args.render {
        render(builder, &output, &stem, &map, format)?;
    }

    Ok(())
}

/// Renders `graph` and writes the image next to its DOT file.
fn render(
    builder: &DiagramBuilder,
    output: &OutputDir,
    stem: &str,
    graph: &Graph,
    format: RenderFormat,
) -> Result<(), StrataError> {
    let image = builder.render(graph, format)?;
    let path = output.write(&format!("{stem}.{}", format.extension()), image)?;
    info!(path = path.display().to_string(); "Diagram rendered");
    Ok(())
}
