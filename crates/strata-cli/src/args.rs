//! Command-line argument definitions for the Strata CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each subcommand reads one kind of spreadsheet export; the
//! configuration file and logging verbosity are shared.

use clap::{Parser, Subcommand};

use strata::{export::RenderFormat, relationship::RelationshipScope};

/// Command-line arguments for the Strata diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw one tiered diagram per application of an inventory export
    Inventory(InventoryArgs),
    /// Draw a relationship map from an application relationship sheet
    Relationships(RelationshipArgs),
}

#[derive(clap::Args, Debug)]
pub struct InventoryArgs {
    /// Path to the inventory CSV export
    pub input: String,

    /// Shared-application cross reference CSV
    #[arg(long)]
    pub xref: Option<String>,

    /// Output directory; stale diagrams in it are removed
    #[arg(short, long, default_value = "graphviz_output")]
    pub output: String,

    /// Also render each diagram with Graphviz (svg or png)
    #[arg(long)]
    pub render: Option<RenderFormat>,
}

#[derive(clap::Args, Debug)]
pub struct RelationshipArgs {
    /// Path to the relationship CSV export
    pub input: String,

    /// Applications to map, comma-separated, or `all` or `ecosystem`
    #[arg(long)]
    pub app: RelationshipScope,

    /// Include the direction and mechanism legend
    #[arg(long)]
    pub legend: bool,

    /// Output directory
    #[arg(short, long, default_value = "bmp_output")]
    pub output: String,

    /// Also render the map with Graphviz (svg or png)
    #[arg(long)]
    pub render: Option<RenderFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_defaults() {
        let args = Args::try_parse_from(["strata", "inventory", "inventory.csv"]).unwrap();

        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        match args.command {
            Command::Inventory(cmd) => {
                assert_eq!(cmd.input, "inventory.csv");
                assert_eq!(cmd.output, "graphviz_output");
                assert!(cmd.xref.is_none());
                assert!(cmd.render.is_none());
            }
            Command::Relationships(_) => panic!("Expected inventory command"),
        }
    }

    #[test]
    fn test_relationships_arguments() {
        let args = Args::try_parse_from([
            "strata",
            "relationships",
            "bmp.csv",
            "--app",
            "Payroll, HR",
            "--legend",
            "--render",
            "png",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Relationships(cmd) => {
                assert_eq!(
                    cmd.app,
                    RelationshipScope::Applications(vec!["Payroll".to_string(), "HR".to_string()])
                );
                assert!(cmd.legend);
                assert_eq!(cmd.output, "bmp_output");
                assert_eq!(cmd.render, Some(RenderFormat::Png));
            }
            Command::Inventory(_) => panic!("Expected relationships command"),
        }
    }

    #[test]
    fn test_invalid_render_format_rejected() {
        let result =
            Args::try_parse_from(["strata", "inventory", "in.csv", "--render", "pdf"]);

        assert!(result.is_err());
    }
}
