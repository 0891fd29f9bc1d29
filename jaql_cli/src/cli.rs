use clap::{Parser, Subcommand};
use jaql_core::DataType;
use std::path::PathBuf;

use super::ui::OutputFormat;

/// Defines the top-level interface for the JAQL CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "jaql")]
#[command(version, about = "JAQL CLI: Translate, test and combine query filters.")]
pub struct JaqlCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, env = "JAQL_FORMAT", default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: JaqlCliCommand,
}

/// Defines the available subcommands of the JAQL CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum JaqlCliCommand {
    /// Translate a JAQL payload into a typed filter.
    Translate {
        /// JSON file with the payload (reads stdin if omitted)
        file: Option<PathBuf>,
        /// Guid for the translated filter (generated if omitted)
        #[arg(long)]
        guid: Option<String>,
    },
    /// Test values against the condition of a JAQL payload.
    Test {
        /// JSON file with the payload (reads stdin if omitted)
        file: Option<PathBuf>,
        /// Value to test (can be repeated). Parsed as JSON, else taken as text.
        #[arg(long = "value", required = true)]
        values: Vec<String>,
        /// Override the data type declared by the payload
        #[arg(long)]
        datatype: Option<CliDataType>,
    },
    /// Read a dashboard filter document and optionally remove filters from it.
    Relations {
        /// JSON file with `filters` and optional `filterRelations`
        file: PathBuf,
        /// Guid of a filter to remove (can be repeated)
        #[arg(long = "remove")]
        remove: Vec<String>,
    },
}

/// Data types accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum CliDataType {
    Text,
    Numeric,
    Datetime,
}

impl From<CliDataType> for DataType {
    fn from(datatype: CliDataType) -> Self {
        match datatype {
            CliDataType::Text => DataType::Text,
            CliDataType::Numeric => DataType::Numeric,
            CliDataType::Datetime => DataType::DateTime,
        }
    }
}
