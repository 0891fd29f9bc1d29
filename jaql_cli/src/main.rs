use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use jaql_cli::cli::{JaqlCli, JaqlCliCommand};
use jaql_cli::commands;
use jaql_cli::errors::CliError;
use jaql_cli::ui;

fn main() -> ExitCode {
    let cli = JaqlCli::parse();
    initialize_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: JaqlCli) -> Result<(), CliError> {
    match cli.command {
        JaqlCliCommand::Translate { file, guid } => {
            commands::translate_payload(file.as_deref(), guid, cli.format)
        }
        JaqlCliCommand::Test {
            file,
            values,
            datatype,
        } => commands::test_payload(file.as_deref(), &values, datatype.map(Into::into), cli.format),
        JaqlCliCommand::Relations { file, remove } => {
            commands::relations_document(&file, &remove, cli.format)
        }
    }
}

/// Warnings only by default, debug with `--verbose`; `RUST_LOG` takes precedence.
fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
