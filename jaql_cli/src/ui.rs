//! Terminal output helpers

use std::fmt;

use console::style;
use jaql_core::{Filter, Filters};
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summaries
    #[default]
    Pretty,
    /// Machine-readable JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn header(text: &str) {
    eprintln!("{}", style(text).bold().cyan());
}

pub fn success(text: &str) {
    eprintln!("{} {}", style("✔").green().bold(), text);
}

pub fn info(text: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), text);
}

pub fn warning(text: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(text).yellow());
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("✖").red().bold(), style(text).red());
}

/// Debug lines go through the logger so `--verbose` controls them
pub fn debug(text: &str) {
    log::debug!("{}", text);
}

/// Print a value as pretty JSON on stdout
pub fn json_output<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error(&format!("Failed to serialize output: {}", e)),
    }
}

pub fn pretty_output_filter(filter: &Filter) {
    println!("{}", style(filter).bold());
    println!("  {} {}", style("guid:").dim(), filter.guid());
    println!("  {} {}", style("kind:").dim(), filter.kind_name());
    println!("  {} {}", style("datatype:").dim(), filter.datatype());
    if filter.config.disabled {
        println!("  {}", style("disabled").yellow());
    }
    if filter.config.locked {
        println!("  {}", style("locked").yellow());
    }
}

pub fn pretty_output_test_result(value: &serde_json::Value, matches: bool) {
    let verdict = if matches {
        style("match").green()
    } else {
        style("no match").red()
    };
    println!("{} {}", value, verdict);
}

pub fn pretty_output_filters(filters: &Filters) {
    if filters.is_empty() {
        println!("{}", style("(no filters)").dim());
        return;
    }

    println!("{}", style(filters).bold());
    for filter in filters.to_vec() {
        println!("  {} {}", style(filter.guid()).dim(), filter);
    }
}
