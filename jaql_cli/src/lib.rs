//! Command implementations behind the `jaql` binary

pub mod cli;
pub mod commands;
pub mod errors;
pub mod files;
pub mod ui;
