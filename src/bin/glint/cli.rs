//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for Glint.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for Glint.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the Glint source file to run.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// Specify the log level of the runtime.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of Glint.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also logs non-fatal diagnostics, e.g. an unrecognized `use` module.
    #[value(alias("1"))]
    Warn,

    /// Also logs information about the run, e.g. which extensions loaded.
    #[value(alias("2"))]
    Info,

    /// Logs everything which happens internally in the VM.
    #[value(alias("3"))]
    Debug,

    /// Log extra information.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
