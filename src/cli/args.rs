//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "certinfo")]
#[command(version)]
#[command(about = "Decode PEM certificate bundles and print structured certificate details", long_about = None)]
pub struct Cli {
    /// PEM bundle files to inspect (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Keep scanning for further blocks after a malformed one
    #[arg(long)]
    pub resync: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented text tree
    Text,
    /// Pretty-printed JSON array
    Json,
}
