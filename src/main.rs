//! certinfo - decode PEM certificate bundles and describe their contents
//!
//! Reads one or more PEM bundle files (or stdin), decodes every
//! certificate block, and prints the structured fields of each
//! certificate. Blocks that fail to decode are reported per ordinal on
//! stderr without aborting the run.

use certinfo::cli::{Cli, OutputFormat};
use certinfo::utils::Result;
use certinfo::{output, pem, Certificate, RecoveryPolicy};
use clap::Parser;
use console::style;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let policy = if cli.resync {
        RecoveryPolicy::Resync
    } else {
        RecoveryPolicy::Halt
    };

    let mut infos = Vec::new();
    for blob in read_inputs(&cli.files)? {
        let batch = pem::decode_with(&blob, policy);
        for (ordinal, err) in &batch.errors {
            eprintln!(
                "{} block {}: {}",
                style("warning:").yellow().bold(),
                ordinal,
                err
            );
        }

        // Nothing decoded and at least one block failed: surface the
        // first failure instead of printing an empty result.
        if batch.payload.is_empty() {
            if let Some(err) = batch.errors.into_values().next() {
                return Err(err.into());
            }
        }

        for cert in Certificate::parse_payload(&batch.payload)? {
            infos.push(cert.details()?.to_info());
        }
    }

    match cli.format {
        OutputFormat::Text => {
            for (i, info) in infos.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", output::render_text(info));
            }
        }
        OutputFormat::Json => println!("{}", output::render_json(&infos)?),
    }

    Ok(())
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<String>> {
    if files.is_empty() {
        let mut blob = String::new();
        std::io::stdin().read_to_string(&mut blob)?;
        return Ok(vec![blob]);
    }

    files
        .iter()
        .map(|path| Ok(std::fs::read_to_string(path)?))
        .collect()
}
