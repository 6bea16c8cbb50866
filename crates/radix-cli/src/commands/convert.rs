//! `radix convert`: one conversion, printed and forgotten.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use radix_core::config::RadixConfig;
use radix_core::conversion::{ConversionOutcome, ConversionRecord, Converter};

fn convert_once(config: &RadixConfig, value: &str, from: u32, to: u32) -> ConversionRecord {
    let outcome = Converter::new(config.precision).convert(value, from, to);
    ConversionRecord::new(value, from, to, outcome)
}

/// Prints the result (or the error) and exits 1 on failure.
pub fn run(config: &RadixConfig, value: &str, from: u32, to: u32, json: bool) -> Result<ExitCode> {
    let record = convert_once(config, value, from, to);
    tracing::debug!(value, from, to, success = record.is_success(), "One-shot conversion");

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        match record.outcome() {
            ConversionOutcome::Converted { result } => println!("{}", result),
            ConversionOutcome::Failed { error_message } => {
                eprintln!("{}", format!("Error: {}", error_message).red())
            }
        }
    }

    Ok(if record.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
