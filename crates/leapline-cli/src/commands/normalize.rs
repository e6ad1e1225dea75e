//! Normalize command - derive the canonical columns for a data file.

use colored::Colorize;
use leapline::DataOrigin;

use crate::cli::{OutputArgs, SourceArgs};

use super::{describe_origin, emit_table, load_input};

pub fn run(source: SourceArgs, output: OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_input(&source)?;

    if let DataOrigin::Sample { .. } = loaded.origin {
        eprintln!(
            "{} no file given, using {}",
            "Note:".yellow().bold(),
            describe_origin(&loaded.origin)
        );
    }

    emit_table(&loaded.table, &output)
}
