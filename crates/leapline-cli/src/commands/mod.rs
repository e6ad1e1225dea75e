//! CLI command implementations.

pub mod check;
pub mod filter;
pub mod group;
pub mod normalize;
pub mod sample;
pub mod summary;

use std::io;

use colored::Colorize;
use leapline::{
    DataOrigin, LeapTable, Leapline, LoadResult, NormalizeOptions, ReasonPolicy, SampleRange,
    TableWriter,
};

use crate::cli::{OutputArgs, SourceArgs};

/// Load the table a data command works on: the given file, or the sample.
pub fn load_input(source: &SourceArgs) -> Result<LoadResult, Box<dyn std::error::Error>> {
    let range = SampleRange::new(source.start, source.end);
    if source.file.is_none() {
        range.validate()?;
    }

    let reason_policy = if source.strict_reasons {
        ReasonPolicy::Strict
    } else {
        ReasonPolicy::Trust
    };

    let pipeline = Leapline::new()
        .with_sample_range(range)
        .with_normalize_options(NormalizeOptions { reason_policy });

    Ok(pipeline.load_or_sample(source.file.as_deref())?)
}

/// One-line description of where a table came from, for human output.
pub fn describe_origin(origin: &DataOrigin) -> String {
    match origin {
        DataOrigin::File(meta) => format!("{} ({}, {} rows)", meta.file, meta.format, meta.row_count),
        DataOrigin::Sample { start, end } => format!("sample years {}-{}", start, end),
    }
}

/// Write a table to the output path, or stdout when none is given.
pub fn emit_table(table: &LeapTable, output: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let writer = TableWriter::new(output.format);

    match &output.output {
        Some(path) => {
            writer.write_path(table, path)?;
            eprintln!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                table.len(),
                path.display().to_string().white()
            );
        }
        None => writer.write(table, io::stdout().lock())?,
    }

    Ok(())
}
