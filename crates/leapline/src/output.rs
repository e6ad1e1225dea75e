//! Writing canonical tables as CSV, TSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{LeaplineError, Result};
use crate::table::LeapTable;

/// Export format for canonical tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use tsv, csv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes a [`LeapTable`] in a chosen format.
pub struct TableWriter {
    format: OutputFormat,
}

impl TableWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write the table to any writer.
    pub fn write<W: Write>(&self, table: &LeapTable, writer: W) -> Result<()> {
        match self.format {
            OutputFormat::Tsv => write_delimited(table, writer, b'\t'),
            OutputFormat::Csv => write_delimited(table, writer, b','),
            OutputFormat::Json => {
                let mut writer = writer;
                serde_json::to_writer_pretty(&mut writer, &table.to_records())?;
                writeln!(writer).map_err(serde_json::Error::io)?;
                Ok(())
            }
        }
    }

    /// Write the table to a file, replacing it if present.
    pub fn write_path(&self, table: &LeapTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| LeaplineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write(table, &mut writer)?;
        writer.flush().map_err(|source| LeaplineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), rows = table.len(), format = %self.format, "wrote table");
        Ok(())
    }

    /// Render the table into a string.
    pub fn to_string(&self, table: &LeapTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(table, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn write_delimited<W: Write>(table: &LeapTable, writer: W, delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(table.column_names())?;
    for record in table {
        let cells: Vec<String> = record
            .cells()
            .iter()
            .map(|v| v.render().unwrap_or_default())
            .collect();
        csv_writer.write_record(&cells)?;
    }
    csv_writer.flush().map_err(|e| LeaplineError::Csv(e.into()))?;
    Ok(())
}
