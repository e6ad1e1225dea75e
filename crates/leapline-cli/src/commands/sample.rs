//! Sample command - generate the built-in year table.

use leapline::SampleRange;

use crate::cli::OutputArgs;

use super::emit_table;

pub fn run(start: i64, end: i64, output: OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let range = SampleRange::new(start, end);
    range.validate()?;

    let table = range.generate();
    emit_table(&table, &output)
}
