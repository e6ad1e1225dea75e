//! Filter command - keep rows matching a leap year condition.

use leapline::LeapTable;
use leapline::analysis::{drop_duplicates, drop_missing};
use tracing::info;

use crate::cli::{FilterMode, OutputArgs, SourceArgs};

use super::{emit_table, load_input};

/// Which end of the filtered table to keep.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowWindow {
    pub limit: Option<usize>,
    pub tail: Option<usize>,
}

impl RowWindow {
    fn apply(&self, table: LeapTable) -> LeapTable {
        match (self.limit, self.tail) {
            (Some(n), _) => table.head(n),
            (None, Some(n)) => table.tail(n),
            (None, None) => table,
        }
    }
}

/// Row cleaning applied before the filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaning {
    pub drop_missing: bool,
    pub drop_duplicates: bool,
}

impl Cleaning {
    fn apply(&self, mut table: LeapTable) -> LeapTable {
        if self.drop_missing {
            table = drop_missing(&table);
        }
        if self.drop_duplicates {
            table = drop_duplicates(&table);
        }
        table
    }
}

pub fn run(
    source: SourceArgs,
    mode: FilterMode,
    year: Option<i64>,
    window: RowWindow,
    cleaning: Cleaning,
    output: OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = mode.to_filter(year)?;
    let loaded = load_input(&source)?;
    let total = loaded.table.len();

    let cleaned = cleaning.apply(loaded.table);
    let table = filter.apply(&cleaned);
    info!(
        mode = %mode,
        cleaned = cleaned.len(),
        kept = table.len(),
        total,
        "applied filter"
    );

    emit_table(&window.apply(table), &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leapline::{RawTable, generate_sample, normalize};

    #[test]
    fn test_row_window() {
        let table = generate_sample(1900, 1909);

        let head = RowWindow { limit: Some(3), tail: None }.apply(table.clone());
        assert_eq!(head.years().collect::<Vec<_>>(), vec![1900, 1901, 1902]);

        let tail = RowWindow { limit: None, tail: Some(2) }.apply(table.clone());
        assert_eq!(tail.years().collect::<Vec<_>>(), vec![1908, 1909]);

        assert_eq!(RowWindow::default().apply(table).len(), 10);
    }

    #[test]
    fn test_cleaning() {
        let raw = RawTable::from_json(
            r#"[{"Year": 2000}, {"Year": 2000}, {"Year": "bad"}, {"Year": 2004}]"#,
        )
        .unwrap();
        let table = normalize(&raw).unwrap();

        let cleaning = Cleaning {
            drop_missing: true,
            drop_duplicates: true,
        };
        assert_eq!(
            cleaning.apply(table.clone()).years().collect::<Vec<_>>(),
            vec![2000, 2004]
        );
        assert_eq!(Cleaning::default().apply(table).len(), 4);
    }
}
