//! Group command - aggregate leap years by reason or year group.

use colored::Colorize;
use leapline::analysis::{GroupKey, GroupSummary, group_by};
use serde::Serialize;

use crate::cli::SourceArgs;

use super::{describe_origin, load_input};

#[derive(Serialize)]
struct GroupReport<'a> {
    source: String,
    key: GroupKey,
    groups: &'a [GroupSummary],
}

pub fn run(
    source: SourceArgs,
    by: GroupKey,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_input(&source)?;
    let groups = group_by(&loaded.table, by);

    if json_output {
        let report = GroupReport {
            source: describe_origin(&loaded.origin),
            key: by,
            groups: &groups,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Grouped by".cyan().bold(),
        by.to_string().white().bold(),
        format!("({})", describe_origin(&loaded.origin)).dimmed()
    );
    println!();

    if groups.is_empty() {
        println!("{}", "No rows to group.".yellow());
        return Ok(());
    }

    let width = groups.iter().map(|g| g.key.chars().count()).max().unwrap_or(0);
    println!(
        "  {:<width$}  {:>6}  {:>6}  {:>6}  {}",
        "Group",
        "Years",
        "Leap",
        "Ratio",
        "Span",
        width = width
    );

    for group in &groups {
        let span = match (group.earliest_year, group.latest_year) {
            (Some(a), Some(b)) => format!("{}-{}", a, b),
            _ => "-".to_string(),
        };
        let padding = width.saturating_sub(group.key.chars().count());
        println!(
            "  {}{}  {:>6}  {:>6}  {:>5.1}%  {}",
            group.key.white(),
            " ".repeat(padding),
            group.total_years,
            group.total_leap_years.to_string().green(),
            group.leap_year_ratio * 100.0,
            span.dimmed()
        );
    }

    Ok(())
}
