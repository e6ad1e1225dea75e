//! Summary command - profile a table and show chart-ready counts.

use colored::Colorize;
use leapline::LeapTable;
use leapline::analysis::{
    LeapHistogram, LeapPoint, NumericSummary, ReasonEncoding, TableProfile, leap_code_series,
    leap_histogram, profile, reason_codes, reason_counts,
};
use serde::Serialize;

use crate::cli::SourceArgs;

use super::{describe_origin, load_input};

#[derive(Serialize)]
struct SummaryReport {
    source: String,
    profile: TableProfile,
    reasons: Vec<ReasonCount>,
    histogram: LeapHistogram,
    /// Categorical code per row for `Leap_Reason`.
    encoding: ReasonEncoding,
    /// (Year, Leap_Code) points for line and scatter plots.
    series: Vec<LeapPoint>,
}

#[derive(Serialize)]
struct ReasonCount {
    reason: String,
    count: usize,
}

pub fn run(source: SourceArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_input(&source)?;
    let report = build_report(describe_origin(&loaded.origin), &loaded.table);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_report(source: String, table: &LeapTable) -> SummaryReport {
    SummaryReport {
        source,
        profile: profile(table),
        reasons: reason_counts(table)
            .into_iter()
            .map(|(reason, count)| ReasonCount { reason, count })
            .collect(),
        histogram: leap_histogram(table),
        encoding: reason_codes(table),
        series: leap_code_series(table),
    }
}

fn print_report(report: &SummaryReport) {
    let profile = &report.profile;

    println!("{} {}", "Summary of".cyan().bold(), report.source.white());
    println!();

    println!("{}", "Shape:".yellow().bold());
    println!("  Rows:           {}", profile.rows.to_string().white());
    println!("  Columns:        {}", profile.columns.to_string().white());
    println!("  Leap years:     {}", profile.leap_years.to_string().green());
    if profile.duplicate_rows > 0 {
        println!(
            "  Duplicate rows: {}",
            profile.duplicate_rows.to_string().yellow()
        );
    }
    println!();

    println!("{}", "Missing values:".yellow().bold());
    for (column, count) in &profile.missing {
        let count = if *count == 0 {
            count.to_string().green()
        } else {
            count.to_string().red()
        };
        println!("  {:<16} {}", column, count);
    }
    println!();

    println!("{}", "Numeric columns:".yellow().bold());
    println!(
        "  {:<16} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Column", "Count", "Mean", "Median", "Min", "Max", "Std"
    );
    for summary in &profile.numeric {
        print_numeric(summary);
    }
    println!();

    println!("{}", "Leap reasons:".yellow().bold());
    for entry in &report.reasons {
        let code = report
            .encoding
            .categories
            .iter()
            .position(|c| *c == entry.reason)
            .map_or_else(|| "-".to_string(), |i| i.to_string());
        println!(
            "  [{}] {:<30} {}",
            code.dimmed(),
            entry.reason,
            entry.count.to_string().white()
        );
    }
    if let (Some(first), Some(last)) = (report.series.first(), report.series.last()) {
        println!(
            "  {} points from {} to {}",
            report.series.len(),
            first.year,
            last.year
        );
    }
    println!();

    let histogram = &report.histogram;
    let total = histogram.leap + histogram.non_leap;
    let bar_width = 30;
    let filled = if total == 0 {
        0
    } else {
        (histogram.leap as f64 / total as f64 * bar_width as f64).round() as usize
    };
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
    println!(
        "Leap share: {} {}/{}",
        bar.cyan(),
        histogram.leap.to_string().green().bold(),
        total
    );
}

fn print_numeric(summary: &NumericSummary) {
    let cell = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v));
    println!(
        "  {:<16} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10}",
        summary.column,
        summary.count,
        cell(summary.mean),
        cell(summary.median),
        cell(summary.min),
        cell(summary.max),
        cell(summary.std)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use leapline::generate_sample;

    #[test]
    fn test_report_carries_encoding_and_series() {
        let table = generate_sample(1999, 2001);
        let report = build_report("sample".to_string(), &table);

        assert_eq!(report.encoding.codes.len(), 3);
        assert_eq!(
            report.encoding.categories,
            vec!["Divisible by 400", "Not divisible by 4"]
        );
        assert_eq!(report.encoding.codes, vec![1, 0, 1]);
        assert_eq!(
            report.series.iter().map(|p| p.leap_code).collect::<Vec<_>>(),
            vec![0, 1, 0]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["encoding"]["categories"].is_array());
        assert_eq!(json["series"][1]["year"], 2000);
    }
}
