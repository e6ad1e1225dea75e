//! Check command - classify a single year.

use colored::Colorize;
use leapline::check_year;

pub fn run(year: i64) -> Result<(), Box<dyn std::error::Error>> {
    let verdict = check_year(year);

    if verdict.is_leap {
        println!("{} {}", "✓".green().bold(), verdict.to_string().green());
    } else {
        println!("{} {}", "✗".red().bold(), verdict.to_string().red());
    }

    Ok(())
}
