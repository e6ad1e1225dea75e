//! Leapline CLI - leap year classification over tabular data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format);
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Sample { start, end, output } => commands::sample::run(start, end, output),

        Commands::Normalize { source, output } => commands::normalize::run(source, output),

        Commands::Filter {
            source,
            mode,
            year,
            limit,
            tail,
            drop_missing,
            drop_duplicates,
            output,
        } => commands::filter::run(
            source,
            mode,
            year,
            commands::filter::RowWindow { limit, tail },
            commands::filter::Cleaning {
                drop_missing,
                drop_duplicates,
            },
            output,
        ),

        Commands::Group { source, by, json } => commands::group::run(source, by, json),

        Commands::Summary { source, json } => commands::summary::run(source, json),

        Commands::Check { year } => commands::check::run(year),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
