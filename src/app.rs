//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves configuration and installs the logger
//! - loads the dataset once
//! - hands it to the TUI or prints a report

use clap::Parser;

use crate::cli::{Command, ReportArgs, TuiArgs};
use crate::config::DashboardConfig;
use crate::domain::DateRange;
use crate::error::AppError;
use crate::logging::{self, LogTarget};

pub mod pipeline;

pub use pipeline::{Analysis, DataContext, compute};

/// Entry point for the `bikes` binary.
pub fn run() -> Result<(), AppError> {
    // `bikes` and `bikes -f day.csv` behave like `bikes tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = DashboardConfig::resolve(&args.common);
    logging::init(LogTarget::File(&config.log_dir))?;

    // The screen belongs to the TUI, so failures also go to the log file.
    let result = DataContext::load(&config.data_path).and_then(|ctx| crate::tui::run(ctx, args.mode));
    if let Err(err) = &result {
        log::error!("{err}");
    }
    result
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = DashboardConfig::resolve(&args.common);
    logging::init(LogTarget::Stderr)?;

    let ctx = DataContext::load(&config.data_path)?;
    let range = report_range(&ctx, &args);
    let analysis = compute(&ctx, args.mode, range);

    println!(
        "{}",
        crate::report::format_analysis(&ctx, &analysis, args.width, args.height)
    );
    Ok(())
}

/// Missing bounds default to the dataset's own bounds. Explicit bounds are
/// used as given; a range outside the data just selects nothing.
fn report_range(ctx: &DataContext, args: &ReportArgs) -> DateRange {
    DateRange::new(
        args.from.unwrap_or(ctx.min_date()),
        args.to.unwrap_or(ctx.max_date()),
    )
}

/// `bikes` and `bikes <flags>` run the dashboard; help, version and explicit
/// subcommands pass through.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let implicit_tui = match argv.get(1).map(String::as_str) {
        None => !argv.is_empty(),
        Some("-h" | "--help" | "-V" | "--version" | "help" | "tui" | "report") => false,
        Some(first) => first.starts_with('-'),
    };
    if implicit_tui {
        argv.insert(1, "tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["bikes"])), argv(&["bikes", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["bikes", "-f", "day.csv"])),
            argv(&["bikes", "tui", "-f", "day.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for case in [&["bikes", "report", "-m", "weather"][..], &["bikes", "--help"][..], &["bikes", "tui"][..]] {
            assert_eq!(rewrite_args(argv(case)), argv(case));
        }
    }

    #[test]
    fn report_range_fills_missing_bounds_from_data() {
        use crate::analysis::fixtures::{date, two_rows};

        let ctx = DataContext::from_records(two_rows()).unwrap();
        let cli = crate::cli::Cli::parse_from(["bikes", "report", "--to", "2011-03-01"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        let range = report_range(&ctx, &args);
        assert_eq!(range, DateRange::new(date("2011-01-01"), date("2011-03-01")));
    }
}
