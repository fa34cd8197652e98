//! Command-line parsing for the bike rental dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::AnalysisMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bikes", version, about = "Bike rental data analysis dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(TuiArgs),
    /// Run one analysis and print it as text.
    Report(ReportArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct CommonArgs {
    /// Daily rentals CSV (defaults to $BIKES_DATA, then `day.csv`).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Directory for log files in TUI mode (defaults to $BIKES_LOG_DIR, then `logs`).
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Analysis shown on startup.
    #[arg(short = 'm', long, value_enum, default_value_t = AnalysisMode::Monthly)]
    pub mode: AnalysisMode,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Which analysis to run.
    #[arg(short = 'm', long, value_enum, default_value_t = AnalysisMode::Monthly)]
    pub mode: AnalysisMode,

    /// First day of the range, inclusive (defaults to the earliest date in the data).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_cli_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the range, inclusive (defaults to the latest date in the data).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_cli_date)]
    pub to: Option<NaiveDate>,

    /// Bar length (columns) of text bar charts.
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Height (rows) of text line charts.
    #[arg(long, default_value_t = 12)]
    pub height: usize,
}

fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    crate::enrich::parse_date(s).ok_or_else(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_parse() {
        let cli = Cli::parse_from([
            "bikes", "report", "--mode", "day-type", "--from", "2011-02-01", "--to", "2011-03-01", "-f", "x.csv",
        ]);
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(args.mode, AnalysisMode::DayType);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2011, 2, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2011, 3, 1));
        assert_eq!(args.common.data, Some(PathBuf::from("x.csv")));
    }

    #[test]
    fn bad_date_is_rejected_by_parser() {
        let res = Cli::try_parse_from(["bikes", "report", "--from", "yesterday"]);
        assert!(res.is_err());
    }
}
