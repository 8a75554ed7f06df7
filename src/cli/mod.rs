pub mod output;
pub mod scan;
pub mod stats;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use clap::{CommandFactory, Parser};
use scan::{process_scan_command, resolve_scan_path};
use stats::process_stats_command;
use tracing::level_filters::LevelFilter;

use crate::{
    analysis::DEFAULT_TOP_DAYS,
    storage::{entities::Scope, stats_storage::StatsStorageImpl},
    utils::{
        clock::{Clock, DefaultClock, FixedClock},
        dir::{home_dir, resolve_data_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

const LONG_ABOUT: &str = "\
Verkounter - A fast word counting tool that tracks writing progress across multiple projects
by scanning directories for .verkount marker files and processing Markdown content.

Stats are stored in $XDG_DATA_HOME/verkounter (~/.local/share/verkounter by default):
  - verkount_stats.yaml      Main statistics file with daily word counts
  - series/*_stats.yaml      Per-series statistics files";

#[derive(Parser, Debug)]
#[command(name = "verkounter", version)]
#[command(about = "Tracks writing progress across projects", long_about = LONG_ABOUT)]
struct Args {
    #[arg(
        conflicts_with = "stats",
        help = "Directory to scan. Defaults to ~/Documents. Examples: . (current dir), ~/Writing, /path/to/projects"
    )]
    directory: Option<String>,
    #[arg(long, help = "Display writing statistics")]
    stats: bool,
    #[arg(
        long,
        requires = "stats",
        help = "Display statistics of a single series instead of all projects"
    )]
    series: Option<String>,
    #[arg(
        long = "as-of",
        requires = "stats",
        help = "Day to calculate statistics for. Examples are \"yesterday\", \"15/03/2025\""
    )]
    as_of: Option<String>,
    #[arg(
        long = "top",
        default_value_t = DEFAULT_TOP_DAYS,
        help = "Amount of most productive days to show"
    )]
    top_days: usize,
    #[arg(
        long,
        env = "VERKOUNTER_DATA_DIR",
        help = "Statistics directory. By default tries to save into $XDG_DATA_HOME/verkounter or $HOME/.local/share/verkounter"
    )]
    dir: Option<PathBuf>,
    #[arg(long, help = "Print logs to the console")]
    log: bool,
    #[arg(long = "log-filter", help = "Log level, overrides RUST_LOG")]
    log_filter: Option<LevelFilter>,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let data_dir = resolve_data_dir(args.dir)?;

    let logging_level = args
        .log_filter
        .or_else(|| args.log.then_some(LevelFilter::DEBUG));
    enable_logging(CLI_PREFIX, &data_dir.join("logs"), logging_level, args.log)?;

    let storage = StatsStorageImpl::new(data_dir)?;

    if args.stats {
        let clock: Box<dyn Clock> = match args.as_of {
            Some(v) => Box::new(FixedClock(parse_day(&v)?)),
            None => Box::new(DefaultClock),
        };
        let scope = args.series.map_or(Scope::Global, Scope::Series);
        return process_stats_command(&storage, &scope, clock.as_ref(), args.top_days);
    }

    let scan_path = resolve_scan_path(args.directory.as_deref())?;
    let legacy_dir = home_dir().ok().map(|v| v.join("Documents"));
    process_scan_command(&storage, &scan_path, legacy_dir.as_deref(), &DefaultClock).await
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    match parse_date_string(value, Local::now(), Dialect::Uk) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {value}: {e}"),
            )
            .into()),
    }
}
