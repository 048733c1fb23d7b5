use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use urania::{
    AspectConfig, DailyPipeline, PositionProvider, PositionTable, RangeReport,
    SwissEphemerisAdapter,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// First day to analyze, YYYY-MM-DD (default: today in UTC).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Number of consecutive days to analyze.
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// TOML file overriding aspect definitions, body weights or the body list.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON position table to read instead of querying Swiss Ephemeris.
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Swiss Ephemeris data directory (otherwise SWISS_EPHEMERIS_PATH or /usr/local/share/swisseph).
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,

    /// Output file for the weekly report.
    #[arg(long, default_value = "weekly_aspects.json")]
    out: PathBuf,

    /// Max days fetched and analyzed at once (default: available cores).
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Also print the report to stdout.
    #[arg(long)]
    print: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AspectConfig> {
    match path {
        Some(path) => AspectConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AspectConfig::default()),
    }
}

fn open_provider(args: &Args) -> anyhow::Result<Arc<dyn PositionProvider>> {
    if let Some(path) = &args.positions {
        let table = PositionTable::from_path(path)
            .with_context(|| format!("Failed to load positions from {}", path.display()))?;
        return Ok(Arc::new(table));
    }
    let adapter = SwissEphemerisAdapter::new(args.ephemeris_path.clone())
        .context("Failed to initialise Swiss Ephemeris (pass --positions to use a table)")?;
    Ok(Arc::new(adapter))
}

fn write_report(report: &RangeReport, out: &Path) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(out, &json).with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(json)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let provider = open_provider(&args)?;
    let start = args.start.unwrap_or_else(|| Utc::now().date_naive());

    let mut pipeline = DailyPipeline::new(Arc::new(config));
    if let Some(max) = args.max_concurrency {
        pipeline = pipeline.with_max_concurrency(max);
    }

    let report = pipeline
        .run_range(provider, start, args.days)
        .await
        .with_context(|| format!("Failed to analyze {} days from {}", args.days, start))?;

    let json = write_report(&report, &args.out)?;
    log::info!(
        "Wrote {} days to {}",
        report.weekly_aspects.len(),
        args.out.display()
    );
    if args.print {
        println!("{}", json);
    }
    Ok(())
}
