//! CLI entry point for the mobility dashboard data layer.
//!
//! Loads the vehicle survey dataset once and prints or exports the cached
//! row summary, the modal split and the per-group vehicle usage.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mobility_dashboard::{
    categories::GroupScheme,
    config::Config,
    fetch::{DataSource, TextSource},
    output::{Report, print_json, write_csv, write_json},
    store::DataStore,
};
use mobility_dashboard::aggregators::select_usage;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "mobility_dashboard")]
#[command(about = "Aggregates commuting survey data for the mobility dashboard", long_about = None)]
struct Cli {
    /// CSV file path or URL (overrides VEHICLE_DATA_SOURCE)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Demographic grouping for usage counts (overrides GROUP_SCHEME)
    #[arg(long, global = true, value_enum)]
    group_scheme: Option<GroupScheme>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the loaded rows
    Rows {
        /// Also print the first N rows
        #[arg(short, long, default_value_t = 0)]
        limit: usize,
    },
    /// Count primary vehicles per time period
    ModalSplit {
        /// Only show this time period
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Count distinct participants per time period, group and vehicle
    UsageByGroup {
        /// Only show this time period
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Write all views as JSON and CSV files
    Export {
        /// Directory to write into
        #[arg(short, long, default_value = "out")]
        output_dir: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(scheme) = cli.group_scheme {
        config.group_scheme = scheme;
    }

    // Logging setup: colored stderr + JSON rolling log file
    let (log_dir, log_file_name) = config.log_target();

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let source = DataSource::from_location(&config.source)?;
    info!(source = %source.describe(), scheme = %config.group_scheme, "Using dataset");
    let store = DataStore::new(source, config.group_scheme);

    match cli.command {
        Commands::Rows { limit } => {
            let summary = store.summary().await?;
            print_json(&summary)?;
            info!(
                main_vehicle_pct = %format!("{:.1}%", summary.main_vehicle_pct()),
                distance_pct = %format!("{:.1}%", summary.distance_pct()),
                "Row coverage"
            );

            if limit > 0 {
                let rows = store.load_rows().await?;
                let head: Vec<_> = rows.iter().take(limit).collect();
                print_json(&head)?;
            }
        }
        Commands::ModalSplit { period } => {
            let split = store.modal_split().await?;
            if let Some(want) = period.as_deref() {
                if !split.has_period(want) {
                    warn!(period = want, available = ?split.periods().collect::<Vec<_>>(), "No primary vehicles for period");
                }
            }

            for p in split.periods() {
                if period.as_deref().is_some_and(|want| want != p) {
                    continue;
                }

                let total = split.total(p);
                info!(period = p, total, "Modal split");
                for row in split.period_sorted(p) {
                    info!(
                        period = p,
                        vehicle = %row.vehicle_label,
                        count = row.count,
                        share = %format!("{:.1}%", row.share(total)),
                        "Vehicle"
                    );
                }
            }
        }
        Commands::UsageByGroup { period } => {
            let usage = store.usage_by_group().await?;

            let selected = select_usage(&usage, period.as_deref());
            if selected.is_empty() {
                if let Some(want) = period.as_deref() {
                    warn!(period = want, "No group usage for period");
                }
            }

            for u in &selected {
                info!(
                    period = %u.semester_time,
                    group = %u.group_label,
                    vehicle = %u.vehicle_label,
                    people = u.people,
                    "Usage"
                );
            }
            info!(entries = selected.len(), "Group usage listed");
        }
        Commands::Export { output_dir } => {
            export(&store, &output_dir).await?;
        }
    }

    Ok(())
}

/// Writes the summary, modal split and group usage as JSON reports, plus
/// flat CSV copies of both aggregates.
#[tracing::instrument(skip(store))]
async fn export<S: TextSource>(store: &DataStore<S>, output_dir: &str) -> Result<()> {
    let dir = Path::new(output_dir);
    let source = store.source().describe();
    let scheme = store.scheme();

    let summary = store.summary().await?;
    write_json(
        &dir.join("summary.json"),
        &Report::new(source.as_str(), scheme, &summary),
    )?;

    let split = store.modal_split().await?;
    write_json(
        &dir.join("modal_split.json"),
        &Report::new(source.as_str(), scheme, &*split),
    )?;
    let split_rows = write_csv(&dir.join("modal_split.csv"), split.flatten())?;

    let usage = store.usage_by_group().await?;
    write_json(
        &dir.join("usage_by_group.json"),
        &Report::new(source.as_str(), scheme, &*usage),
    )?;
    let usage_rows = write_csv(&dir.join("usage_by_group.csv"), usage.iter())?;

    info!(output_dir, split_rows, usage_rows, "Export complete");
    Ok(())
}
