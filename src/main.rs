//! CLI entry point for the fantasy cricket pricer.
//!
//! Provides subcommands for running the full scrape, score, price and
//! publish pipeline, inspecting a single statistics table, and
//! re-publishing an existing artifact.

mod infra;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cricket_fantasy_pricer::aggregate::compile::compile_player_stats;
use cricket_fantasy_pricer::config::{GistConfig, SiteConfig};
use cricket_fantasy_pricer::fetch::{BasicClient, fetch_text};
use cricket_fantasy_pricer::normalize::normalize;
use cricket_fantasy_pricer::output::{to_records, write_csv, write_json};
use cricket_fantasy_pricer::parser::parse_stats_page;
use cricket_fantasy_pricer::publish::{GistPublisher, Publisher};
use cricket_fantasy_pricer::scoring::score;
use cricket_fantasy_pricer::source::{Category, Season};
use infra::playcricket::PlayCricketSource;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cricket_fantasy_pricer")]
#[command(about = "Compiles fantasy cricket player points and prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: scrape both seasons, price, write, publish
    Run {
        /// Path of the JSON artifact
        #[arg(short, long, default_value = "PlayerFullStats.json")]
        output: String,

        /// Also write a CSV copy of the artifact here
        #[arg(long)]
        csv: Option<String>,

        /// Write the artifact but do not publish it
        #[arg(long, default_value_t = false)]
        skip_publish: bool,
    },
    /// Parse one statistics table from a file or URL and print scored rows
    Inspect {
        /// Path to a saved HTML page or a URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Category whose formula to apply
        #[arg(short, long, value_enum)]
        category: Category,

        /// Season label attached to the rows
        #[arg(short, long, value_enum, default_value_t = Season::Current)]
        season: Season,
    },
    /// Publish an existing local artifact to the configured gist
    Publish {
        /// Path of the JSON artifact to publish
        #[arg(default_value = "PlayerFullStats.json")]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/cricket_fantasy_pricer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cricket_fantasy_pricer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            output,
            csv,
            skip_publish,
        } => {
            run_pipeline(&output, csv.as_deref(), skip_publish).await?;
        }
        Commands::Inspect {
            source,
            category,
            season,
        } => {
            let html = fetcher(&source).await?;
            let page = parse_stats_page(&html)?;
            let records: Vec<_> = normalize(category, season, page.rows)
                .into_iter()
                .map(score)
                .collect();

            info!(
                records = records.len(),
                has_next = page.has_next,
                "Table parsed"
            );
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Publish { file } => {
            let gist = GistConfig::from_env()
                .context("GIST_ID and GIST_TOKEN must be set to publish")?;
            let document = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read artifact {file}"))?;

            GistPublisher::new(&gist)?.publish(&document).await?;
        }
    }

    Ok(())
}

/// The full pipeline: sign in, compile both seasons, write the artifact,
/// publish it. A publish failure still leaves the local artifact complete.
#[tracing::instrument(skip(csv, skip_publish), fields(output))]
async fn run_pipeline(output: &str, csv: Option<&str>, skip_publish: bool) -> Result<()> {
    let site = SiteConfig::from_env()?;
    let gist = GistConfig::from_env();

    let source = PlayCricketSource::sign_in(&site).await?;
    let players = compile_player_stats(&source).await?;

    let records = to_records(players);
    let document = write_json(output, &records)?;

    if let Some(csv_path) = csv {
        write_csv(csv_path, &records)?;
    }

    if skip_publish {
        info!("Publishing skipped");
        return Ok(());
    }

    match gist {
        Some(gist) => {
            let publisher = GistPublisher::new(&gist)?;
            publisher
                .publish(&document)
                .await
                .context("pipeline completed and artifact written, but publishing failed")?;
        }
        None => warn!("GIST_ID/GIST_TOKEN not set, skipping publish"),
    }

    Ok(())
}

/// Loads table HTML from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn fetcher(source: &str) -> Result<String> {
    if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_text(&client, source).await
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}
