//! Global temperature heatmap.
//!
//! Fetches the monthly variance dataset and renders it as a calendar heatmap
//! with a color legend, either to files or over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use heatmap::config::load_chart_config;
use heatmap::loader::{select_source, DEFAULT_SOURCE_URL};
use heatmap::render::{write_outputs, OutputFormat, Pointer, RenderOptions};
use heatmap::server::start_server;
use heatmap::state::AppState;
use heatmap_common::HeatmapError;
use renderer::Heatmap;

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Monthly global temperature variance heatmap")]
struct Cli {
    /// Log level
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text", env = "HEATMAP_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart and legend to files
    Render(RenderArgs),
    /// Serve the chart over HTTP
    Serve(ServeArgs),
}

/// Where the dataset comes from and how to lay it out.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Dataset URL
    #[arg(long, default_value = DEFAULT_SOURCE_URL, env = "HEATMAP_SOURCE_URL")]
    source_url: String,

    /// Read the dataset from a local file instead of the URL
    #[arg(long)]
    input: Option<PathBuf>,

    /// Request timeout in seconds (none by default)
    #[arg(long, env = "HEATMAP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// YAML chart configuration
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "svg")]
    format: OutputFormat,

    /// Render the tooltip for a pointer at X,Y
    #[arg(long, value_name = "X,Y")]
    hover: Option<Pointer>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "HEATMAP_LISTEN_ADDR")]
    listen: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Load the dataset and lay out the chart. Any failure here aborts before
/// output is produced.
async fn build_heatmap(args: &SourceArgs) -> Result<Heatmap> {
    let config = load_chart_config(args.config.as_deref())?;
    let source = select_source(
        args.input.as_deref(),
        Some(args.source_url.as_str()),
        args.timeout_secs.map(Duration::from_secs),
    )?;

    info!(source = %source.describe(), "Loading dataset");
    let dataset = source
        .load()
        .await
        .with_context(|| format!("Failed to load dataset from {}", source.describe()))?;

    let heatmap = Heatmap::build(&dataset, &config).context("Failed to lay out heatmap")?;
    info!(
        cells = heatmap.cells().len(),
        skipped = heatmap.skipped(),
        "Heatmap ready"
    );
    Ok(heatmap)
}

async fn run_render(args: RenderArgs) -> Result<()> {
    let heatmap = build_heatmap(&args.source).await?;
    let options = RenderOptions {
        output_dir: args.output_dir,
        format: args.format,
        hover: args.hover,
    };
    let written = write_outputs(&heatmap, &options)
        .await
        .context("Failed to write output")?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    let heatmap = build_heatmap(&args.source).await?;
    let state = AppState::from_heatmap(heatmap).context("Failed to prepare server state")?;

    start_server(Arc::new(state), addr).await
}

/// Whether the failure came from fetching or parsing the dataset.
fn is_load_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<HeatmapError>()
            .is_some_and(HeatmapError::is_load_error)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    let result = match cli.command {
        Command::Render(args) => run_render(args).await,
        Command::Serve(args) => run_serve(args).await,
    };

    if let Err(e) = &result {
        let error = format!("{:#}", e);
        if is_load_failure(e) {
            error!(error = %error, "Dataset could not be loaded");
        } else {
            error!(error = %error, "Heatmap failed");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_through_context() {
        let err = anyhow::Error::new(HeatmapError::HttpStatus {
            status: 404,
            url: "http://localhost/data.json".to_string(),
        })
        .context("Failed to load dataset");
        assert!(is_load_failure(&err));
    }

    #[test]
    fn test_render_failure_is_not_load_failure() {
        let err = anyhow::Error::new(HeatmapError::Render("bad".to_string()))
            .context("Failed to write output");
        assert!(!is_load_failure(&err));
        assert!(!is_load_failure(&anyhow::anyhow!("Invalid listen address")));
    }
}
