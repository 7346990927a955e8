//! Command-line probe for the vino visualization backend.
//!
//! Runs one full plot request — info fetch, data fetches, trace assembly —
//! against a live backend and writes the resulting traces and layout as JSON
//! to stdout. Useful for checking a deployment without a browser.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use plot_client::events::EventBus;
use plot_client::layout::{axis_range_patch, grid_tick_patch, Layout};
use plot_client::reconciler::{default_ppa, PlotPlan};
use plot_client::renderer::{NoopIndicator, PlotConfig, RelayoutPatch, Renderer};
use plot_client::session::PlotSession;
use plot_client::source::{DataSource, HttpDataSource};
use plot_client::trace::Trace;
use plot_client::MergedInfo;
use vino_common::{Format, Plane, Ppa, RequestedState, VinoId, VinoResult};

#[derive(Parser, Debug)]
#[command(name = "vz-probe")]
#[command(about = "Run one plot request against a vino backend")]
struct Args {
    /// Dataset id to plot
    #[arg(short, long)]
    id: u32,

    /// Backend base URL
    #[arg(long, env = "VINO_API_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Conversion format (bars, polygon, regulargrid, kdtree); omit for native
    #[arg(short, long)]
    format: Option<Format>,

    /// Points per axis, scalar or comma-separated per axis
    #[arg(short, long)]
    ppa: Option<Ppa>,

    /// Fetch the outline-shapes overlay as well
    #[arg(long)]
    shapes: bool,

    /// Color by distance field (regulargrid only)
    #[arg(long)]
    distance: bool,

    /// Cut a section on this plane, e.g. "0,1"
    #[arg(long)]
    plane: Option<String>,

    /// Section coordinates on the off-plane axes, e.g. "2,3"
    #[arg(long)]
    at: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Renderer that dumps traces and layout as one JSON document.
struct JsonRenderer {
    out: io::Stdout,
}

impl Renderer for JsonRenderer {
    fn react(&mut self, traces: &[Trace], layout: &Layout, config: &PlotConfig) -> VinoResult<()> {
        let doc = json!({
            "traces": traces,
            "layout": layout,
            "config": config,
        });
        writeln!(self.out, "{}", serde_json::to_string_pretty(&doc).unwrap_or_default()).ok();
        Ok(())
    }

    fn relayout(&mut self, patch: &RelayoutPatch) -> VinoResult<()> {
        writeln!(
            self.out,
            "{}",
            serde_json::to_string_pretty(&json!({ "relayout": patch })).unwrap_or_default()
        )
        .ok();
        Ok(())
    }

    fn purge(&mut self) {}
}

fn parse_pair(text: &str) -> Result<Plane> {
    let parts: Vec<usize> = text
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid plane: {}", text))?;
    match parts.as_slice() {
        [a, b] => Ok(Plane(*a, *b)),
        _ => anyhow::bail!("plane needs exactly 2 axes, got {}", parts.len()),
    }
}

fn parse_coords(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid coordinates: {}", text))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = Arc::new(HttpDataSource::new(&args.base_url)?);

    info!(id = args.id, base = %args.base_url, "fetching dataset info");
    let dataset = source.fetch_info(VinoId(args.id)).await?;
    info!(
        title = dataset.title.as_deref().unwrap_or("untitled"),
        dim = dataset.dim,
        format = %dataset.format,
        "dataset resolved"
    );

    let section = args.plane.is_some() || args.at.is_some();
    let state = RequestedState {
        id: VinoId(args.id),
        format: args.format,
        ppa: match args.ppa {
            Some(ppa) => ppa,
            None => default_ppa(args.format.unwrap_or(dataset.format), dataset.dim),
        },
        section,
        plane: args.plane.as_deref().map(parse_pair).transpose()?.unwrap_or(Plane(0, 1)),
        at: args.at.as_deref().map(parse_coords).transpose()?,
        distance: args.distance,
        shapes: args.shapes,
    };

    let plan = PlotPlan::build(&state, &dataset);
    info!(urls = ?plan.urls, "plot plan ready");

    let mut renderer = JsonRenderer { out: io::stdout() };
    let mut session = PlotSession::for_plan(
        source,
        Arc::new(NoopIndicator),
        EventBus::default(),
        &plan,
    );
    session.seed_info(MergedInfo::from_dataset(&dataset));
    if state.section {
        session.relayout_with(axis_range_patch);
    } else {
        session.relayout_with(grid_tick_patch);
    }

    let started = Instant::now();
    let traces = session.show(&mut renderer).await?;
    info!(traces, elapsed_ms = started.elapsed().as_millis() as u64, "done");

    Ok(())
}
