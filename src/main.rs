// ████████╗██████╗ ██╗██████╗
// ╚══██╔══╝██╔══██╗██║██╔══██╗
//    ██║   ██████╔╝██║██████╔╝
//    ██║   ██╔══██╗██║██╔═══╝
//    ██║   ██║  ██║██║██║
//    ╚═╝   ╚═╝  ╚═╝╚═╝╚═╝
//
// D A S H B O A R D   E N G I N E
//
// One GET against a spreadsheet web app, eighty columns of hand-typed
// Portuguese per trip, and out come the KPI cards, status cards and
// planned-vs-actual money the fleet desk looks at every morning.

mod aggregate;
mod columns;
mod config;
mod format;
mod metrics;
mod models;
mod normalize;
mod report;
mod source;
mod state;
mod status;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::metrics::IngestMetrics;
use crate::models::FilterCriteria;
use crate::normalize::Normalizer;
use crate::report::{DashboardDocument, FilterOptions, FinancialView, OperationalView, TripDetails};
use crate::state::DashboardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Operational,
    Financial,
    All,
}

#[derive(Parser, Debug)]
#[command(
    name = "trip-dashboard",
    about = "Operational and financial dashboard for chartered trip requests",
    version
)]
struct Cli {
    /// Case-insensitive substring of the SEI number
    #[arg(long, default_value = "")]
    sei: String,

    /// Exact sector
    #[arg(long, default_value = "")]
    sector: String,

    /// Departure month as YYYY-MM
    #[arg(long, default_value = "")]
    month: String,

    /// Exact final status (case-insensitive)
    #[arg(long, default_value = "")]
    status: String,

    /// Which dashboard tab to print
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Print the detail card of one request instead of the dashboard
    #[arg(long, value_name = "REQUEST_ID")]
    trip: Option<String>,

    /// List the sector and month filter values and exit
    #[arg(long)]
    options: bool,

    /// Emit a JSON document instead of text
    #[arg(long)]
    json: bool,

    /// Print ingest counters to stderr after the load
    #[arg(long)]
    metrics: bool,
}

impl Cli {
    fn filters(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.sei.trim().to_string(),
            sector: self.sector.trim().to_string(),
            month: self.month.trim().to_string(),
            status: self.status.trim().to_uppercase(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is the dashboard.
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::from_env();
    info!(endpoint = %config.endpoint_url, "🚌 Trip dashboard starting");

    let metrics = Arc::new(IngestMetrics::new());
    let normalizer = Normalizer::for_today().with_metrics(Arc::clone(&metrics));
    let client = source::build_client(&config).context("building HTTP client")?;

    let mut state = DashboardState::new();
    state.finish_load(source::load_trips(&client, &config, &normalizer, &metrics).await);

    let snapshot = metrics.snapshot();
    info!(
        rows_received = snapshot.rows_received,
        rows_mapped = snapshot.rows_mapped,
        numeric_cells_zeroed = snapshot.numeric_cells_zeroed,
        sentinel_dates = snapshot.sentinel_dates,
        date_fallbacks = snapshot.date_fallbacks,
        fetch_seconds = snapshot.last_fetch_seconds,
        "Ingest finished"
    );
    if cli.metrics {
        eprintln!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    if let Some(message) = state.error() {
        if cli.json {
            println!("{}", serde_json::json!({ "error": message }));
        } else {
            println!("⚠ {message}");
        }
        return Ok(ExitCode::FAILURE);
    }

    if cli.options {
        let options = FilterOptions {
            sectors: state.unique_sectors(),
            months: state.unique_months(),
        };
        if cli.json {
            let doc = serde_json::json!({ "sectors": options.sectors, "months": options.months });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        } else {
            print!("{options}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(request_id) = cli.trip.as_deref() {
        let Some(trip) = aggregate::find_trip(state.records(), request_id) else {
            warn!(request_id, "No trip with that request id");
            println!("Solicitação {request_id} não encontrada.");
            return Ok(ExitCode::FAILURE);
        };
        if cli.json {
            println!("{}", serde_json::to_string_pretty(trip)?);
        } else {
            print!("{}", TripDetails(trip));
        }
        return Ok(ExitCode::SUCCESS);
    }

    state.set_filters(cli.filters());
    let view = state.filtered_view();
    info!(
        matched = view.len(),
        total = state.records().len(),
        "Filters applied"
    );

    if cli.json {
        let doc = DashboardDocument::build(
            state.filters(),
            &view,
            state.unique_sectors(),
            state.unique_months(),
        );
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(ExitCode::SUCCESS);
    }

    if view.is_empty() {
        if state.filters().is_empty() {
            println!("Nenhuma viagem cadastrada.");
        } else {
            println!("Nenhuma viagem encontrada para os filtros selecionados.");
        }
    }
    if matches!(cli.view, View::Operational | View::All) {
        print!("{}", OperationalView::build(&view));
    }
    if cli.view == View::All {
        println!();
    }
    if matches!(cli.view, View::Financial | View::All) {
        print!("{}", FinancialView::build(&view));
    }

    Ok(ExitCode::SUCCESS)
}
