//! CLI entry point for the MGNREGA dashboard tool.
//!
//! Provides subcommands for probing the backend, rendering dashboard reports
//! for a state/district selection, browsing the catalog, exporting filtered
//! rows, and an interactive menu loop.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use mgnrega_dash::analytics::build_dashboard;
use mgnrega_dash::analytics::filter::{ALL, Selection, select};
use mgnrega_dash::config::Config;
use mgnrega_dash::infra::backend::BackendClient;
use mgnrega_dash::model::Payload;
use mgnrega_dash::output::{export_csv, print_json, write_json};
use mgnrega_dash::report::{format_int, render};
use mgnrega_dash::session::Session;

#[derive(Parser)]
#[command(name = "mgnrega_dash")]
#[command(about = "A terminal dashboard for MGNREGA district/state data", long_about = None)]
struct Cli {
    /// Backend base URL (overrides the API_BASE environment variable)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the backend health endpoint
    Health,
    /// Render the dashboard for a state/district selection
    Report {
        /// State name, or "All"
        #[arg(short, long, default_value = ALL)]
        state: String,

        /// District name, or "All"
        #[arg(short, long, default_value = ALL)]
        district: String,

        /// Emit the dashboard data as JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Invalidate the cached payload and refetch before rendering
        #[arg(long, default_value_t = false)]
        refresh: bool,

        /// Number of raw rows to preview at the bottom of the report
        #[arg(long, default_value_t = 10)]
        preview: usize,
    },
    /// Menu-driven dashboard session
    Interactive,
    /// List states from the backend catalog
    ListStates,
    /// List districts, optionally restricted to one state
    ListDistricts {
        /// State name to restrict the listing to
        #[arg(short, long)]
        state: Option<String>,
    },
    /// Export filtered rows to a CSV file
    Export {
        /// CSV file to write
        #[arg(short, long)]
        output: String,

        /// State name, or "All"
        #[arg(short, long, default_value = ALL)]
        state: String,

        /// District name, or "All"
        #[arg(short, long, default_value = ALL)]
        district: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mgnrega_dash.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mgnrega_dash.log"));

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
    let config = Config::resolve(cli.api_base);
    let client = BackendClient::new(&config)?;
    let mut session = Session::new(client, config.data_url());

    match cli.command {
        Commands::Health => {
            if let Err(e) = session.health().await {
                error!(error = %e, "Backend health check failed; retry once the backend is reachable");
                return Err(e);
            }
            info!("Backend is healthy");
        }
        Commands::Report {
            state,
            district,
            json,
            output,
            refresh,
            preview,
        } => {
            session.health().await.inspect_err(|e| {
                error!(error = %e, "Backend health check failed; retry once the backend is reachable");
            })?;

            let payload = if refresh {
                session.refresh().await?
            } else {
                session.payload().await?
            };

            let selection = Selection::new(&state, &district);
            let (data, view) = build_dashboard(&payload, &selection);

            if json {
                match output {
                    Some(path) => write_json(&path, &data)?,
                    None => print_json(&data)?,
                }
            } else {
                let report = render(&data, &view, preview);
                match output {
                    Some(path) => {
                        std::fs::write(&path, &report)?;
                        info!(path, "Report written");
                    }
                    None => println!("{report}"),
                }
            }
        }
        Commands::Interactive => {
            interactive_loop(&mut session).await?;
        }
        Commands::ListStates => {
            let payload = session.payload().await?;
            list_states(&payload);
        }
        Commands::ListDistricts { state } => {
            let payload = session.payload().await?;
            list_districts(&payload, state.as_deref());
        }
        Commands::Export {
            output,
            state,
            district,
        } => {
            let payload = session.payload().await?;
            let selection = Selection::new(&state, &district);
            let view = select(&payload.mgnrega_data, &selection);
            export_csv(&output, &view)?;
        }
    }

    Ok(())
}

fn list_states(payload: &Payload) {
    for state in &payload.states {
        info!(
            state_name = state.state_name.as_deref().unwrap_or(""),
            state_code = state.state_code.as_deref().unwrap_or(""),
            "State"
        );
    }
    info!(total = payload.states.len(), "State list");
}

/// Lists districts, joined to their state via `state_id` when a state name is
/// given. An unknown state name lists nothing.
fn list_districts(payload: &Payload, state_name: Option<&str>) {
    let state_id = state_name.and_then(|name| {
        payload
            .states
            .iter()
            .find(|s| s.state_name.as_deref() == Some(name))
            .and_then(|s| s.id)
    });

    let mut total = 0;
    for district in &payload.districts {
        if state_name.is_some() && (state_id.is_none() || district.state_id != state_id) {
            continue;
        }
        total += 1;
        info!(
            district_name = district.district_name.as_deref().unwrap_or(""),
            district_code = district.district_code.as_deref().unwrap_or(""),
            "District"
        );
    }
    info!(total, state = state_name.unwrap_or(ALL), "District list");
}

/// Reads a single line of input after printing a prompt.
fn prompt(label: &str) -> String {
    print!("{label}: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Menu loop. Failures are contained per iteration so one bad fetch does not
/// end the session.
async fn interactive_loop(session: &mut Session<BackendClient>) -> Result<()> {
    loop {
        println!("\n[1] View dashboard");
        println!("[2] List states");
        println!("[3] List districts for a state");
        println!("[4] Force refresh data");
        println!("[5] Exit");

        match prompt("Enter choice").as_str() {
            "1" => {
                let state = prompt("State (or All)");
                let district = prompt("District (or All)");
                match session.payload().await {
                    Ok(payload) => {
                        let selection = Selection::new(&state, &district);
                        let (data, view) = build_dashboard(&payload, &selection);
                        println!("{}", render(&data, &view, 10));
                    }
                    Err(e) => eprintln!("Failed to load data: {e}. Choose [4] to retry."),
                }
            }
            "2" => match session.payload().await {
                Ok(payload) => list_states(&payload),
                Err(e) => eprintln!("Failed to load data: {e}"),
            },
            "3" => {
                let state = prompt("State");
                match session.payload().await {
                    Ok(payload) => list_districts(&payload, Some(&state)),
                    Err(e) => eprintln!("Failed to load data: {e}"),
                }
            }
            "4" => match session.refresh().await {
                Ok(payload) => println!(
                    "Refreshed: {} rows loaded.",
                    format_int(payload.mgnrega_data.len() as i64)
                ),
                Err(e) => eprintln!("Refresh failed: {e}"),
            },
            "5" => return Ok(()),
            other => println!("Invalid choice: {other}"),
        }
    }
}
