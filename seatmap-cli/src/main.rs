use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use seatmap_cli::{run_confirmation, run_seats, AppState, FlowOutcome, SeatsOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seatmap", about = "Pick a seat on a flight and review bookings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the seat map for the flight in a page address (`...?flight_id=7`)
    Seats {
        /// Page address carrying the `flight_id` parameter
        #[arg(long)]
        location: String,

        /// Select this seat once the map is loaded
        #[arg(long)]
        select: Option<String>,

        /// Reserve the selected seat without prompting
        #[arg(long, requires = "select")]
        confirm: bool,
    },
    /// Show the confirmation for the booking in a page address (`...?booking_id=42`)
    Confirmation {
        /// Page address carrying the `booking_id` parameter
        #[arg(long)]
        location: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatmap=info,seatmap_cli=info,seatmap_core=info,seatmap_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = seatmap_store::Config::load().context("Failed to load config")?;
    tracing::debug!("Using backend {}", config.backend.base_url);
    let state = AppState::from_config(&config).context("Failed to create backend client")?;

    let outcome = match cli.command {
        Command::Seats {
            location,
            select,
            confirm,
        } => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let options = SeatsOptions { select, confirm };
            let (outcome, _) = run_seats(&state, &location, options, input, std::io::stdout()).await;
            outcome
        }
        Command::Confirmation { location } => {
            let (outcome, _) = run_confirmation(&state, &location, std::io::stdout()).await;
            outcome
        }
    };

    tracing::info!(?outcome, "Done");
    Ok(match outcome {
        FlowOutcome::Failed(_) => ExitCode::FAILURE,
        FlowOutcome::Navigated(_) | FlowOutcome::Completed => ExitCode::SUCCESS,
    })
}
