use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use fluvionav::geo::{format_distance, format_duration};
use fluvionav::navigator::NavigationState;
use fluvionav::progress::{estimate_at, TripStatus};
use fluvionav::scenario::{replay, Scenario};

#[derive(Parser)]
#[command(name = "fluvionav")]
#[command(about = "River vessel live-tracking engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate { scenario: String },
    /// Replay a scenario and print the derived navigation states
    Run {
        scenario: String,
        /// Emit one JSON object per state instead of HUD lines
        #[arg(long)]
        json: bool,
    },
    /// Estimate trip progress from schedule timestamps alone
    Estimate {
        #[arg(long)]
        departure: DateTime<Utc>,
        #[arg(long)]
        arrival: DateTime<Utc>,
        #[arg(long)]
        status: TripStatus,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario } => validate(&scenario),
        Commands::Run { scenario, json } => run(&scenario, json),
        Commands::Estimate {
            departure,
            arrival,
            status,
        } => estimate(departure, arrival, status),
    }
}

fn validate(path: &str) -> ExitCode {
    let scenario = match Scenario::from_file(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Scenario is valid: {} route points, {} hazard zones, {} fixes",
        scenario.route.len(),
        scenario.hazards.len(),
        scenario.fixes.len()
    );
    if let Some(name) = &scenario.name {
        println!("  name: {}", name);
    }
    for (i, fix) in scenario.fixes.iter().enumerate() {
        println!("  fix {}: {:?} @ {}", i + 1, fix.time, fix.position);
    }
    ExitCode::SUCCESS
}

fn run(path: &str, json: bool) -> ExitCode {
    let scenario = match Scenario::from_file(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Utc::now();
    for state in replay(&scenario, start) {
        if json {
            match serde_json::to_string(&state) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("Serialization error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("{}", hud_line(&state));
        }
    }
    ExitCode::SUCCESS
}

fn estimate(departure: DateTime<Utc>, arrival: DateTime<Utc>, status: TripStatus) -> ExitCode {
    let progress = estimate_at(Utc::now(), departure, arrival, status);
    println!("{} ({}%)", progress.status, progress.percent);
    ExitCode::SUCCESS
}

fn hud_line(state: &NavigationState) -> String {
    let eta = match state.eta {
        Some(eta) => format_duration(eta - state.timestamp),
        None => "--".to_string(),
    };
    let mut line = format!(
        "{}  {}  {:>5.1} km/h  hdg {:03.0}  remaining {}  eta {}  {:.0}%",
        state.timestamp.format("%H:%M:%S"),
        state.position,
        state.speed_kmh,
        state.heading_deg,
        format_distance(state.distance_remaining_m),
        eta,
        state.route_progress * 100.0
    );
    if state.off_route {
        line.push_str("  OFF ROUTE");
    }
    for alert in &state.hazards {
        line.push_str(&format!(
            "  ! {} ({})",
            alert.zone.name,
            format_distance(alert.standoff_m)
        ));
    }
    line
}
