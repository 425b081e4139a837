//! Rollcall CLI - issue, inspect, and redeem location-stamped check-in payloads.

use clap::{Parser, Subcommand};

mod commands;
mod output;
mod platform;

use commands::{inspect, issue, kiosk, redeem};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Location-stamped check-in sessions over scannable payloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a session payload from a location claim
    Issue {
        /// Latitude in degrees (sensor-style claim)
        #[arg(long)]
        latitude: Option<f64>,
        /// Longitude in degrees (sensor-style claim)
        #[arg(long)]
        longitude: Option<f64>,
        /// Accuracy radius in meters (sensor-style claim)
        #[arg(long)]
        accuracy: Option<f64>,
        /// Network address for a manual claim
        #[arg(long)]
        address: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a payload and show the session it carries
    Inspect {
        /// The transport payload (scanned string)
        payload: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Redeem a payload for a student in one shot
    Redeem {
        /// The transport payload (scanned string)
        payload: String,
        /// Student name to record
        #[arg(long)]
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive check-in kiosk (admin and student panels)
    Kiosk {
        /// Latitude the simulated sensor reports
        #[arg(long)]
        latitude: Option<f64>,
        /// Longitude the simulated sensor reports
        #[arg(long)]
        longitude: Option<f64>,
        /// Accuracy the simulated sensor reports, in meters
        #[arg(long, default_value_t = 20.0)]
        accuracy: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Issue {
            latitude,
            longitude,
            accuracy,
            address,
            json,
        } => issue::run(latitude, longitude, accuracy, address, json),
        Commands::Inspect { payload, json } => inspect::run(&payload, json),
        Commands::Redeem {
            payload,
            name,
            json,
        } => redeem::run(&payload, &name, json),
        Commands::Kiosk {
            latitude,
            longitude,
            accuracy,
        } => kiosk::run(latitude, longitude, accuracy),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
