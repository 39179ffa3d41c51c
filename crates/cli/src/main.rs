//! CareLog CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! carelog-cli migrate
//!
//! # Create a worker
//! carelog-cli worker create -x "auth0|abc" -e asha@clinic.example.com -n "Asha Rao"
//!
//! # Promote a worker to manager
//! carelog-cli worker set-role -x "auth0|abc" -r MANAGER
//!
//! # Replace the facility geofence
//! carelog-cli facility set -n "Lakeview Clinic" --lat 13.067014 --lng 77.466541 --radius 2000
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `worker create` / `worker set-role` - Manage workers
//! - `facility set` - Replace the geofence

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "carelog-cli")]
#[command(author, version, about = "CareLog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },
    /// Manage the facility geofence
    Facility {
        #[command(subcommand)]
        action: FacilityAction,
    },
}

#[derive(Subcommand)]
enum WorkerAction {
    /// Create a new worker
    Create {
        /// Identity reference from the auth provider
        #[arg(short = 'x', long)]
        external_id: String,

        /// Worker email address
        #[arg(short, long)]
        email: String,

        /// Worker display name
        #[arg(short, long)]
        name: String,

        /// Worker role (`CAREWORKER`, `MANAGER`)
        #[arg(short, long, default_value = "CAREWORKER")]
        role: String,
    },
    /// Change a worker's role
    SetRole {
        /// Identity reference from the auth provider
        #[arg(short = 'x', long)]
        external_id: String,

        /// New role (`CAREWORKER`, `MANAGER`)
        #[arg(short, long)]
        role: String,
    },
}

#[derive(Subcommand)]
enum FacilityAction {
    /// Replace the geofence wholesale
    Set {
        /// Facility display name
        #[arg(short, long)]
        name: String,

        /// Geofence center latitude
        #[arg(long)]
        lat: f64,

        /// Geofence center longitude
        #[arg(long)]
        lng: f64,

        /// Admission radius in meters
        #[arg(long)]
        radius: f64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Worker { action } => match action {
            WorkerAction::Create {
                external_id,
                email,
                name,
                role,
            } => {
                commands::worker::create(&external_id, &email, &name, &role).await?;
            }
            WorkerAction::SetRole { external_id, role } => {
                commands::worker::set_role(&external_id, &role).await?;
            }
        },
        Commands::Facility { action } => match action {
            FacilityAction::Set {
                name,
                lat,
                lng,
                radius,
            } => {
                commands::facility::set(&name, lat, lng, radius).await?;
            }
        },
    }
    Ok(())
}
