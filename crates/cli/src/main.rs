//! Bazaar CLI - cart pricing and marketplace leaderboards over a ledger snapshot.
//!
//! # Usage
//!
//! ```bash
//! # Price a cart
//! bazaar cart total --ledger ledger.yaml --cart '{"1": 2, "4": 1}'
//!
//! # Print the merchants index boards as an admin, for shopper 12
//! bazaar dashboard --ledger ledger.yaml --admin --viewer 12
//!
//! # Print one merchant's stats as JSON
//! bazaar merchant --ledger ledger.yaml --id 3 --format json
//! ```
//!
//! # Commands
//!
//! - `cart total` - Price each cart line and the cart total
//! - `dashboard` - Merchants index leaderboards
//! - `merchant` - Per-merchant stats
//!
//! # Environment Variables
//!
//! - `BAZAAR_LEDGER` - Snapshot path used when `--ledger` is omitted
//! - `BAZAAR_*_SIZE` - Board sizes (see `bazaar_admin::config`)
//! - `RUST_LOG` - Log filter (default: `bazaar=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod snapshot;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar marketplace tools")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price carts
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the merchants index leaderboards
    Dashboard {
        #[command(flatten)]
        ledger: LedgerArgs,

        /// Shopper whose own fulfillment boards should be included
        #[arg(long)]
        viewer: Option<i64>,

        /// Include deactivated merchants
        #[arg(long)]
        admin: bool,

        /// Evaluate month windows at this instant (RFC 3339, default: now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print one merchant's stats
    Merchant {
        #[command(flatten)]
        ledger: LedgerArgs,

        /// Merchant user id
        #[arg(long)]
        id: i64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print line subtotals and the cart total
    Total {
        #[command(flatten)]
        ledger: LedgerArgs,

        /// Cart contents as a JSON object of item id to quantity
        #[arg(long)]
        cart: String,
    },
}

#[derive(Args)]
struct LedgerArgs {
    /// Ledger snapshot file (.yaml, .yml or .json)
    #[arg(long = "ledger", env = "BAZAAR_LEDGER")]
    path: PathBuf,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the log subscriber. Logs go to stderr so stdout stays parseable.
fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Total { ledger, cart } => commands::cart::total(&ledger.path, &cart)?,
        },
        Commands::Dashboard {
            ledger,
            viewer,
            admin,
            now,
            format,
        } => {
            let options = commands::dashboard::DashboardOptions {
                viewer,
                admin,
                now: now.unwrap_or_else(Utc::now),
                format,
            };
            commands::dashboard::show(&ledger.path, &options)?;
        }
        Commands::Merchant { ledger, id, format } => {
            commands::merchant::show(&ledger.path, id, format)?;
        }
    }
    Ok(())
}
