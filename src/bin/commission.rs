//! Commission calculator CLI.
//!
//! Usage:
//!   commission --config fees.toml calc 100 25.50
//!   commission --config fees.toml calc -- -100 25.50
//!   commission --config fees.toml export > state.json
//!   commission --config fees.toml import state.json

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;

use nanobook_commission::{CommissionModel, Config, Error, SavedState, Transaction};

#[derive(Parser)]
#[command(name = "commission")]
#[command(about = "Compute broker commissions for a transaction")]
#[command(version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price one transaction with the configured model
    Calc {
        /// Signed quantity (negative for sells)
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Execution price per unit
        price: f64,
    },

    /// Print the configured model's saved state as JSON
    Export,

    /// Restore saved state JSON into the configured model and print it
    Import {
        /// Path to state.json
        state: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(config, cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(config: Config, command: Command) -> Result<(), Error> {
    let mut model = config.commission;
    info!("Using {model}");

    match command {
        Command::Calc { amount, price } => {
            let txn = Transaction::new(amount, price);
            let c = model.calculate(&txn);
            println!("{txn}: {c}");
        }
        Command::Export => {
            println!("{}", model.export_state().to_json()?);
        }
        Command::Import { state } => {
            let json = std::fs::read_to_string(&state).map_err(|e| Error::StateRead {
                path: state.clone(),
                source: e,
            })?;
            model.import_state(SavedState::from_json(&json)?)?;
            println!("{model}");
        }
    }
    Ok(())
}
