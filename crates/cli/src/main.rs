//! Bazaar CLI - narrated walkthroughs of the domain model.
//!
//! # Usage
//!
//! ```bash
//! # Catalog, cart, order, and payment
//! bazaar demo ecommerce
//!
//! # Everything, with JSON logs
//! BAZAAR_LOG_FORMAT=json bazaar demo all
//! ```
//!
//! # Commands
//!
//! - `demo ecommerce` - Catalog, cart, order lifecycle, payments
//! - `demo money` - Money arithmetic and its guards
//! - `demo bank` - PIN-protected accounts and PIN recovery
//! - `demo vehicles` - Vehicles built from components
//! - `demo shapes` - Shapes behind one interface, vector operators
//! - `demo animals` - Animals sharing a daily routine
//! - `demo people` - A validated person and a counter with history
//! - `demo ownership` - Houses that own rooms, universities that refer to students
//! - `demo files` - Scoped file access
//! - `demo all` - All of the above
//!
//! Narration goes to stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::DemoResult;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar domain model walkthroughs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a narrated demonstration
    Demo {
        /// Which demonstration to run
        #[arg(value_enum, default_value_t = Scenario::All)]
        scenario: Scenario,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Catalog, cart, order, and payment
    Ecommerce,
    /// Money arithmetic
    Money,
    /// Bank accounts
    Bank,
    /// Vehicle composition
    Vehicles,
    /// Shapes and vectors
    Shapes,
    /// Animals
    Animals,
    /// Validated person and counter
    People,
    /// Composition versus aggregation
    Ownership,
    /// Scoped file access
    Files,
    /// Every demonstration in turn
    All,
}

impl Scenario {
    const EACH: [Self; 9] = [
        Self::Ecommerce,
        Self::Money,
        Self::Bank,
        Self::Vehicles,
        Self::Shapes,
        Self::Animals,
        Self::People,
        Self::Ownership,
        Self::Files,
    ];
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(cli, &config, &mut stdout) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr.
fn init_tracing(format: LogFormat) {
    // Defaults to info level if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (format == LogFormat::Pretty)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: &CliConfig, out: &mut impl Write) -> DemoResult {
    match cli.command {
        Commands::Demo { scenario } => {
            if scenario == Scenario::All {
                for each in Scenario::EACH {
                    run_scenario(each, config, out)?;
                }
            } else {
                run_scenario(scenario, config, out)?;
            }
        }
    }
    Ok(())
}

fn run_scenario(scenario: Scenario, config: &CliConfig, out: &mut impl Write) -> DemoResult {
    tracing::info!(?scenario, "Running demo");
    match scenario {
        Scenario::Ecommerce => commands::ecommerce::run(out, config),
        Scenario::Money => commands::money::run(out, config),
        Scenario::Bank => commands::bank::run(out, config),
        Scenario::Vehicles => commands::vehicles::run(out),
        Scenario::Shapes => commands::shapes::run(out),
        Scenario::Animals => commands::animals::run(out),
        Scenario::People => commands::people::run(out),
        Scenario::Ownership => commands::ownership::run(out),
        Scenario::Files => commands::files::run(out, config),
        Scenario::All => Ok(()),
    }
}
