//! # coupon-cli
//!
//! Command-line caller for coupon-core. The binary (`coupon-calc`) is a
//! one-line wrapper around [`run`]; everything else lives here so it can be
//! tested.
//!
//! ## Module Organization
//! ```text
//! coupon_cli/
//! ├── lib.rs      ◄─── You are here (arguments, startup, run)
//! ├── config.rs   ◄─── CliConfig: TOML file + COUPON_* env + flags
//! ├── input.rs    ◄─── Catalog and order request files
//! ├── report.rs   ◄─── OrderSummary (text / JSON)
//! └── error.rs    ◄─── CliError
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load config ──► 2. Init tracing ──► 3. Load catalog                 │
//! │                                              │                          │
//! │  6. Print summary ◄── 5. redeem_coupon ◄── 4. Build order               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod report;

use std::path::PathBuf;

use clap::Parser;
use coupon_core::redeem_coupon;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{CliConfig, OutputFormat};
use error::CliResult;
use report::OrderSummary;

/// Apply a coupon code to an order and print what the customer pays.
#[derive(Debug, Clone, Parser)]
#[command(name = "coupon-calc", version)]
pub struct Cli {
    /// Order request file (JSON).
    #[arg(long)]
    pub order: PathBuf,

    /// Coupon code to redeem.
    #[arg(long)]
    pub coupon: String,

    /// Catalog file (JSON, or TOML with a .toml extension).
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Config file. Defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl Cli {
    /// Flags override everything loaded from file and environment.
    pub fn apply_to(&self, config: &mut CliConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        if let Some(output) = self.output {
            config.output = output;
        }
    }
}

/// Runs one coupon calculation and prints the summary to stdout.
pub fn run(cli: Cli) -> CliResult<()> {
    let mut config = CliConfig::load(cli.config.clone())?;
    cli.apply_to(&mut config);

    init_tracing(&config.log_filter);
    info!(coupon = %cli.coupon, output = %config.output, "Starting coupon calculation");

    let catalog = input::load_catalog(config.require_catalog()?)?;
    let request = input::load_order_request(&cli.order)?;
    let mut order = request.build_order(&catalog)?;

    let coupon = redeem_coupon(&catalog, &cli.coupon, &mut order)?;
    let summary = OrderSummary::new(&order, &coupon);

    match config.output {
        OutputFormat::Text => println!("{}", summary),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise the configured filter (default `info,coupon=debug`)
///
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
