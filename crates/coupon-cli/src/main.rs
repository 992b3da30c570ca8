//! # coupon-calc
//!
//! ## Usage
//! ```bash
//! cargo run -p coupon-cli --bin coupon-calc -- \
//!     --catalog demos/catalog.toml --order demos/order.json --coupon A1OFF
//!
//! # JSON output, verbose logs
//! RUST_LOG=debug cargo run -p coupon-cli --bin coupon-calc -- \
//!     --catalog demos/catalog.toml --order demos/order.json --coupon GIFT --output json
//! ```

use std::process::ExitCode;

use clap::Parser;
use coupon_cli::Cli;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match coupon_cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Coupon calculation failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
