//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io / serde_json / toml errors ──┐                                      │
//! │                                  ├──► CliError ──► logged, exit code 1  │
//! │  CoreError (coupon-core) ────────┘                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use coupon_core::CoreError;
use thiserror::Error;

/// Everything that can stop a coupon-calc run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No catalog path from flags, environment or config file.
    #[error("No catalog configured. Pass --catalog or set COUPON_CATALOG")]
    MissingCatalog,

    /// A file could not be read.
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse or render failure.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse failure.
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Calculation failure from the engine.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: CliError = CoreError::CouponNotFound("NOPE".to_string()).into();
        assert_eq!(err.to_string(), "Coupon not found: NOPE");
    }

    #[test]
    fn test_read_error_names_the_file() {
        let err = CliError::Read {
            path: PathBuf::from("orders/today.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read orders/today.json: missing");
    }
}
