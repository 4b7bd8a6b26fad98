//! Logging and tracing setup.
//!
//! Structured logging uses the `tracing` ecosystem. All output goes to
//! **stderr**, since stdout belongs to the host process talking to the
//! provider.
//!
//! # Quick Start
//!
//! ```ignore
//! use casdoor_provider::{init_logging, CasdoorProvider};
//!
//! fn main() {
//!     // Reads RUST_LOG; defaults to `info`
//!     init_logging();
//!     tracing::info!("Starting provider");
//!     let provider = CasdoorProvider::new();
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls log levels (e.g., `info`, `debug`, `casdoor_provider=debug`)
//!
//! ```bash
//! # Log every Casdoor request
//! RUST_LOG=casdoor_provider::client=debug ./terraform-provider-casdoor
//! ```

use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

/// Level used when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

fn subscriber(default_level: &str) -> impl SubscriberInitExt {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    )
}

/// Initialize the default logging subscriber.
///
/// This sets up a `tracing` subscriber that:
/// - Writes to **stderr**
/// - Respects the `RUST_LOG` environment variable for filtering
/// - Defaults to `info` level if `RUST_LOG` is not set
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    subscriber(DEFAULT_LEVEL).init();
}

/// Initialize logging with a custom default level.
///
/// Like [`init_logging`], but `default_level` (e.g. `"debug"`) is used
/// when `RUST_LOG` is not set.
pub fn init_logging_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize logging, returning false if already initialized.
///
/// Unlike [`init_logging`], this does not panic when a subscriber is
/// already installed, which makes it safe to call from tests.
pub fn try_init_logging() -> bool {
    subscriber(DEFAULT_LEVEL).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    // The global subscriber can only be set once per process, so only the
    // non-panicking entry point is exercised here.

    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new(DEFAULT_LEVEL).is_ok());
        assert!(EnvFilter::try_new("casdoor_provider=debug").is_ok());
        assert!(EnvFilter::try_new("warn,casdoor_provider::client=debug").is_ok());
    }

    #[test]
    fn test_try_init_logging_is_idempotent() {
        let _ = try_init_logging();
        assert!(!try_init_logging());
    }
}
