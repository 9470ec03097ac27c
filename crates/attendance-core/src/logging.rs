//! Logging bootstrap.
//!
//! The core emits `tracing` events only; binaries call [`init`] once at
//! startup. `RUST_LOG` overrides the configured level.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr fmt subscriber filtered by `RUST_LOG`, or by
/// `default_level` when `RUST_LOG` is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed; repeated
/// calls are harmless.
pub fn init(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let _ = init("debug");
        assert!(!init("info"));
    }
}
