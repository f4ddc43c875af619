//! `tracing` subscriber setup for the CLI and the HTTP server.
//!
//! Events go to stdout through a compact fmt layer. The filter comes from
//! `RUST_LOG` (target syntax, e.g. `verif_qr=debug,tower_http=info`) and
//! falls back to INFO when unset or unparseable.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    filter::Targets,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

/// Initialize the global logger, or return an `Err` if one is already set.
pub fn try_init() -> Result<(), TryInitError> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|rust_log| Targets::from_str(&rust_log).ok())
        .unwrap_or_else(|| Targets::new().with_default(Level::INFO));

    let stdout_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(stdout_log).try_init()
}

/// Initialize the global logger from tests.
///
/// Does nothing unless `RUST_LOG` is set, and tolerates a logger installed by
/// another test thread.
pub fn init_for_testing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let _ = try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_for_testing_is_repeatable() {
        init_for_testing();
        init_for_testing();
    }
}
