//! Process-wide tracing setup.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

static TRACING_INSTALLED: Once = Once::new();

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Install the global tracing subscriber (idempotent).
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Safe to call from
/// tests and embedding hosts that may have installed their own subscriber; a
/// second installation is silently skipped.
pub fn init() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(DEFAULT_LOG_LEVEL.into()));
        if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
            tracing::debug!("tracing subscriber already installed, keeping existing one");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
