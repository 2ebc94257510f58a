//! Logging setup.
//!
//! Tree operations emit `tracing` events; nothing is printed unless the
//! embedding program installs a subscriber. [`init_logging`] installs a
//! `tracing-subscriber` fmt subscriber configured from a [`LogConfig`].

use crate::config::{LogConfig, Validate};
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize the logging system.
///
/// The configured level is used unless `RUST_LOG` is set. Calling this more
/// than once is a no-op.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    config.validate()?;

    INITIALIZED
        .get_or_try_init(|| {
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.level))
                .map_err(|e| Error::Logging(format!("Invalid log filter: {e}")))?;

            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_file(config.source_location)
                .with_line_number(config.source_location);

            let installed = if config.json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(builder.pretty().finish())
            };

            installed.map_err(|e| {
                Error::Logging(format!("Failed to set global tracing subscriber: {e}"))
            })
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LogConfig {
            level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(init_logging(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LogConfig::default();
        let first = init_logging(&config);
        // Another test binary component may already own the global subscriber
        if first.is_ok() {
            assert!(init_logging(&config).is_ok());
        }
    }
}
