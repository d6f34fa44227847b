//! Passage Observe - tracing subscriber setup.
//!
//! Transition nodes emit `transition` and `close` spans through `tracing`;
//! these helpers install a subscriber that prints them.

use anyhow::Context;
use passage_core::{LogFormat, ObserveConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Initialize a simple stdout tracing subscriber for development
pub fn init_stdout_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(ObserveConfig::default().filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Initialize tracing from configuration.
///
/// Fails if `config.filter` is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init_tracing(config: &ObserveConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;
    let registry = Registry::default().with(filter);

    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("tracing subscriber already installed")?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .context("tracing subscriber already installed")?,
    }

    tracing::debug!(filter = %config.filter, format = ?config.format, "tracing initialized");
    Ok(())
}

fn build_filter(config: &ObserveConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter `{}`", config.filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(build_filter(&ObserveConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = ObserveConfig {
            filter: "passage=loudest".into(),
            ..ObserveConfig::default()
        };
        let err = build_filter(&config).unwrap_err();
        assert!(err.to_string().contains("passage=loudest"));
    }

    #[test]
    fn test_init_only_once() {
        let config = ObserveConfig {
            format: LogFormat::Json,
            ..ObserveConfig::default()
        };
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_err());
    }
}
