//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides the preset level when set.

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, for terminals
    Pretty,
    /// One JSON object per line, for log shippers
    Json,
}

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Log span open/close, which shows per-operation timing of service calls
    pub span_events: bool,
    pub source_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Staging)
    }
}

impl TracingConfig {
    /// Preset for a deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: Level::DEBUG,
                format: LogFormat::Pretty,
                span_events: true,
                source_location: true,
            },
            Environment::Staging => Self {
                level: Level::INFO,
                format: LogFormat::Pretty,
                span_events: false,
                source_location: true,
            },
            Environment::Production => Self {
                level: Level::INFO,
                format: LogFormat::Json,
                span_events: false,
                source_location: false,
            },
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }

    fn layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    {
        let layer = fmt::layer()
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_span_events(if self.span_events {
                FmtSpan::NEW | FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            });

        match self.format {
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

/// Install the global subscriber
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) {
    if let Err(e) = try_init_tracing(config) {
        panic!("{e}");
    }
}

/// Install the global subscriber unless one is already installed
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(config.layer())
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
