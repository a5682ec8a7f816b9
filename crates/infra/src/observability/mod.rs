//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; binaries call [`init_tracing`]
//! once at startup to decide where they go.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the output format (`json` or `pretty`)
pub const LOG_FORMAT_ENV: &str = "CREDIFY_LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Read the format from [`LOG_FORMAT_ENV`], defaulting to pretty output
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV).map_or(Self::Pretty, |value| Self::parse(&value))
    }

    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` overrides `default_directive` (e.g. `"info"` or
/// `"credify_infra=debug"`). Safe to call more than once; later calls are
/// no-ops.
///
/// # Returns
/// `true` if this call installed the subscriber
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    result.is_ok()
}
