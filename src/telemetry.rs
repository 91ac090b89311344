//! Log output for the launcher binary.
//!
//! Everything goes to stderr. Stdout is reserved for command output such as
//! rendered command lines and manifest exports, which callers pipe.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::cli::LogFormat;

/// Installs the process-wide subscriber.
///
/// `RUST_LOG` directives take precedence over `level`. A subscriber that is
/// already installed is left in place.
pub fn init_tracing(format: LogFormat, level: Level) {
    let filter = EnvFilter::try_new(directives(std::env::var("RUST_LOG").ok(), level))
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let layer = match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    };

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

fn directives(rust_log: Option<String>, level: Level) -> String {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| level.as_str().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_the_default_level() {
        assert_eq!(directives(None, Level::INFO), "info");
        assert_eq!(directives(Some("  ".into()), Level::WARN), "warn");
    }

    #[test]
    fn rust_log_wins() {
        assert_eq!(directives(Some("phagelaunch=debug".into()), Level::INFO), "phagelaunch=debug");
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_tracing(LogFormat::Json, Level::INFO);
        init_tracing(LogFormat::Text, Level::DEBUG);
    }
}
