//! Process-wide tracing subscriber setup.

use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "JGRAD_LOG";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors emitted when configuring the tracing subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    /// A subscriber was already installed by this process.
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    /// The filter directive in the environment could not be parsed.
    #[error("invalid log filter `{directive}`: {reason}")]
    Filter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Installs a stderr `fmt` subscriber filtered by `JGRAD_LOG`, then `RUST_LOG`,
/// then `default_directive`.
pub fn init_tracing(default_directive: &str) -> Result<(), InitError> {
    if INITIALISED.get().is_some() {
        return Err(InitError::AlreadyInitialised);
    }

    let directive = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .unwrap_or_else(|| default_directive.to_string());
    let filter = EnvFilter::try_new(&directive).map_err(|err| InitError::Filter {
        directive: directive.clone(),
        reason: err.to_string(),
    })?;
    INITIALISED
        .set(())
        .map_err(|_| InitError::AlreadyInitialised)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
    Ok(())
}
