//! Logging setup for assetd.
//!
//! All diagnostics go through `tracing`. The subscriber is installed once by
//! the binary; library code only emits events.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target axum uses for extractor rejection events (emitted at TRACE).
const AXUM_REJECTION_TARGET: &str = "axum::rejection";

/// How much the service logs, chosen with `-q` / `-v` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Startup, shutdown, rejected bodies and failed inserts.
    #[default]
    Normal,
    /// Adds per-insert row ids and axum's reasons for rejecting a body.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Map command-line flags to a verbosity. `quiet` wins over any `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Level for the crate's own events.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Per-target levels making up the default filter.
    fn targets(self) -> Vec<(&'static str, Level)> {
        let mut targets = vec![(env!("CARGO_CRATE_NAME"), self.level())];
        if matches!(self, Self::Verbose | Self::Trace) {
            targets.push((AXUM_REJECTION_TARGET, Level::TRACE));
        }
        targets
    }

    /// Default `EnvFilter` directive for this verbosity.
    #[must_use]
    pub fn directive(self) -> String {
        self.targets()
            .into_iter()
            .map(|(target, level)| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Calling this more
/// than once is harmless; the first subscriber stays installed.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
