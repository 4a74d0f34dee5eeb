//! Logging initialization

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber filtered by `directives` (`RUST_LOG` syntax)
///
/// An invalid filter falls back to `warn` and says so.
pub fn init(directives: &str) {
    let (filter, invalid) = match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("warn"), Some(e)),
    };
    let layer = fmt::layer()
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_writer(io::stderr);
    // a subscriber may already be installed (tests), keep it
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
    if let Some(e) = invalid {
        tracing::warn!(directives, error = %e, "invalid log filter, using 'warn'");
    }
}
