//! Console diagnostics setup
//!
//! Library code logs through `tracing`; hosts that have no subscriber of
//! their own can call [`init`] once at startup.
//!
//! Filtering goes through the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid_browser::refresh=debug` - module-level filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize a console tracing subscriber. Warnings and up by default;
/// `RUST_LOG` overrides.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    tracing_subscriber::registry().with(console_layer).init();
}
