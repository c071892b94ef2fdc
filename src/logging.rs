//! Diagnostic logging
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - every re-highlight pass
//! - `RUST_LOG=querylens::surface=trace` - echo suppression and subscriptions

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install a stderr subscriber filtered by RUST_LOG (default `warn`)
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
