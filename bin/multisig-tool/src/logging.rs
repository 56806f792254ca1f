//! Logging initialization.

use std::io;

use tracing::*;
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `INFO`.
pub(crate) fn init(json_format: bool) {
    let filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let stderr_sub = if json_format {
        layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(io::stderr)
            .with_filter(filt)
            .boxed()
    };

    tracing_subscriber::registry().with(stderr_sub).init();

    debug!("logging initialized");
}
