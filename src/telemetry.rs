//! Debug diagnostics: a stderr `tracing` subscriber installed only when debug is enabled.

use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "podman_shim=debug";

/// Build metadata baked in by build.rs.
pub fn build_info() -> String {
    format!(
        "v{} ({} {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("PODMAN_SHIM_BUILD_TARGET"),
        env!("PODMAN_SHIM_BUILD_PROFILE"),
        env!("PODMAN_SHIM_BUILD_DATE"),
        env!("PODMAN_SHIM_BUILD_RUSTC"),
    )
}

/// Install the subscriber when `debug` is set. `RUST_LOG` overrides the default filter.
/// Without debug nothing is installed and events are discarded.
pub fn init(debug: bool) {
    if !debug {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();
    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
    debug!(build = %build_info(), "starting podman-shim");
}
