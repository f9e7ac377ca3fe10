//! Logging setup for hosts embedding the view engine.
//!
//! The library only emits `tracing` events. A host that has no subscriber of
//! its own can call [`init_logging`] once at startup; `RUST_LOG` takes
//! precedence over the default directive.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,tracktable=info";

/// Install a console subscriber.
///
/// Returns `false` if a global subscriber was already installed, which is
/// not an error.
pub fn init_logging(default_directive: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_file(cfg!(debug_assertions))
        .with_line_number(cfg!(debug_assertions));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized");
    }
    installed
}
