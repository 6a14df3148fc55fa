//! Logging setup utilities for the rendezvous signaling server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are shown at the default log level.
const LOG_TARGETS: [&str; 3] = ["rendezvous_server", "rendezvous_shared", "tower_http"];

/// Build the default filter directives for the given binary and level.
///
/// `binary_name` may contain dashes; tracing targets use the underscored form.
pub fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect();
    if !LOG_TARGETS.contains(&binary_target.as_str()) {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }
    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "rendezvous-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use rendezvous_shared::logger::setup_logger;
///
/// setup_logger("rendezvous-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
