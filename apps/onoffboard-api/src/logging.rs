//! JSON logging for the onoffboard service.
//!
//! One line per event with flattened fields. Each batch runs inside a
//! `lifecycle_batch` span carrying its `batch_id`, which `with_current_span`
//! attaches to every line logged while the batch is processed: ignored
//! events at info, resolution and notification failures at warn, GitHub
//! failures at error.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,onoffboard=debug";

/// Initialize the tracing subscriber with JSON output.
///
/// `RUST_LOG` takes precedence over `filter`. Exits the process if neither
/// yields a valid filter.
pub fn init_logging(filter: &str) {
    let filter_layer =
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter)) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("FATAL: Failed to create log filter: {e}");
                std::process::exit(1);
            }
        };

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(false)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter_layer)
        .init();

    tracing::info!(filter = %filter, "Logging initialized");
}

/// Initialize logging for tests (with simpler output).
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}
