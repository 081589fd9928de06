use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// The filter is read from `RUST_LOG` and defaults to `info`,
/// e.g. `RUST_LOG=canteen_forecast_rs=debug`. Events go to stderr so
/// stdout carries only command output (such as `dashboard --json`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Subscriber for tests: debug level, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
