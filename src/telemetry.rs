use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init() {
  tracing_subscriber::registry()
    .with(env_filter())
    .with(tracing_subscriber::fmt::layer())
    .with(ErrorLayer::default())
    .init();
}

/// Same as [`init`] but it can be called more than once and the
/// output goes through the test harness.
#[cfg(test)]
pub fn init_for_tests() {
  tracing_subscriber::registry()
    .with(env_filter())
    .with(tracing_subscriber::fmt::layer().with_test_writer())
    .with(ErrorLayer::default())
    .try_init()
    .ok();
}
