//! Tracing setup.
//!
//! The subscriber is only installed when `VUE2TS_LOG` or `RUST_LOG` is set:
//!
//! ```bash
//! VUE2TS_LOG=debug vue2ts -i src/components
//! VUE2TS_LOG=vue_class_transformer=debug vue2ts -i src/App.vue
//! ```

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "VUE2TS_LOG";

/// Builds the filter from `VUE2TS_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs a stderr `fmt` subscriber. Stdout stays reserved for reports and
/// `--stdout` output.
pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
