//! Diagnostic logging setup
//!
//! Events go to stderr so command output on stdout stays clean. The filter is
//! read from `BUCKETS_LOG` and defaults to warnings from this crate.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "BUCKETS_LOG";

const DEFAULT_FILTER: &str = "bucket_planner=warn";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::debug!("still running");
    }
}
