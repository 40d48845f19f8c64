pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING: Once = Once::new();

/// Route lazysh's spawn, exit and pipe events into the test output.
///
/// Events go through the libtest writer, so they only show up for failing
/// tests (or with `--nocapture`). Defaults to `lazysh=debug`, which includes
/// the "command started" and "collected command output" events; override
/// with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("lazysh=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Run a future with a 5-second timeout.
///
/// Command tests spawn real processes; a hung pipe should fail the test
/// instead of hanging the suite.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::IntoFuture<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}
