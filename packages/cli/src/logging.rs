// ABOUTME: tracing subscriber setup for the great-scott binary
// ABOUTME: Logs go to stderr so they never mix with the progress lines on stdout

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Invalid filters fall back to warnings only.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when running under tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
