// Tracing setup
//
// Logs go to stderr so they never interleave with screens rendered on stdout.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "premortem=warn";
const VERBOSE_FILTER: &str = "premortem=debug";

/// Filter used when RUST_LOG is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
