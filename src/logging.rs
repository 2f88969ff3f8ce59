//! Logger setup shared by the binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default level for the crate's own records.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug records from this crate are printed and
/// per-frame trace records stay hidden. `RUST_LOG` takes precedence over
/// both, so `RUST_LOG=mariana=trace` shows every collision and camera step.
pub fn init(verbose: bool) {
    let filter = format!("{}={}", env!("CARGO_CRATE_NAME"), default_level(verbose));
    let env = Env::default().default_filter_or(filter);
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis().format_module_path(verbose);

    // `try_init` only fails if a logger was already set; tests call `init`
    // repeatedly.
    if builder.try_init().is_err() {
        log::trace!("logger already initialised");
    }
}
