//! Terminal logging for the command-line front end.
//!
//! The library only emits through the `log` facade. Binaries call [`init`]
//! once at startup.
//!
//! # Log Levels
//!
//! - `error`: failed writes to storage
//! - `warn`: stored entries that could not be read and were dropped
//! - `info`: loads, imports and exports
//! - `debug`: every edit, undo and redo
//! - `trace`: storage reads and writes

use log::LevelFilter;

/// Level for a `-v` count: 0 is warn, 1 info, 2 debug, 3 or more trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. `RUST_LOG`, when set, overrides `verbosity`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbosity))
        .format_timestamp_millis()
        .format_target(verbosity >= 2)
        .parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
