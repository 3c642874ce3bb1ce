//! Logger initialisation for the command-line tool

use log::LevelFilter;

/// Pick the default level for the `--verbose` flag
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install `env_logger` at the default level; `RUST_LOG` overrides it
///
/// Safe to call more than once: later calls are ignored.
pub fn init_logger(verbose: bool) {
    let level = default_level(verbose);

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {level:?} level");
    }
}
