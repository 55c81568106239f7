//! Logging utilities and structured logging support
//!
//! The library only emits through the `log` facade. Binaries pick the
//! sink; [`init`] wires up `env_logger` the way the demo does.

/// Initialize the logging system
///
/// Honors `RUST_LOG`, falling back to `default_level` when unset.
pub fn init(default_level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

/// Initialize logging for tests; safe to call more than once
pub fn init_for_tests() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}
