//! Logging setup
//!
//! The crate logs through the `log` facade; applications pick the logger.
//! [`init`] installs `env_logger` for those that have no preference.

/// Initialize the logging system
///
/// Honours `RUST_LOG` and defaults to `info`. Calls after the first are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
