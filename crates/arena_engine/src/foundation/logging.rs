//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Safe to call more than once; later calls are no-ops so tests and
/// embedding hosts can both initialize freely.
pub fn init() {
    let _ = env_logger::try_init();
}
