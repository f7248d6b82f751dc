//! Diagnostic logging port
//!
//! The scanner reports what it skips and why through this trait instead of
//! writing to a global logger.

/// Receives scanner diagnostics
pub trait ScanLog: Send + Sync {
    /// Routine progress information
    fn debug(&self, message: &str);

    /// Something was skipped or went wrong but the scan may continue
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl ScanLog for LogFacade {
    fn debug(&self, message: &str) {
        log::debug!("{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Discards all diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ScanLog for Silent {
    fn debug(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}
