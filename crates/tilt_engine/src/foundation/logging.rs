//! Logging utilities and the diagnostic sink used by scenes

pub use log::{debug, error, info, trace, warn};

/// Diagnostic sink for per-frame scene readouts
///
/// The scene reports human-readable diagnostics (normalized gravity, body
/// counts) through this collaborator instead of writing to any global debug
/// surface. Hosts may route it to a UI overlay; the default routes to the log.
pub trait DebugSink {
    /// Report a labelled diagnostic value
    fn report(&mut self, label: &str, value: &str);
}

/// Debug sink backed by `log::debug!`
#[derive(Debug, Default)]
pub struct LogDebugSink;

impl DebugSink for LogDebugSink {
    fn report(&mut self, label: &str, value: &str) {
        log::debug!("{}: {}", label, value);
    }
}

/// Debug sink that discards everything
#[derive(Debug, Default)]
pub struct NullDebugSink;

impl DebugSink for NullDebugSink {
    fn report(&mut self, _label: &str, _value: &str) {}
}
