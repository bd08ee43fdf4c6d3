/// Surfaces per-pixel, per-frame, and per-thread errors to whichever
/// collaborator presents them (spec 7: "per-frame and per-thread errors
/// surface through the reconfiguration channel"). The core only reports;
/// it never decides how errors are displayed or persisted.
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Discards every report. Selected when no reconfiguration collaborator
/// is attached.
pub struct NullErrorSink;

impl ErrorSink for NullErrorSink {
    fn report(&self, _message: &str) {}
}

/// Forwards every report to the `log` facade at `warn` level, for
/// binaries that have no dedicated reconfiguration channel wired up yet
/// but still want the errors visible somewhere.
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, message: &str) {
        log::warn!("{message}");
    }
}
