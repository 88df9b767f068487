//! Compile-time-selectable sink for construction-failure diagnostics.
//!
//! Construction failures are reported through an injected [`Reporter`]
//! rather than a global, to avoid process-wide state. [`NoopReporter`] is
//! the default; building with the `tracing` feature makes [`TracingReporter`]
//! available for callers who want the failures surfaced through their
//! existing `tracing` subscriber.

/// Receives a tag and a human-readable detail string for every construction
/// failure. Implementations must be safe to call from any thread.
pub trait Reporter: Send + Sync {
    /// `tag` is a stable, machine-greppable identifier (e.g.
    /// `"INBOX_INCORRECT_SIZE"`); `detail` is free-form context.
    fn report(&self, tag: &'static str, detail: &str);
}

/// Discards every report. The default for all constructors.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _tag: &'static str, _detail: &str) {}
}

/// Forwards reports to `tracing::warn!`. Only compiled in under the
/// `tracing` feature.
#[cfg(feature = "tracing")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

#[cfg(feature = "tracing")]
impl Reporter for TracingReporter {
    fn report(&self, tag: &'static str, detail: &str) {
        tracing::warn!(tag, detail, "inbox/node construction failed");
    }
}
