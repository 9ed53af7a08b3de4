//! Debug-message sink injected into builders and invokers.
//!
//! Replaces a process-wide debug hook with a capability passed at
//! construction time. The default is a no-op; embedders override it to
//! route messages wherever they like.

/// Receives debug messages from argument builders and invokers.
///
/// Emission is observability only and never affects control flow.
pub trait DebugSink: Send + Sync {
    /// Deliver one debug message.
    fn debug(&self, message: &str);
}

/// Discards every message. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn debug(&self, _message: &str) {}
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }
}

/// Adapts a single-argument closure into a sink.
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F> DebugSink for FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn debug(&self, message: &str) {
        (self.0)(message);
    }
}
