//! Operational log stream for the bridge.
//!
//! The bridge reports create/destroy milestones and failure diagnostics
//! through an injected sink instead of calling a logging facade directly,
//! so embedders can redirect or silence the stream. The stream carries
//! diagnostics only; no part of the functional contract depends on it.

use tracing::{error, info};

/// Receiver for the bridge's informational and error records.
pub trait LogSink: Send + Sync {
    /// Informational record: an instance was created or destroyed.
    fn info(&self, message: &str);

    /// Failure record carrying the translated native diagnostic.
    fn error(&self, message: &str);
}

/// Default sink: forwards records to the `tracing` macros.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Discards every record.
pub struct NullSink;

impl LogSink for NullSink {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink_forwards() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        TracingSink.info("opus: encoder created: 48000 Hz, 1 ch (handle 1)");
        TracingSink.error("opus: encode failed: invalid argument");
    }

    #[test]
    fn test_null_sink_discards() {
        NullSink.info("ignored");
        NullSink.error("ignored");
    }
}
