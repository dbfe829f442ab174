//! Diagnostic sinks for non-fatal matching errors.
//!
//! Target resolution can hit recoverable problems (an invalid regex in a
//! configured target). Those must reach an operator without failing the
//! request, so the resolver reports through a sink instead of returning an
//! error.

use std::sync::Mutex;

/// Receives recoverable warnings from route resolution.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: String);
}

/// Forwards warnings to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: String) {
        tracing::warn!(%message, "route resolution warning");
    }
}

/// Buffers warnings so callers (admin preview, tests) can surface them.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("diagnostic sink mutex poisoned")
            .clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, message: String) {
        self.messages
            .lock()
            .expect("diagnostic sink mutex poisoned")
            .push(message);
    }
}
