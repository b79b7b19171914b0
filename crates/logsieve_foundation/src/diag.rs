//! Per-context diagnostics handlers.
//!
//! The host application may install a debug sink and an error sink on the
//! context. Both are optional and infallible. These are deliberately kept on
//! the context rather than in process-wide state so that two rulebases loaded
//! side by side report independently.

use std::fmt;

/// Debug message sink.
pub type DebugHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Error report sink. Receives an error code and a message.
pub type ErrorHandler = Box<dyn Fn(u32, &str) + Send + Sync>;

/// Holder for the optional diagnostics handlers of a context.
#[derive(Default)]
pub struct Diagnostics {
    debug: Option<DebugHandler>,
    error: Option<ErrorHandler>,
}

impl Diagnostics {
    /// Creates an empty handler set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the debug sink.
    pub fn on_debug(&mut self, handler: DebugHandler) {
        self.debug = Some(handler);
    }

    /// Installs the error sink.
    pub fn on_error(&mut self, handler: ErrorHandler) {
        self.error = Some(handler);
    }

    /// Returns true if a debug sink is installed.
    ///
    /// Callers producing expensive debug strings should check this first.
    #[must_use]
    pub fn wants_debug(&self) -> bool {
        self.debug.is_some()
    }

    /// Emits a debug message to the installed sink, if any.
    pub fn debug(&self, msg: &str) {
        tracing::debug!(target: "logsieve", "{msg}");
        if let Some(sink) = &self.debug {
            sink(msg);
        }
    }

    /// Emits an error report to the installed sink, if any.
    pub fn error(&self, code: u32, msg: &str) {
        tracing::error!(target: "logsieve", code, "{msg}");
        if let Some(sink) = &self.error {
            sink(code, msg);
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("debug", &self.debug.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
