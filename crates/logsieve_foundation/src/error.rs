//! Error types for the Logsieve system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use thiserror::Error;

/// The main error type for Logsieve operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The serialized parser configuration that triggered the error, if any.
    pub config: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, config: None }
    }

    /// Attaches the offending parser configuration to this error.
    #[must_use]
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Creates a "parser type missing" error.
    #[must_use]
    pub fn missing_type() -> Self {
        Self::new(ErrorKind::MissingType)
    }

    /// Creates an unknown motif error.
    #[must_use]
    pub fn unknown_motif(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownMotif(name.into()))
    }

    /// Creates an unknown component error.
    #[must_use]
    pub fn unknown_component(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownComponent(name.into()))
    }

    /// Creates a malformed alternative error.
    #[must_use]
    pub fn bad_alternative(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadAlternative(detail.into()))
    }

    /// Creates a bad motif parameter error.
    #[must_use]
    pub fn bad_motif_config(motif: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadMotifConfig {
            motif: motif.into(),
            detail: detail.into(),
        })
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateComponent(name.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error stems from a malformed rulebase
    /// configuration (as opposed to an internal invariant violation).
    #[must_use]
    pub fn is_bad_config(&self) -> bool {
        !matches!(self.kind, ErrorKind::Internal(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A parser configuration object has no `type` key.
    #[error("parser type missing in config")]
    MissingType,

    /// The `type` key names a motif the registry does not know.
    #[error("invalid field type '{0}'")]
    UnknownMotif(String),

    /// A `@name` reference points at a component that was never defined.
    #[error("unknown user-defined type '{0}'")]
    UnknownComponent(String),

    /// An `alternative` configuration is missing its `parser` array.
    #[error("malformed alternative: {0}")]
    BadAlternative(String),

    /// A motif constructor rejected its parameters.
    #[error("bad configuration for motif '{motif}': {detail}")]
    BadMotifConfig {
        /// The motif whose constructor failed.
        motif: String,
        /// What was wrong with the parameters.
        detail: String,
    },

    /// A component with this name already exists.
    #[error("duplicate component '{0}'")]
    DuplicateComponent(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
