//! Error taxonomy for hashing and verification.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::provision::ProvisionError;

pub type Result<T> = std::result::Result<T, Argon2Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The possible kinds of [`Argon2Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The native library could not be resolved, fetched or loaded.
    UnmeetPermission,
    /// Caller-supplied data failed a precondition. Never reaches the
    /// native side.
    InvalidInput,
    /// The native backend reported a failure, or answered with something
    /// that cannot be read.
    Native,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnmeetPermission => write!(f, "UnmeetPermission"),
            ErrorKind::InvalidInput => write!(f, "InvalidInput"),
            ErrorKind::Native => write!(f, "Native"),
        }
    }
}

/// Diagnostic string reported by the native backend, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NativeDiagnostic(pub String);

#[derive(Debug, Error)]
#[error("Argon2Error({kind}): {message}")]
pub struct Argon2Error {
    kind:    ErrorKind,
    message: String,
    #[source]
    source:  Option<BoxError>,
}

impl Argon2Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Failure reported by the native `operation`.
    pub(crate) fn native(operation: &str, diagnostic: String) -> Self {
        Self::new(
            ErrorKind::Native,
            format!("An error occurred executing `{operation}`: {diagnostic}"),
        )
        .with_source(NativeDiagnostic(diagnostic))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The backend's own diagnostic, for [`ErrorKind::Native`] failures it
    /// reported itself.
    pub fn native_diagnostic(&self) -> Option<&str> {
        self.source
            .as_deref()
            .and_then(|e| e.downcast_ref::<NativeDiagnostic>())
            .map(|d| d.0.as_str())
    }

    /// Whether the failure is a recorded library load failure. Retrying in
    /// the same process returns the same error.
    pub fn is_fatal(&self) -> bool {
        self.kind == ErrorKind::UnmeetPermission
    }
}

impl From<Arc<ProvisionError>> for Argon2Error {
    fn from(err: Arc<ProvisionError>) -> Self {
        Self::new(
            ErrorKind::UnmeetPermission,
            format!("native library unavailable: {err}"),
        )
        .with_source(err)
    }
}
