//! Conversion diagnostics.
//!
//! Malformed input is reported, never raised: every diagnostic is recorded
//! where it is detected and forwarded to a [`DiagnosticSink`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Severity of a conversion diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Recoverable data-quality issue; the output degrades but stays usable.
    Warning,
    /// Structural conflict in the input, e.g. a symbol bound twice.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A recorded diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Receives diagnostics from the resolver and map builder.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, severity: Severity, message: &str);
}

/// Sink that keeps every diagnostic in emission order and forwards it to the
/// `log` facade.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all diagnostics emitted so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning => log::warn!(target: "collada_materials", "{message}"),
            Severity::Error => log::error!(target: "collada_materials", "{message}"),
        }
        self.lock().push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}
