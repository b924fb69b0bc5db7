//! Thread-safe diagnostic accumulator injected into each netlist.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A thread-safe accumulator for diagnostics emitted by netlist operations.
///
/// Several netlists on different threads may share one sink. The error count
/// is tracked atomically for fast `has_errors` checks without locking the
/// diagnostic vector. Codes in the deny set are escalated to
/// [`Severity::Error`] on emission.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
    denied: HashSet<DiagnosticCode>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
            denied: HashSet::new(),
        }
    }

    /// Creates a sink that escalates the given codes to errors.
    pub fn with_denied(codes: impl IntoIterator<Item = DiagnosticCode>) -> Self {
        Self {
            denied: codes.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Emits a diagnostic into the sink.
    ///
    /// Denied codes are raised to [`Severity::Error`] first; the error count is
    /// incremented atomically for every error-severity diagnostic.
    pub fn emit(&self, mut diag: Diagnostic) {
        if self.denied.contains(&diag.code) {
            diag.severity = Severity::Error;
        }
        if diag.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(diag);
    }

    /// Returns `true` if any error-severity diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns how many accumulated diagnostics carry `code`.
    pub fn count_code(&self, code: DiagnosticCode) -> usize {
        self.lock().iter().filter(|d| d.code == code).count()
    }

    /// Returns `true` if a diagnostic with `code` has been emitted and not yet taken.
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.count_code(code) > 0
    }

    /// Returns the number of accumulated diagnostics.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no diagnostics are pending.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticSink")
            .field("pending", &self.len())
            .field("error_count", &self.error_count())
            .finish()
    }
}
