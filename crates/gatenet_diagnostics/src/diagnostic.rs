//! Structured diagnostic messages with severity, codes, and entity labels.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message describing why a netlist operation was
/// rejected or answered ambiguously.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Entities involved in the failure.
    pub labels: Vec<Label>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic with an explicit severity.
    pub fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Creates a new note diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, code, message)
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::EntityRef;

    #[test]
    fn create_warning() {
        let diag = Diagnostic::warning(DiagnosticCode::ALREADY_OCCUPIED, "pin already driven");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "pin already driven");
        assert_eq!(format!("{}", diag.code), "C103");
    }

    #[test]
    fn create_note() {
        let diag = Diagnostic::note(DiagnosticCode::AMBIGUOUS_SOURCE, "multiple sources");
        assert_eq!(diag.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::error(DiagnosticCode::ID_CONFLICT, "id 5 taken")
            .with_label(Label::primary(EntityRef::gate(5), "requested id"))
            .with_note("released identifiers are never reused");
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
        assert!(diag.severity.is_error());
    }
}
