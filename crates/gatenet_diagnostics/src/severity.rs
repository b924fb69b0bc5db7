//! How seriously a reported condition should be taken.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a [`Diagnostic`](crate::Diagnostic).
///
/// Declaration order is significance order: `Note < Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// The request was answered, but the answer hides information (e.g. a
    /// single source read from a multi-source net).
    Note,
    /// A rejected operation; the netlist is unchanged.
    Warning,
    /// A rejected operation whose code the configuration denies.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Returns the lowercase label used in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_rank_below_rejections() {
        assert!(Severity::Note < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(
            [Severity::Error, Severity::Note, Severity::Warning].iter().max(),
            Some(&Severity::Error)
        );
    }

    #[test]
    fn only_error_is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(!Severity::Note.is_error());
    }

    #[test]
    fn labels() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Note.as_str(), "note");
    }
}
