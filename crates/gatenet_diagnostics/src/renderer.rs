//! Diagnostic rendering for human-readable output.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders every diagnostic, one after another.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags.iter().map(|d| self.render(d)).collect()
    }
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[C103]: pin `I0` of gate #2 is already a destination of net #7
///   --> net #9: target net
///   ::: net #7: occupied here
///    = note: a pin may receive at most one net
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in the header line.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let plain = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return plain;
        }
        let ansi = match diag.severity {
            crate::Severity::Error => "31",
            crate::Severity::Warning => "33",
            crate::Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{plain}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        for label in &diag.labels {
            let arrow = match label.style {
                LabelStyle::Primary => "-->",
                LabelStyle::Secondary => ":::",
            };
            if label.message.is_empty() {
                out.push_str(&format!("  {arrow} {}\n", label.entity));
            } else {
                out.push_str(&format!("  {arrow} {}: {}\n", label.entity, label.message));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        out
    }
}
