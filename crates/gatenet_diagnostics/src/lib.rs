//! Structured diagnostics for soft failures in the netlist core.
//!
//! Netlist operations never panic or return rich errors on rejected requests;
//! they return a failure indicator and emit a [`Diagnostic`] into an injected
//! [`DiagnosticSink`]. Tests capture the sink deterministically, and front ends
//! format its contents with a [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode, ParseCodeError};
pub use diagnostic::Diagnostic;
pub use label::{EntityRef, Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
