//! Semantic lint rules over a type-annotated syntax tree.
//!
//! The crate consumes a parsed program and its resolved type index from
//! external collaborators and runs a fixed catalog of independent rules over
//! them, each flagging one pattern that is very likely a bug: patterns that
//! can never compile, layouts that can never parse, values the binary
//! encoder cannot serialize, sleeps that meant a larger unit, wait counters
//! registered too late or copied, and loops that spin forever doing nothing.
//!
//! Rules never fail and never fix anything; everything they find comes back
//! as a [`analysis::diagnostic::Diagnostic`] for the caller to present.

use thiserror::Error;

pub mod analysis;
pub mod formats;
pub mod syntax;
pub mod types;

pub use analysis::diagnostic::{Diagnostic, DiagnosticSeverity};
pub use analysis::external_api::AnalyzerConfig;
pub use analysis::SemanticAnalyzer;

#[derive(Debug, Error)]
pub enum GlintError {
    #[error("unknown rule id: {0}")]
    UnknownRule(String),
}
