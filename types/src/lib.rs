//! Core domain types for typolens.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod diagnostic;
mod ids;
mod position;
mod typo;

pub use diagnostic::{DIAGNOSTIC_CODE, DiagnosticsSnapshot, TypoDiagnostic};
pub use ids::{DocumentId, DocumentIdError};
pub use position::{LineIndex, Position, PositionEncoding, TextRange};
pub use typo::{Typo, TypoSeverity};
