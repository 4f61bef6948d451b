//! Output helpers: diagnostics and tables.

pub mod diagnostic;
pub mod table;

pub use diagnostic::{ResourceDiagnostic, TemplateDiagnostic};
