//! Translators and the collaborators that produce them.
//!
//! A [`Translator`] renders a message by key. [`HierarchicalTranslator`]
//! chains its own templates to a base translator, [`Bundle`] loads and caches
//! translators from a directory of TOML resources, and the negotiation
//! helpers pick a language from an `Accept-Language` header.

mod bundle;
mod error;
mod negotiation;
mod translator;

pub use bundle::{Bundle, Resource};
pub use error::LoadError;
pub use negotiation::{LanguageRange, negotiate, parse_accept_language, preferred_language};
pub use translator::{HierarchicalTranslator, NoopTranslator, Translator};
