//! Error types for loading translation resources.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading a resource file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading or inspecting a resource.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The resource is not valid TOML or does not match the resource shape.
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Following `base` references led back to a resource already in the
    /// chain.
    #[error("cyclic base chain: {}", chain.join(" -> "))]
    CyclicBase { chain: Vec<String> },

    /// The tag cannot name a resource file.
    #[error("invalid language tag '{tag}'")]
    InvalidTag { tag: String },
}
