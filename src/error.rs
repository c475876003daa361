//! Error types for chunk indexing and asset resolution

use thiserror::Error;

/// Errors raised while constructing plugins or resolving an entry's assets
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A plugin that takes no options was constructed with some
    #[error("{plugin} takes no options")]
    Configuration { plugin: String },

    /// No plugin is registered under the configured name
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// The page's entry key was set to something other than a string
    #[error("only strings can be used with entry_key (found {found})")]
    InvalidEntryKey { found: String },

    /// No named chunk matches the requested entry
    #[error("no chunk named '{name}' in the chunk index")]
    EntryNotFound { name: String },

    /// A document was requested before the chunk graph was indexed
    #[error("chunk index has not been built for this compilation")]
    IndexNotBuilt,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
