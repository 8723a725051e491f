//! Errors raised by the linker.

use thiserror::Error;

/// Result type for linker operations.
pub type Result<T> = std::result::Result<T, LinkError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// An operation that acts on relations was given none.
    #[error("Invalid arguments: at least one relation is required")]
    InvalidArguments,

    /// A relation named in `links` has no entry in the side-table.
    #[error("Missing linked relation: {relation}")]
    MissingRelation { relation: String },

    /// No usable root attribute was found in an envelope.
    #[error("Root attribute not supported: {root}")]
    UnsupportedRoot { root: String },
}
