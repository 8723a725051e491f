//! Linking and embedding of related JSON objects
//!
//! This module moves related objects between an "embedded" form, where they
//! are nested in the fields of a primary object, and a "linked" form, where
//! the primary object only keeps their identifiers in a `links` map and the
//! objects themselves travel in a separate side-table keyed by relation.
//!
//! Identifiers are always read from the `id` field of nested objects.

pub mod types;
pub mod error;
pub mod config;
pub mod extract;
pub mod resolve;
pub mod envelope;
pub mod transformer;
pub mod writer;

pub use types::{Link, Object, Relation, ID_FIELD, LINKED_FIELD, LINKS_FIELD, META_FIELD};
pub use error::{LinkError, Result};
pub use config::LinkerConfig;
pub use extract::{extract_linked, extract_links};
pub use resolve::resolve_links;
pub use envelope::{from_envelope, to_envelope};
pub use transformer::JsonLinker;
pub use writer::DocumentWriter;
