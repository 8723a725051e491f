//! Envelope documents
//!
//! An envelope carries the primary resource under a root attribute, as a
//! one-element array, next to an optional `linked` side-table and an
//! optional opaque `meta` attribute:
//!
//! ```json
//! {
//!     "model": [{"id": 1, "links": {"tags": [5, 6]}}],
//!     "linked": {"tags": [{"id": 5}, {"id": 6}]}
//! }
//! ```

use crate::linker::error::{LinkError, Result};
use crate::linker::extract::{extract_linked, extract_links};
use crate::linker::resolve::resolve_links;
use crate::linker::types::{is_falsy, Object, LINKED_FIELD, LINKS_FIELD, META_FIELD};
use log::debug;
use serde_json::Value;

/// Wrap an embedded model into an envelope under `root`.
///
/// The named relations are replaced by links, and the side-table is added
/// under `linked` only when something was actually linked.
pub fn to_envelope<S: AsRef<str>>(
    model: Option<&Object>,
    relations: &[S],
    root: &str,
) -> Result<Option<Object>> {
    let Some(primary) = extract_links(model, relations)? else {
        return Ok(None);
    };

    let has_links = primary
        .get(LINKS_FIELD)
        .and_then(Value::as_object)
        .is_some_and(|links| !links.is_empty());

    let mut envelope = Object::new();
    envelope.insert(root.to_string(), Value::Array(vec![Value::Object(primary)]));

    if has_links {
        if let Some(linked) = extract_linked(model, relations)? {
            envelope.insert(LINKED_FIELD.to_string(), Value::Object(linked));
        }
    }

    Ok(Some(envelope))
}

/// Unwrap an envelope back into an embedded model.
///
/// The primary resource is read from `root`, or failing that from the
/// first attribute that is neither `linked` nor `meta`. An empty envelope
/// is handed back as is.
pub fn from_envelope(envelope: Option<&Object>, root: &str) -> Result<Option<Object>> {
    let Some(envelope) = envelope else {
        return Ok(None);
    };

    if envelope.is_empty() {
        return Ok(Some(envelope.clone()));
    }

    let data = root_value(envelope, root)
        .filter(|value| !is_falsy(value))
        .ok_or_else(|| LinkError::UnsupportedRoot {
            root: root.to_string(),
        })?;

    let primary = data
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_object);
    let linked = envelope.get(LINKED_FIELD).and_then(Value::as_object);

    resolve_links(primary, linked)
}

/// The value under the configured root, or under the first candidate attribute
fn root_value<'a>(envelope: &'a Object, root: &str) -> Option<&'a Value> {
    if let Some(value) = envelope.get(root) {
        return Some(value);
    }

    let (key, value) = envelope
        .iter()
        .find(|(key, _)| key.as_str() != LINKED_FIELD && key.as_str() != META_FIELD)?;
    debug!("root attribute {root} not found, using {key}");
    Some(value)
}
