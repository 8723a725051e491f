//! Linked → embedded: reassemble related objects from a side-table

use crate::linker::error::{LinkError, Result};
use crate::linker::types::{id_of, Link, Object, LINKS_FIELD};
use log::{debug, trace};
use serde_json::Value;

/// Replace the identifier references in `model.links` with the full
/// objects held in `linked`.
///
/// A list of identifiers is resolved one by one against the candidates of
/// that relation, matching on `id`; an identifier with no candidate leaves
/// a `null` in its place. A single identifier is replaced by the whole
/// side-table entry for the relation. The `links` map is dropped once every
/// relation is resolved.
///
/// Returns `Ok(None)` without a model, and the model unchanged when there
/// is no side-table or nothing to resolve.
pub fn resolve_links(model: Option<&Object>, linked: Option<&Object>) -> Result<Option<Object>> {
    let Some(model) = model else {
        return Ok(None);
    };

    let (Some(linked), Some(links)) = (linked, model.get(LINKS_FIELD)) else {
        return Ok(Some(model.clone()));
    };

    let mut copy = model.clone();

    if let Value::Object(links) = links {
        for (relation, ids) in links {
            let candidates = linked
                .get(relation)
                .ok_or_else(|| LinkError::MissingRelation {
                    relation: relation.clone(),
                })?;

            let resolved = match Link::from_value(ids) {
                Link::Many(ids) => Value::Array(
                    ids.iter()
                        .map(|id| find_by_id(relation, candidates, id))
                        .collect(),
                ),
                Link::One(_) => {
                    debug!("substituting whole linked entry for single relation {relation}");
                    candidates.clone()
                }
            };

            copy.insert(relation.clone(), resolved);
        }
    }

    copy.shift_remove(LINKS_FIELD);
    Ok(Some(copy))
}

/// Look up the candidate whose `id` equals `id`, `null` on a miss
fn find_by_id(relation: &str, candidates: &Value, id: &Value) -> Value {
    let found = match candidates {
        Value::Array(items) => items
            .iter()
            .find(|item| item.as_object().is_some_and(|obj| id_of(obj) == *id)),
        Value::Object(obj) if id_of(obj) == *id => Some(candidates),
        _ => None,
    };

    found.cloned().unwrap_or_else(|| {
        trace!("no linked {relation} with id {id}");
        Value::Null
    })
}
