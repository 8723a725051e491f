//! Embedded → linked: identifier extraction and side-table projection

use crate::linker::error::{LinkError, Result};
use crate::linker::types::{Object, Relation, LINKS_FIELD};
use serde_json::Value;

/// Replace embedded relation objects with links by id.
///
/// Returns a copy of `model` where every named relation that is present
/// and truthy has been moved out of the object and into its `links` map,
/// as a single identifier or an ordered list of identifiers. New links
/// are merged into a `links` map the model already has; otherwise the map
/// is only added if at least one relation was linked.
///
/// Returns `Ok(None)` if there is no model.
pub fn extract_links<S: AsRef<str>>(
    model: Option<&Object>,
    relations: &[S],
) -> Result<Option<Object>> {
    let Some(model) = model else {
        return Ok(None);
    };

    if relations.is_empty() {
        return Err(LinkError::InvalidArguments);
    }

    let mut copy = model.clone();
    let mut links = model.get(LINKS_FIELD).and_then(Value::as_object).cloned();

    for relation in relations {
        let name = relation.as_ref();
        // scalars are not nested objects and stay on the copy as they are
        let Some(kind) = model.get(name).and_then(Relation::from_value) else {
            continue;
        };

        links
            .get_or_insert_with(Object::new)
            .insert(name.to_string(), kind.to_link().into());
        copy.shift_remove(name);
    }

    if let Some(links) = links {
        copy.insert(LINKS_FIELD.to_string(), Value::Object(links));
    }

    Ok(Some(copy))
}

/// Collect the embedded relation objects of `model` into a side-table.
///
/// The side-table keeps the named relations in the order given, with
/// their nested values untouched. Relations that are absent or falsy on
/// the model are left out, matching what [`extract_links`] links.
///
/// Returns `Ok(None)` if there is no model.
pub fn extract_linked<S: AsRef<str>>(
    model: Option<&Object>,
    relations: &[S],
) -> Result<Option<Object>> {
    let Some(model) = model else {
        return Ok(None);
    };

    if relations.is_empty() {
        return Err(LinkError::InvalidArguments);
    }

    let linked = relations
        .iter()
        .filter_map(|relation| {
            let name = relation.as_ref();
            model
                .get(name)
                .filter(|value| Relation::from_value(value).is_some())
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect();

    Ok(Some(linked))
}
