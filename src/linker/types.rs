use serde_json::{Map, Value};

/// A JSON object: primary resources, nested related objects, side-tables and envelopes
pub type Object = Map<String, Value>;

/// Field holding the identifier of every nested object
pub const ID_FIELD: &str = "id";

/// Field added to a primary object to hold its identifier references
pub const LINKS_FIELD: &str = "links";

/// Envelope attribute holding the side-table of related objects
pub const LINKED_FIELD: &str = "linked";

/// Envelope attribute passed through untouched
pub const META_FIELD: &str = "meta";

/// The value of a relation field on an embedded object.
///
/// Cardinality comes from the shape of the value when the object is
/// transformed, and is carried through as the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation<'a> {
    /// A single nested object
    One(&'a Object),
    /// An ordered sequence of nested objects
    Many(&'a [Value]),
}

impl<'a> Relation<'a> {
    /// Classify a relation field value.
    ///
    /// Returns `None` for falsy values and for scalars, which are not
    /// nested objects and stay where they are.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        if is_falsy(value) {
            return None;
        }

        match value {
            Value::Object(obj) => Some(Relation::One(obj)),
            Value::Array(items) => Some(Relation::Many(items)),
            _ => None,
        }
    }

    /// Replace each nested object with its identifier
    pub fn to_link(self) -> Link {
        match self {
            Relation::One(obj) => Link::One(id_of(obj)),
            Relation::Many(items) => Link::Many(
                items
                    .iter()
                    .map(|item| item.as_object().map(id_of).unwrap_or(Value::Null))
                    .collect(),
            ),
        }
    }
}

/// An entry of the `links` map: the identifier(s) standing in for a relation
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    One(Value),
    Many(Vec<Value>),
}

impl Link {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(ids) => Link::Many(ids.clone()),
            other => Link::One(other.clone()),
        }
    }
}

impl From<Link> for Value {
    fn from(link: Link) -> Self {
        match link {
            Link::One(id) => id,
            Link::Many(ids) => Value::Array(ids),
        }
    }
}

/// Identifier of a nested object, `null` when it has none
pub fn id_of(obj: &Object) -> Value {
    obj.get(ID_FIELD).cloned().unwrap_or(Value::Null)
}

/// Truthiness as document APIs treat it: `null`, `false`, zero, `""` and `[]`
/// count as "nothing there". Objects are always truthy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!(0.0)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!([])));

        assert!(!is_falsy(&json!({})));
        assert!(!is_falsy(&json!(1)));
        assert!(!is_falsy(&json!("a")));
        assert!(!is_falsy(&json!([0])));
    }

    #[test]
    fn test_relation_cardinality() {
        let single = json!({"id": 9, "name": "A"});
        let many = json!([{"id": 5}, {"id": 6}, {"name": "no id"}]);

        assert_eq!(
            Relation::from_value(&single).unwrap().to_link(),
            Link::One(json!(9))
        );
        assert_eq!(
            Relation::from_value(&many).unwrap().to_link(),
            Link::Many(vec![json!(5), json!(6), Value::Null])
        );
        assert!(Relation::from_value(&json!(42)).is_none());
        assert!(Relation::from_value(&json!([])).is_none());
    }

    #[test]
    fn test_link_into_value() {
        let link = Link::from_value(&json!([1, 2]));
        assert_eq!(Value::from(link), json!([1, 2]));

        let link = Link::from_value(&json!("abc"));
        assert_eq!(link, Link::One(json!("abc")));
    }
}
