//! Item abstraction shared by every list component.
//!
//! The list components never look inside an item beyond two things: its
//! stable identifier and the textual value of a named (possibly dotted)
//! field. [`Item`] captures exactly that, and [`Record`] provides a ready-made
//! JSON-backed implementation for collections whose shape is only known at
//! runtime.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Trait for records that can be listed, filtered, selected and deleted.
///
/// Identity is by [`Item::id`]; no other uniqueness is assumed.
///
/// # Examples
///
/// ```
/// use backoffice_widgets::item::Item;
///
/// #[derive(Clone)]
/// struct Owner {
///     id: u32,
///     name: String,
/// }
///
/// impl Item for Owner {
///     fn id(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn field_text(&self, path: &str) -> Option<String> {
///         match path {
///             "name" => Some(self.name.clone()),
///             _ => None,
///         }
///     }
/// }
///
/// let owner = Owner { id: 7, name: "Ada".into() };
/// assert_eq!(owner.field_text("name").as_deref(), Some("Ada"));
/// assert_eq!(owner.field_text("email"), None);
/// ```
pub trait Item: Clone + Send + Sync + 'static {
    /// Returns the stable identifier of this item.
    fn id(&self) -> String;

    /// Returns the textual value stored at `path`.
    ///
    /// Paths use dots to reach into nested values (`"property.name"`). A
    /// missing segment anywhere along the path yields `None`.
    fn field_text(&self, path: &str) -> Option<String>;
}

/// A JSON-backed item: an identifier plus arbitrary named fields.
///
/// Deserialises from the objects a REST collection endpoint returns. The
/// identifier may be spelled `id` or `_id` and may be a string or a number.
/// When both are present `id` wins and `_id` is dropped.
///
/// ```
/// use backoffice_widgets::item::{Item, Record};
///
/// let record: Record = serde_json::from_str(
///     r#"{"_id": 42, "name": "Villa", "owner": {"name": "Ada"}}"#,
/// ).unwrap();
///
/// assert_eq!(record.id(), "42");
/// assert_eq!(record.field_text("owner.name").as_deref(), Some("Ada"));
/// assert_eq!(record.field_text("owner.email"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Stable identifier.
    pub id: String,
    /// Every other field of the object.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Adds or replaces a top-level field (builder pattern).
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Resolves a dotted path through nested objects.
    ///
    /// Returns `None` when any intermediate value is missing or is not an
    /// object.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl Item for Record {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn field_text(&self, path: &str) -> Option<String> {
        if path == "id" && !self.fields.contains_key("id") {
            return Some(self.id.clone());
        }
        self.lookup(path).and_then(value_text)
    }
}

/// Renders a scalar JSON value as text. Compound values and null have no
/// textual form.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let id = fields.remove("id").filter(|v| !v.is_null());
        let underscore_id = fields.remove("_id").filter(|v| !v.is_null());
        let id = match id.or(underscore_id) {
            Some(value) => id_text(value).map_err(<D::Error as de::Error>::custom)?,
            None => return Err(<D::Error as de::Error>::missing_field("id")),
        };
        Ok(Self { id, fields })
    }
}

fn id_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("expected string or number id, found {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Record {
        serde_json::from_value(json!({
            "id": "p-1",
            "name": "Harbour View",
            "price": 420000,
            "featured": true,
            "tags": ["sea"],
            "owner": { "name": "Ada Smith", "contact": { "email": "ada@x.com" } },
            "agent": null
        }))
        .unwrap()
    }

    #[test]
    fn test_lookup_nested_paths() {
        let record = sample();
        assert_eq!(
            record.field_text("owner.contact.email").as_deref(),
            Some("ada@x.com")
        );
        assert_eq!(record.field_text("owner.name").as_deref(), Some("Ada Smith"));
    }

    #[test]
    fn test_missing_intermediate_yields_none() {
        let record = sample();
        assert_eq!(record.field_text("manager.name"), None);
        assert_eq!(record.field_text("agent.name"), None);
        assert_eq!(record.field_text("name.first"), None);
    }

    #[test]
    fn test_scalar_formatting() {
        let record = sample();
        assert_eq!(record.field_text("price").as_deref(), Some("420000"));
        assert_eq!(record.field_text("featured").as_deref(), Some("true"));
        assert_eq!(record.field_text("tags"), None);
        assert_eq!(record.field_text("owner"), None);
    }

    #[test]
    fn test_id_is_addressable_as_field() {
        let record = Record::new("c-9").with_field("name", "Bob");
        assert_eq!(record.field_text("id").as_deref(), Some("c-9"));
    }

    #[test]
    fn test_numeric_and_underscore_ids() {
        let a: Record = serde_json::from_str(r#"{"id": 12, "name": "x"}"#).unwrap();
        let b: Record = serde_json::from_str(r#"{"_id": "abc"}"#).unwrap();
        assert_eq!(a.id(), "12");
        assert_eq!(b.id(), "abc");
        assert!(serde_json::from_str::<Record>(r#"{"id": [1]}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"name": "no id"}"#).is_err());
    }

    #[test]
    fn test_id_and_underscore_id_together() {
        let record: Record =
            serde_json::from_str(r#"{"_id": "a1", "id": "a1", "name": "x"}"#).unwrap();
        assert_eq!(record.id(), "a1");
        assert_eq!(record.field_text("name").as_deref(), Some("x"));
        assert!(!record.fields.contains_key("_id"));

        let mixed: Record = serde_json::from_str(r#"{"id": null, "_id": 7}"#).unwrap();
        assert_eq!(mixed.id(), "7");

        let batch: Vec<Record> = serde_json::from_str(
            r#"[{"_id": "a", "id": "a"}, {"_id": "b"}, {"id": 3}]"#,
        )
        .unwrap();
        let ids: Vec<String> = batch.iter().map(Item::id).collect();
        assert_eq!(ids, ["a", "b", "3"]);
    }

    #[test]
    fn test_serialises_id_with_fields() {
        let json = serde_json::to_value(Record::new("r1").with_field("name", "Ada")).unwrap();
        assert_eq!(json, json!({"id": "r1", "name": "Ada"}));
        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, Record::new("r1").with_field("name", "Ada"));
    }
}
