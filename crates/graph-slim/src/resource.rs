//! Loosely-typed resource records.
//!
//! Graph resources are schema-less JSON objects. [`Resource`] wraps one
//! object and exposes absence-safe field access through [`Field`], so
//! callers can probe optional fields without per-field declarations.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One schema-less JSON object returned by the Graph API.
///
/// Fields are read by name via [`Resource::get`]; an absent name yields an
/// absent [`Field`] rather than an error. Nested objects and collections
/// chain the same way.
///
/// # Example
///
/// ```
/// use graph_slim::Resource;
/// use serde_json::json;
///
/// let user = Resource::new(json!({
///     "id": "1",
///     "displayName": "Alice",
///     "manager": {"id": "2"}
/// }));
///
/// assert_eq!(user.get("displayName").as_str(), Some("Alice"));
/// assert_eq!(user.get("manager").get("id").as_str(), Some("2"));
/// assert!(user.get("mail").is_absent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resource(Value);

impl Resource {
    /// Wrap a JSON value as a resource record.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Read a field by name.
    ///
    /// An absent name yields an absent [`Field`]; probing optional fields
    /// never fails.
    pub fn get(&self, key: &str) -> Field<'_> {
        Field(self.0.get(key))
    }

    /// Get a reference to the inner JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume and return the inner JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

// Records serialize transparently back to their source JSON.
impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// A possibly-absent view of one field of a [`Resource`].
///
/// Access chains through nested objects and arrays, staying absent-safe at
/// every step: once a step is absent, every further step is absent too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<'a>(Option<&'a Value>);

impl<'a> Field<'a> {
    /// Read a nested field by name.
    pub fn get(&self, key: &str) -> Field<'a> {
        Field(self.0.and_then(|v| v.get(key)))
    }

    /// Read an element of a nested collection by index.
    pub fn at(&self, index: usize) -> Field<'a> {
        Field(self.0.and_then(|v| v.get(index)))
    }

    /// Whether the field was absent in the source object.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// The raw JSON value, if present.
    pub fn as_value(&self) -> Option<&'a Value> {
        self.0
    }

    /// The field as a string, if present and a string.
    pub fn as_str(&self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    /// The field as a signed integer, if present and representable.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.and_then(Value::as_i64)
    }

    /// The field as a float, if present and numeric.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.and_then(Value::as_f64)
    }

    /// The field as a boolean, if present and boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.0.and_then(Value::as_bool)
    }

    /// The field as an array, if present and an array.
    pub fn as_array(&self) -> Option<&'a Vec<Value>> {
        self.0.and_then(Value::as_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Resource {
        Resource::new(json!({
            "id": "42",
            "displayName": "Alice",
            "accountEnabled": true,
            "employeeId": 7,
            "manager": {"id": "2", "displayName": "Bob"},
            "phones": ["+1", "+2"],
            "mail": null
        }))
    }

    #[test]
    fn reads_present_fields() {
        let user = sample();
        assert_eq!(user.get("id").as_str(), Some("42"));
        assert_eq!(user.get("accountEnabled").as_bool(), Some(true));
        assert_eq!(user.get("employeeId").as_i64(), Some(7));
    }

    #[test]
    fn absent_field_is_absence_not_error() {
        let user = sample();
        assert!(user.get("missing").is_absent());
        assert_eq!(user.get("missing").as_str(), None);
    }

    #[test]
    fn null_field_is_present_but_typeless() {
        let user = sample();
        assert!(!user.get("mail").is_absent());
        assert_eq!(user.get("mail").as_str(), None);
    }

    #[test]
    fn nested_objects_chain() {
        let user = sample();
        assert_eq!(user.get("manager").get("displayName").as_str(), Some("Bob"));
    }

    #[test]
    fn absence_propagates_through_chains() {
        let user = sample();
        assert!(user.get("missing").get("deeper").at(3).is_absent());
    }

    #[test]
    fn arrays_index_safely() {
        let user = sample();
        assert_eq!(user.get("phones").at(1).as_str(), Some("+2"));
        assert!(user.get("phones").at(9).is_absent());
    }

    #[test]
    fn serializes_to_source_json() {
        let source = json!({"id": "1", "nested": {"a": [1, 2]}});
        let record = Resource::new(source.clone());
        assert_eq!(serde_json::to_value(&record).unwrap(), source);
    }
}
