//! Student profile model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named academic and personal fields describing the authenticated student.
///
/// The backend decides which fields are present, so the profile keeps the
/// raw mapping and offers text accessors on top of it. Field values may
/// arrive as strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    fields: Map<String, Value>,
}

impl Profile {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns a field rendered as text. Nulls, arrays and objects are
    /// treated as absent.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<String> {
        self.field("name")
    }

    pub fn student_id(&self) -> Option<String> {
        self.field("student_id")
    }

    pub fn email(&self) -> Option<String> {
        self.field("email")
    }

    pub fn program(&self) -> Option<String> {
        self.field("program_name").or_else(|| self.field("program"))
    }

    /// Iterates over every field in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Profile {
        serde_json::from_value(json!({
            "id": 1,
            "student_id": 202100001,
            "name": "Minhaj Ahmed",
            "program": "BSc in CSE",
            "photo": null
        }))
        .unwrap()
    }

    #[test]
    fn test_numeric_fields_render_as_text() {
        assert_eq!(sample().student_id(), Some("202100001".to_string()));
    }

    #[test]
    fn test_null_is_absent() {
        assert_eq!(sample().field("photo"), None);
        assert_eq!(sample().field("missing"), None);
    }

    #[test]
    fn test_program_prefers_full_name() {
        let profile = sample();
        assert_eq!(profile.program(), Some("BSc in CSE".to_string()));

        let mut fields = profile.as_map().clone();
        fields.insert("program_name".into(), json!("Bachelor of Science in CSE"));
        assert_eq!(
            Profile::new(fields).program(),
            Some("Bachelor of Science in CSE".to_string())
        );
    }

    #[test]
    fn test_transparent_round_trip_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["name"], "Minhaj Ahmed");
    }
}
