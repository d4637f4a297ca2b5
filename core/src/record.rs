//! The values a form currently holds.
//!
//! # Design
//! `FormRecord` keeps its fields in schema order and serializes as a flat
//! JSON object with exactly those keys, which is the request body. Updates
//! go through `with_value`, which returns a new record and leaves the
//! original untouched.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::FormError;
use crate::schema::FormSchema;

/// A single field value as it appears in the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Blank text (after trimming) and `Null` count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Integer(_) => false,
            FieldValue::Null => true,
        }
    }

    /// The value rendered back into an input control.
    pub fn as_input(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

/// Current values of every field in one form variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    fields: Vec<(String, FieldValue)>,
}

impl FormRecord {
    /// A record holding each field's default value.
    pub fn defaults(schema: &FormSchema) -> Self {
        Self {
            fields: schema
                .fields()
                .iter()
                .map(|spec| (spec.name.clone(), spec.default_value()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// A copy of this record with `name` set to `value`.
    pub fn with_value(&self, name: &str, value: FieldValue) -> Result<Self, FormError> {
        let mut next = self.clone();
        let slot = next
            .fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        slot.1 = value;
        Ok(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
