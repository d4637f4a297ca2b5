//! Required-field validation.

use std::collections::BTreeMap;

use crate::record::FormRecord;
use crate::schema::FormSchema;

/// Field name to the message shown next to that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Drop the error for `field`, returning whether there was one.
    pub fn clear_field(&mut self, field: &str) -> bool {
        self.errors.remove(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Report every required field of `schema` that is blank in `record`.
///
/// Optional fields are never reported, whatever they hold. A field missing
/// from the record counts as blank.
pub fn validate(schema: &FormSchema, record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for spec in schema.fields().iter().filter(|spec| spec.required) {
        let blank = record.get(&spec.name).map_or(true, |v| v.is_blank());
        if blank {
            errors.insert(spec.name.clone(), spec.message.clone());
        }
    }
    errors
}
