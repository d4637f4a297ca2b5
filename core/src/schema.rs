//! Declarative field schemas for the registration form variants.
//!
//! # Design
//! Every variant is an independent `FormSchema`: an ordered list of
//! `FieldSpec`s carrying the field's kind, whether it is required and the
//! message shown when a required field is left blank. Both value coercion
//! (`FormSchema::coerce`) and validation read from the same `FieldSpec`, so there is
//! no per-field special casing anywhere else. Variants never inherit fields
//! from one another; the JSON body always carries exactly the variant's keys.

use crate::error::FormError;
use crate::record::FieldValue;

/// The input kind of a field. Only `Integer` changes how raw text is stored;
/// the others keep the text as typed and exist so a front end can pick a
/// suitable input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    /// `YYYY-MM-DD`, as produced by a date picker.
    Date,
    /// `HH:MM`.
    Time,
    DateTime,
    /// Parsed to an integer; a cleared input becomes `null`.
    Integer,
}

impl FieldKind {
    /// What a stored value of this kind looks like, for error messages.
    pub fn expects(&self) -> &'static str {
        match self {
            FieldKind::Integer => "an integer or null",
            _ => "text",
        }
    }

    /// Short hint shown next to the prompt.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FieldKind::Date => Some("YYYY-MM-DD"),
            FieldKind::Time => Some("HH:MM"),
            FieldKind::DateTime => Some("YYYY-MM-DDTHH:MM"),
            FieldKind::Integer => Some("number"),
            FieldKind::Text | FieldKind::Email | FieldKind::Tel => None,
        }
    }
}

/// One field of a form variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown when the field is required and blank.
    pub message: String,
}

impl FieldSpec {
    /// An optional field labelled with its own name.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            message: format!("{name} is required"),
            name,
            kind,
            required: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark the field required, reporting `message` when it is left blank.
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.message = message.into();
        self
    }

    /// Mark the field optional. Blank values are accepted and never validated.
    pub fn nullable(mut self) -> Self {
        self.required = false;
        self
    }

    /// Whether `value` may be stored in this field.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self.kind, value),
            (FieldKind::Integer, FieldValue::Integer(_) | FieldValue::Null)
                | (
                    FieldKind::Text
                        | FieldKind::Email
                        | FieldKind::Tel
                        | FieldKind::Date
                        | FieldKind::Time
                        | FieldKind::DateTime,
                    FieldValue::Text(_)
                )
        )
    }

    /// The value a freshly displayed form holds for this field.
    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Integer => FieldValue::Null,
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// Names accepted by `FormSchema::variant`.
pub const VARIANTS: &[&str] = &["contact", "registration", "household", "appointment"];

/// An ordered set of fields making up one form variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. A later field with the same name replaces the earlier one.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Convert raw input text for `name` into the value stored in the record.
    ///
    /// Integer fields trim the input: blank becomes `Null`, digits become
    /// `Integer`. Text that is not a number is treated like a cleared number
    /// input and also becomes `Null`. Every other kind keeps the text as is.
    pub fn coerce(&self, name: &str, raw: &str) -> Result<FieldValue, FormError> {
        let spec = self
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        Ok(match spec.kind {
            FieldKind::Integer => match raw.trim() {
                "" => FieldValue::Null,
                digits => digits
                    .parse::<i64>()
                    .map(FieldValue::Integer)
                    .unwrap_or(FieldValue::Null),
            },
            _ => FieldValue::Text(raw.to_string()),
        })
    }

    /// Look up a built-in variant by name.
    pub fn variant(name: &str) -> Option<Self> {
        match name {
            "contact" => Some(Self::contact()),
            "registration" => Some(Self::registration()),
            "household" => Some(Self::household()),
            "appointment" => Some(Self::appointment()),
            _ => None,
        }
    }

    /// Name and phone are required; email may be left blank.
    pub fn contact() -> Self {
        Self::new("contact")
            .field(first_name())
            .field(last_name())
            .field(phone())
            .field(email())
    }

    /// Personal details with a postal address; email may be left blank.
    pub fn registration() -> Self {
        Self::new("registration")
            .field(first_name())
            .field(last_name())
            .field(email())
            .field(phone())
            .field(address())
            .field(zipcode())
            .field(FieldSpec::new("dob", FieldKind::Date).with_label("Date of Birth"))
    }

    /// Adds a house number that is sent as an integer or `null`.
    pub fn household() -> Self {
        Self::new("household")
            .field(first_name())
            .field(last_name())
            .field(phone())
            .field(email())
            .field(
                FieldSpec::new("house_no", FieldKind::Integer)
                    .with_label("House No.")
                    .nullable(),
            )
            .field(address())
            .field(zipcode())
    }

    /// Date of birth plus a preferred time and the moment the form was filled in.
    pub fn appointment() -> Self {
        Self::new("appointment")
            .field(first_name())
            .field(last_name())
            .field(phone())
            .field(
                FieldSpec::new("dob", FieldKind::Date)
                    .with_label("Date of Birth")
                    .required("Date of birth is required"),
            )
            .field(FieldSpec::new("time", FieldKind::Time).with_label("Time"))
            .field(FieldSpec::new("create_time", FieldKind::DateTime).with_label("Created At"))
    }
}

fn first_name() -> FieldSpec {
    FieldSpec::new("first_name", FieldKind::Text)
        .with_label("First Name")
        .required("First name is required")
}

fn last_name() -> FieldSpec {
    FieldSpec::new("last_name", FieldKind::Text)
        .with_label("Last Name")
        .required("Last name is required")
}

fn phone() -> FieldSpec {
    FieldSpec::new("phone", FieldKind::Tel)
        .with_label("Phone")
        .required("Phone number is required")
}

fn email() -> FieldSpec {
    FieldSpec::new("email", FieldKind::Email)
        .with_label("Email")
        .nullable()
}

fn address() -> FieldSpec {
    FieldSpec::new("address", FieldKind::Text).with_label("Address")
}

fn zipcode() -> FieldSpec {
    FieldSpec::new("zipcode", FieldKind::Text).with_label("Zipcode")
}
