//! Claim form types, field templates and extracted field maps.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::forms::templates;

/// The three statutory FRA claim templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Claim form for rights to forest land (individual rights).
    #[serde(rename = "FORM_A")]
    FormA,
    /// Claim form for community rights.
    #[serde(rename = "FORM_B")]
    FormB,
    /// Claim form for rights to community forest resource.
    #[serde(rename = "FORM_C")]
    FormC,
}

impl FormType {
    pub const ALL: [FormType; 3] = [FormType::FormA, FormType::FormB, FormType::FormC];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::FormA => "FORM_A",
            FormType::FormB => "FORM_B",
            FormType::FormC => "FORM_C",
        }
    }

    /// Accepts `FORM_A`, `form-a`, `form a` or just `a` (any case).
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "forma" | "a" => Some(FormType::FormA),
            "formb" | "b" => Some(FormType::FormB),
            "formc" | "c" => Some(FormType::FormC),
            _ => None,
        }
    }

    /// Human-readable title of the statutory form.
    pub fn title(&self) -> &'static str {
        match self {
            FormType::FormA => "Claim Form for Rights to Forest Land",
            FormType::FormB => "Claim Form for Community Rights",
            FormType::FormC => "Claim Form for Rights to Community Forest Resource",
        }
    }

    /// Ordered field template for this form.
    pub fn template(&self) -> &'static [FieldDescriptor] {
        templates::template_for(*self)
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a form's field template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

impl FieldDescriptor {
    pub const fn new(key: &'static str, label: &'static str, required: bool) -> Self {
        Self {
            key,
            label,
            required,
        }
    }
}

/// Attempt to set a key that the active form template does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{key}' for {form_type}")]
pub struct UnknownField {
    pub key: String,
    pub form_type: FormType,
}

/// Extracted values keyed by template field key.
///
/// Always holds every key of its form's template; fields that were not found
/// are present as empty strings. Serializes its values in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    form_type: FormType,
    values: BTreeMap<String, String>,
}

impl FieldMap {
    /// Map with every template key of `form_type` set to an empty string.
    pub fn seeded(form_type: FormType) -> Self {
        let values = form_type
            .template()
            .iter()
            .map(|field| (field.key.to_string(), String::new()))
            .collect();
        Self { form_type, values }
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// Value for `key`, or an empty string if the key is not in the template.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.value(key).trim().is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields in template order, paired with their current values.
    pub fn iter_template(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &str)> + '_ {
        self.form_type
            .template()
            .iter()
            .map(move |field| (field, self.value(field.key)))
    }

    /// Template fields that are required but still blank.
    pub fn missing_required(&self) -> Vec<&'static FieldDescriptor> {
        self.iter_template()
            .filter(|(field, value)| field.required && value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    /// Set a field only if it belongs to the template and is still blank.
    /// Returns whether the value was stored.
    pub(crate) fn fill(&mut self, key: &str, value: &str) -> bool {
        match self.values.get_mut(key) {
            Some(current) if current.is_empty() => {
                *current = value.to_string();
                true
            }
            _ => false,
        }
    }

    /// Whether `fill` would store a value for `key`.
    pub(crate) fn accepts(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| v.is_empty())
    }

    /// Overwrite a field (user edit). Keys outside the template are rejected.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        match self.values.get_mut(key) {
            Some(current) => {
                *current = value.into();
                Ok(())
            }
            None => Err(UnknownField {
                key: key.to_string(),
                form_type: self.form_type,
            }),
        }
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldMap", 2)?;
        state.serialize_field("form_type", &self.form_type)?;
        state.serialize_field("values", &TemplateOrder(self))?;
        state.end()
    }
}

struct TemplateOrder<'a>(&'a FieldMap);

impl Serialize for TemplateOrder<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter_template().map(|(field, value)| (field.key, value)))
    }
}
