//! Core type system for tfplug
//!
//! This module provides the value model seen by plan modifiers: the untyped
//! Dynamic representation, typed primitive values with an explicit null
//! marker, attribute paths and diagnostics.

use crate::error::{Result, TfplugError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dynamic represents Terraform values that can be of any type
/// This is the representation used for configuration, state and plan data
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (all numbers are f64 to match Terraform)
    Number(f64),
    /// String value
    String(String),
    /// List of values (ordered, allows duplicates)
    List(Vec<Dynamic>),
    /// Map of string keys to values (objects are represented as Maps)
    Map(HashMap<String, Dynamic>),
    /// Value not yet known (during planning)
    Unknown,
}

impl Dynamic {
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dynamic::Unknown)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Unknown => "unknown",
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(l) => l.serialize(serializer),
            Dynamic::Map(m) => m.serialize(serializer),
            Dynamic::Unknown => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(UNKNOWN_KEY, &true)?;
                map.end()
            }
        }
    }
}

/// Unknown values travel as the single-entry object `{"$unknown": true}`
const UNKNOWN_KEY: &str = "$unknown";

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid Dynamic value")
            }

            fn visit_unit<E>(self) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Null)
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Dynamic, E>
            where
                E: de::Error,
            {
                Ok(Dynamic::String(value.to_string()))
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Dynamic::List(vec))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut hashmap: HashMap<String, Dynamic> = HashMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    hashmap.insert(key, value);
                }
                if hashmap.len() == 1 && hashmap.get(UNKNOWN_KEY) == Some(&Dynamic::Bool(true)) {
                    return Ok(Dynamic::Unknown);
                }
                Ok(Dynamic::Map(hashmap))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// Primitive payloads that have a typed plan modifier capability
pub trait Primitive: Clone + PartialEq + Send + Sync + 'static {
    /// Name used in type mismatch errors
    const TYPE_NAME: &'static str;

    fn from_dynamic(value: &Dynamic) -> Option<Self>;

    fn into_dynamic(self) -> Dynamic;
}

impl Primitive for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        value.as_bool()
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl Primitive for String {
    const TYPE_NAME: &'static str = "string";

    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        value.as_string().cloned()
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }
}

/// A typed attribute value that keeps nullness and unknownness next to the payload
/// `Known(false)` and `Null` are different values: only the latter means "not configured"
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue<T> {
    Null,
    Unknown,
    Known(T),
}

pub type BoolValue = TypedValue<bool>;
pub type StringValue = TypedValue<String>;

impl<T> TypedValue<T> {
    pub fn known(value: impl Into<T>) -> Self {
        TypedValue::Known(value.into())
    }

    pub fn null() -> Self {
        TypedValue::Null
    }

    pub fn unknown() -> Self {
        TypedValue::Unknown
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypedValue::Unknown)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            TypedValue::Known(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Primitive> TryFrom<&Dynamic> for TypedValue<T> {
    type Error = TfplugError;

    fn try_from(value: &Dynamic) -> Result<Self> {
        match value {
            Dynamic::Null => Ok(TypedValue::Null),
            Dynamic::Unknown => Ok(TypedValue::Unknown),
            other => T::from_dynamic(other)
                .map(TypedValue::Known)
                .ok_or_else(|| TfplugError::TypeMismatch {
                    expected: T::TYPE_NAME.to_string(),
                    actual: other.type_name().to_string(),
                }),
        }
    }
}

impl<T: Primitive> From<TypedValue<T>> for Dynamic {
    fn from(value: TypedValue<T>) -> Self {
        match value {
            TypedValue::Null => Dynamic::Null,
            TypedValue::Unknown => Dynamic::Unknown,
            TypedValue::Known(v) => v.into_dynamic(),
        }
    }
}

/// DynamicValue wraps a whole configuration, state or plan object
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self {
            value: Dynamic::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("json encoding failed: {}", e)))
    }

    /// Decode a JSON document; `{"$unknown": true}` anywhere in it decodes as an unknown value
    pub fn decode_json(data: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| TfplugError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    /// Value of a top-level attribute; a null object or a missing key reads as null
    pub fn attribute(&self, name: &str) -> Dynamic {
        match &self.value {
            Dynamic::Map(m) => m.get(name).cloned().unwrap_or(Dynamic::Null),
            _ => Dynamic::Null,
        }
    }

    pub fn get(&self, path: &AttributePath) -> Result<&Dynamic> {
        let mut current = &self.value;

        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Map(m), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => m
                    .get(name)
                    .ok_or_else(|| TfplugError::AttributeNotFound(path.to_string()))?,
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => usize::try_from(*idx)
                    .ok()
                    .and_then(|idx| l.get(idx))
                    .ok_or_else(|| TfplugError::AttributeNotFound(path.to_string()))?,
                _ => return Err(TfplugError::AttributeNotFound(path.to_string())),
            };
        }

        Ok(current)
    }

    /// Set the value at `path`, creating intermediate objects as needed
    pub fn set(&mut self, path: &AttributePath, new_value: Dynamic) -> Result<()> {
        let Some((last, parents)) = path.steps.split_last() else {
            self.value = new_value;
            return Ok(());
        };

        if self.value.is_null() {
            self.value = Dynamic::Map(HashMap::new());
        }

        let mut current = &mut self.value;
        for step in parents {
            current = match (current, step) {
                (Dynamic::Map(m), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => m
                    .entry(name.clone())
                    .or_insert_with(|| Dynamic::Map(HashMap::new())),
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                    match list_index(*idx, l.len()) {
                        Some(i) => &mut l[i],
                        None => return Err(TfplugError::AttributeNotFound(path.to_string())),
                    }
                }
                _ => return Err(TfplugError::AttributeNotFound(path.to_string())),
            };
        }

        match (current, last) {
            (Dynamic::Map(m), AttributePathStep::AttributeName(name))
            | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => {
                m.insert(name.clone(), new_value);
                Ok(())
            }
            (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                match list_index(*idx, l.len()) {
                    Some(i) => {
                        l[i] = new_value;
                        Ok(())
                    }
                    None => Err(TfplugError::AttributeNotFound(path.to_string())),
                }
            }
            _ => Err(TfplugError::AttributeNotFound(path.to_string())),
        }
    }
}

fn list_index(idx: i64, len: usize) -> Option<usize> {
    usize::try_from(idx).ok().filter(|i| *i < len)
}

/// AttributePath represents a path to an attribute within a DynamicValue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

impl AttributePath {
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: i64) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::AttributeName(name) if i == 0 => write!(f, "{}", name)?,
                AttributePathStep::AttributeName(name) => write!(f, ".{}", name)?,
                AttributePathStep::ElementKeyString(key) => write!(f, "[{:?}]", key)?,
                AttributePathStep::ElementKeyInt(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Individual step in an AttributePath
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributePathStep {
    /// Access attribute by name in object/map
    AttributeName(String),
    /// Access element by string key (for maps)
    ElementKeyString(String),
    /// Access element by integer index (for lists)
    ElementKeyInt(i64),
}

/// Diagnostic represents a warning or error produced during planning
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Errors and warnings collected over a plan computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.errors.push(Diagnostic::error(summary, detail));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.warnings.push(Diagnostic::warning(summary, detail));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Error => self.errors.push(diagnostic),
            DiagnosticSeverity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Point every diagnostic that has no attribute yet at `path`
    pub fn with_attribute(self, path: &AttributePath) -> Self {
        let tag = |d: Diagnostic| {
            if d.attribute.is_some() {
                d
            } else {
                d.with_attribute(path.clone())
            }
        };
        Self {
            errors: self.errors.into_iter().map(&tag).collect(),
            warnings: self.warnings.into_iter().map(&tag).collect(),
        }
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_value_set_and_get() {
        let mut dv = DynamicValue::null();
        let path = AttributePath::new("config").attribute("endpoint");
        dv.set(&path, Dynamic::String("https://example.com".to_string()))
            .unwrap();

        assert_eq!(
            dv.get(&path).unwrap(),
            &Dynamic::String("https://example.com".to_string())
        );
    }

    #[test]
    fn missing_attribute_reads_as_null() {
        let dv = DynamicValue::decode_json(br#"{"name": "web"}"#).unwrap();

        assert_eq!(dv.attribute("name"), Dynamic::String("web".to_string()));
        assert_eq!(dv.attribute("enabled"), Dynamic::Null);
        assert_eq!(DynamicValue::null().attribute("name"), Dynamic::Null);
    }

    #[test]
    fn get_reports_missing_path() {
        let dv = DynamicValue::decode_json(br#"{"tags": ["a"]}"#).unwrap();

        assert!(dv.get(&AttributePath::new("tags").index(0)).is_ok());
        assert!(matches!(
            dv.get(&AttributePath::new("tags").index(3)),
            Err(TfplugError::AttributeNotFound(_))
        ));
    }

    #[test]
    fn json_fixture_decodes_nulls_and_unknowns() {
        let dv = DynamicValue::decode_json(
            br#"{"enabled": null, "id": {"$unknown": true}, "port": 42}"#,
        )
        .unwrap();

        assert_eq!(dv.attribute("enabled"), Dynamic::Null);
        assert_eq!(dv.attribute("id"), Dynamic::Unknown);
        assert_eq!(dv.attribute("port"), Dynamic::Number(42.0));

        let encoded = dv.encode_json().unwrap();
        assert_eq!(DynamicValue::decode_json(&encoded).unwrap(), dv);
    }

    #[test]
    fn unknown_lookalike_strings_stay_strings() {
        let dv = DynamicValue::decode_json(br#"{"id": "__unknown__", "tags": {"$unknown": false}}"#)
            .unwrap();

        assert_eq!(dv.attribute("id"), Dynamic::String("__unknown__".to_string()));
        assert!(matches!(dv.attribute("tags"), Dynamic::Map(_)));

        let encoded = dv.encode_json().unwrap();
        assert_eq!(DynamicValue::decode_json(&encoded).unwrap(), dv);
    }

    #[test]
    fn typed_value_keeps_false_distinct_from_null() {
        let known = BoolValue::try_from(&Dynamic::Bool(false)).unwrap();
        let null = BoolValue::try_from(&Dynamic::Null).unwrap();

        assert_eq!(known, BoolValue::known(false));
        assert!(!known.is_null());
        assert!(null.is_null());
        assert_eq!(Dynamic::from(known), Dynamic::Bool(false));
    }

    #[test]
    fn typed_value_rejects_wrong_payload() {
        let err = StringValue::try_from(&Dynamic::Number(5.0)).unwrap_err();

        match err {
            TfplugError::TypeMismatch { expected, actual } => {
                assert_eq!(expected, "string");
                assert_eq!(actual, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn attribute_path_display() {
        let path = AttributePath::new("rules").index(2).attribute("tags").key("env");
        assert_eq!(path.to_string(), r#"rules[2].tags["env"]"#);
    }

    #[test]
    fn diagnostics_route_by_severity() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning("heads up", ""));
        diags.add_error("broken", "details");

        assert!(diags.has_errors());
        assert_eq!(diags.warnings.len(), 1);
        assert_eq!(diags.errors[0].summary, "broken");
    }

    #[test]
    fn diagnostics_keep_an_existing_attribute_when_tagged() {
        let mut diags = Diagnostics::new();
        diags.add_error("untagged", "");
        diags.push(Diagnostic::warning("tagged", "").with_attribute(AttributePath::new("other")));

        let diags = diags.with_attribute(&AttributePath::new("port"));

        assert_eq!(diags.errors[0].attribute, Some(AttributePath::new("port")));
        assert_eq!(diags.warnings[0].attribute, Some(AttributePath::new("other")));
    }
}
