//! Typed JSON mapping between wire objects and structured entities.
//!
//! Every request, response and data type in this crate is an *entity*: a struct
//! of optional attributes plus an ordered table mapping wire keys to those
//! attributes. The table drives both directions of conversion:
//!
//! - [`JsonObject::data`] walks the table in declared order and emits every
//!   attribute that is present and non-empty, recursing into nested entities
//!   and sequences and formatting dates.
//! - [`JsonObject::set_data`] accepts bytes, text or an already parsed map,
//!   skips `null` and `""` values, and assigns everything else through the
//!   table with per-type coercion. A wire key that is not in the table is an
//!   [`Error::UnmappedKey`].
//!
//! Entities are declared with [`json_object!`](crate::json_object), which also
//! derives wire-form equality, a readable `Debug` rendering and serde support.
//!
//! Because empty values are dropped in both directions, a round trip only
//! reproduces an entity whose present attributes are all non-empty, and a
//! partial [`set_data`](JsonObject::set_data) can never clear an attribute.
//!
//! ```
//! use omniture::data::{ReportDescription, ReportDescriptionMetric};
//! use omniture::JsonObject;
//!
//! let description = ReportDescription {
//!     rsid: Some("my-suite".to_string()),
//!     metrics: Some(vec![ReportDescriptionMetric::new("pageviews")]),
//!     ..Default::default()
//! };
//!
//! assert_eq!(
//!     description.to_json(),
//!     r#"{"reportSuiteID":"my-suite","metrics":[{"id":"pageviews"}]}"#
//! );
//! assert_eq!(ReportDescription::from_data(description.to_json()).unwrap(), description);
//! ```

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt;

pub use serde_json::{Map, Value};

#[doc(hidden)]
pub use serde as __serde;

/// A date-time with the UTC offset it was reported in.
pub type Timestamp = DateTime<FixedOffset>;

/// Wire format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of a date-time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

const OFFSET_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%:z",
];

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One entry of an entity's mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// The key used on the wire.
    pub key: &'static str,
    /// The Rust attribute the key is stored in.
    pub attribute: &'static str,
}

/// Raw input accepted by [`JsonObject::set_data`].
#[derive(Debug, Clone)]
pub enum WireInput {
    /// UTF-8 encoded JSON.
    Bytes(Vec<u8>),
    /// JSON text.
    Text(String),
    /// An already parsed JSON object.
    Map(Map<String, Value>),
}

impl WireInput {
    /// Parses the input into an ordered JSON object.
    pub fn into_map(self) -> Result<Map<String, Value>> {
        let text = match self {
            WireInput::Map(map) => return Ok(map),
            WireInput::Text(text) => text,
            WireInput::Bytes(bytes) => {
                String::from_utf8(bytes).map_err(|e| Error::MalformedJson(e.to_string()))?
            }
        };

        match serde_json::from_str::<Value>(&text).map_err(|e| Error::MalformedJson(e.to_string()))? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Coercion {
                expected: "object",
                found: other.to_string(),
            }),
        }
    }
}

impl From<Vec<u8>> for WireInput {
    fn from(bytes: Vec<u8>) -> Self {
        WireInput::Bytes(bytes)
    }
}

impl From<&[u8]> for WireInput {
    fn from(bytes: &[u8]) -> Self {
        WireInput::Bytes(bytes.to_vec())
    }
}

impl From<String> for WireInput {
    fn from(text: String) -> Self {
        WireInput::Text(text)
    }
}

impl From<&str> for WireInput {
    fn from(text: &str) -> Self {
        WireInput::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for WireInput {
    fn from(map: Map<String, Value>) -> Self {
        WireInput::Map(map)
    }
}

/// Conversion of a single attribute value to and from its wire form.
///
/// Decoding is lenient in the ways the API requires: numbers may arrive as
/// strings, and a lone value may arrive where a sequence is expected.
pub trait WireValue: Sized {
    /// Returns the JSON representation of this value.
    fn to_wire(&self) -> Value;

    /// Decodes a value from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Coercion`] if the JSON cannot represent this type.
    fn from_wire(value: Value) -> Result<Self>;
}

/// Returns `true` for values that are treated as absent on the wire.
pub fn is_blank(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str() == Some("")
}

fn coercion(expected: &'static str, found: &Value) -> Error {
    Error::Coercion {
        expected,
        found: found.to_string(),
    }
}

/// Behaviour shared by every entity.
///
/// Implementations are generated by [`json_object!`](crate::json_object); only
/// [`value_of`](Self::value_of), [`assign`](Self::assign) and
/// [`attributes`](Self::attributes) are entity specific.
pub trait JsonObject: Default {
    /// The entity name, used in errors and the textual representation.
    const NAME: &'static str;

    /// The ordered mapping table.
    const FIELDS: &'static [Field];

    /// Returns the wire value stored under `key`, or `None` if it is absent.
    fn value_of(&self, key: &str) -> Option<Value>;

    /// Decodes `value` and stores it in the attribute mapped to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmappedKey`] for keys outside the table and
    /// [`Error::Coercion`] when the value has the wrong shape.
    fn assign(&mut self, key: &str, value: Value) -> Result<()>;

    /// Returns `(attribute, rendering)` for every present attribute, in table order.
    fn attributes(&self) -> Vec<(&'static str, String)>;

    /// Looks up the table entry for a wire key.
    fn field(key: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|field| field.key == key)
    }

    /// Returns the wire representation as an ordered JSON object.
    fn data(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for field in Self::FIELDS {
            if let Some(value) = self.value_of(field.key) {
                if !is_blank(&value) {
                    map.insert(field.key.to_string(), value);
                }
            }
        }
        map
    }

    /// Returns the wire representation as JSON text.
    fn to_json(&self) -> String {
        Value::Object(self.data()).to_string()
    }

    /// Assigns every non-empty value of a wire object to this entity.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, on keys missing from the mapping table and on
    /// values that cannot be coerced to the attribute's type.
    fn set_data(&mut self, input: impl Into<WireInput>) -> Result<()> {
        for (key, value) in input.into().into_map()? {
            if is_blank(&value) {
                continue;
            }
            let field = Self::field(key.trim()).ok_or_else(|| Error::UnmappedKey {
                entity: Self::NAME,
                key: key.clone(),
            })?;
            self.assign(field.key, value)
                .map_err(|e| e.in_field(Self::NAME, field.key))?;
        }
        Ok(())
    }

    /// Builds an entity from its wire representation.
    ///
    /// # Errors
    ///
    /// See [`set_data`](Self::set_data).
    fn from_data(input: impl Into<WireInput>) -> Result<Self> {
        let mut entity = Self::default();
        entity.set_data(input)?;
        Ok(entity)
    }
}

/// Deep, key-order-sensitive equality of two wire values.
pub fn wire_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Object(left), Value::Object(right)) => wire_eq_maps(left, right),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(l, r)| wire_eq(l, r))
        }
        _ => left == right,
    }
}

/// Key-order-sensitive equality of two wire objects.
pub fn wire_eq_maps(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|((lk, lv), (rk, rv))| lk == rk && wire_eq(lv, rv))
}

/// Writes `Name(attribute=value, ...)`.
pub fn write_repr(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    attributes: &[(&'static str, String)],
) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, (attribute, value)) in attributes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{attribute}={value}")?;
    }
    f.write_str(")")
}

/// Serde adapter used by generated `Serialize` impls.
pub fn serialize_object<T, S>(entity: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: JsonObject,
    S: serde::Serializer,
{
    serde::Serialize::serialize(&entity.data(), serializer)
}

/// Serde adapter used by generated `Deserialize` impls.
pub fn deserialize_object<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: JsonObject,
    D: serde::Deserializer<'de>,
{
    let map = <Map<String, Value> as serde::Deserialize>::deserialize(deserializer)?;
    T::from_data(map).map_err(serde::de::Error::custom)
}

/// Parses a wire date-time.
///
/// Offsets may be written `+HHMM`, `+HH:MM` or `Z`; values without an offset
/// are taken to be UTC.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    let text = text.trim();
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(text, format) {
            return Ok(timestamp);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp);
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(Error::Coercion {
        expected: "timestamp",
        found: text.to_string(),
    })
}

impl WireValue for String {
    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_wire(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(coercion("string", &other)),
        }
    }
}

impl WireValue for i64 {
    fn to_wire(&self) -> Value {
        Value::from(*self)
    }

    fn from_wire(value: Value) -> Result<Self> {
        let integral = |n: f64| (n.fract() == 0.0 && n.is_finite()).then_some(n as i64);
        let parsed = match &value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(integral)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        };
        parsed.ok_or_else(|| coercion("integer", &value))
    }
}

impl WireValue for f64 {
    fn to_wire(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    fn from_wire(value: Value) -> Result<Self> {
        let parsed = match &value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| coercion("number", &value))
    }
}

impl WireValue for bool {
    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_wire(value: Value) -> Result<Self> {
        let parsed = match &value {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(number) => match number.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| coercion("boolean", &value))
    }
}

impl WireValue for NaiveDate {
    fn to_wire(&self) -> Value {
        Value::String(self.format(DATE_FORMAT).to_string())
    }

    fn from_wire(value: Value) -> Result<Self> {
        value
            .as_str()
            .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
            .ok_or_else(|| coercion("date", &value))
    }
}

impl WireValue for Timestamp {
    fn to_wire(&self) -> Value {
        Value::String(self.format(TIMESTAMP_FORMAT).to_string())
    }

    fn from_wire(value: Value) -> Result<Self> {
        match &value {
            Value::String(text) => parse_timestamp(text),
            _ => Err(coercion("timestamp", &value)),
        }
    }
}

impl WireValue for Value {
    fn to_wire(&self) -> Value {
        self.clone()
    }

    fn from_wire(value: Value) -> Result<Self> {
        Ok(value)
    }
}

/// Null elements are absent, so they are dropped in both directions.
impl<T: WireValue> WireValue for Vec<T> {
    fn to_wire(&self) -> Value {
        Value::Array(
            self.iter()
                .map(WireValue::to_wire)
                .filter(|item| !item.is_null())
                .collect(),
        )
    }

    fn from_wire(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(T::from_wire)
                .collect(),
            single => Ok(vec![T::from_wire(single)?]),
        }
    }
}

impl<T: WireValue> WireValue for Box<T> {
    fn to_wire(&self) -> Value {
        (**self).to_wire()
    }

    fn from_wire(value: Value) -> Result<Self> {
        T::from_wire(value).map(Box::new)
    }
}

/// Declares an entity and its wire mapping table.
///
/// Each line maps a wire key to an attribute and its type. Every attribute
/// is stored as an `Option`, and the table order is the serialization order.
///
/// ```
/// use omniture::JsonObject;
///
/// omniture::json_object! {
///     /// A named thing.
///     pub struct Thing {
///         "id" => thing_id: i64,
///         "name" => thing_name: String,
///     }
/// }
///
/// let thing = Thing::from_data(r#"{"id": "7", "name": ""}"#).unwrap();
/// assert_eq!(thing.thing_id, Some(7));
/// assert_eq!(thing.thing_name, None);
/// assert_eq!(format!("{thing:?}"), "Thing(thing_id=7)");
/// ```
#[macro_export]
macro_rules! json_object {
    (
        $(#[$attr:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $key:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Default)]
        pub struct $name {
            $(
                $(#[$field_attr])*
                pub $field: ::std::option::Option<$ty>,
            )*
        }

        impl $crate::mapping::JsonObject for $name {
            const NAME: &'static str = stringify!($name);

            const FIELDS: &'static [$crate::mapping::Field] = &[
                $($crate::mapping::Field { key: $key, attribute: stringify!($field) },)*
            ];

            fn value_of(&self, key: &str) -> ::std::option::Option<$crate::mapping::Value> {
                match key {
                    $($key => self.$field.as_ref().map($crate::mapping::WireValue::to_wire),)*
                    _ => None,
                }
            }

            fn assign(&mut self, key: &str, value: $crate::mapping::Value) -> $crate::Result<()> {
                match key {
                    $($key => {
                        self.$field = Some(<$ty as $crate::mapping::WireValue>::from_wire(value)?);
                    })*
                    _ => {
                        return Err($crate::Error::UnmappedKey {
                            entity: stringify!($name),
                            key: key.to_string(),
                        })
                    }
                }
                Ok(())
            }

            fn attributes(&self) -> ::std::vec::Vec<(&'static str, ::std::string::String)> {
                let mut attributes = ::std::vec::Vec::new();
                $(
                    if let Some(value) = &self.$field {
                        attributes.push((stringify!($field), format!("{:?}", value)));
                    }
                )*
                attributes
            }
        }

        impl $crate::mapping::WireValue for $name {
            fn to_wire(&self) -> $crate::mapping::Value {
                $crate::mapping::Value::Object($crate::mapping::JsonObject::data(self))
            }

            fn from_wire(value: $crate::mapping::Value) -> $crate::Result<Self> {
                match value {
                    $crate::mapping::Value::Object(map) => {
                        <Self as $crate::mapping::JsonObject>::from_data(map)
                    }
                    other => Err($crate::Error::Coercion {
                        expected: "object",
                        found: other.to_string(),
                    }),
                }
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::mapping::wire_eq_maps(
                    &$crate::mapping::JsonObject::data(self),
                    &$crate::mapping::JsonObject::data(other),
                )
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::mapping::write_repr(
                    f,
                    <Self as $crate::mapping::JsonObject>::NAME,
                    &$crate::mapping::JsonObject::attributes(self),
                )
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::mapping::JsonObject::to_json(self))
            }
        }

        impl $crate::mapping::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::mapping::__serde::Serializer,
            {
                $crate::mapping::serialize_object(self, serializer)
            }
        }

        impl<'de> $crate::mapping::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::mapping::__serde::Deserializer<'de>,
            {
                $crate::mapping::deserialize_object(deserializer)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::json_object! {
        pub struct Example {
            "id" => x_id: i64,
            "name" => x_name: String,
        }
    }

    crate::json_object! {
        pub struct Outer {
            "label" => label: String,
            "when" => when: NaiveDate,
            "at" => at: Timestamp,
            "children" => children: Vec<Example>,
            "single" => single: Example,
            "extra" => extra: Value,
        }
    }

    #[test]
    fn test_absent_attributes_are_not_serialized() {
        let example = Example {
            x_id: Some(5),
            x_name: None,
        };

        assert_eq!(example.to_json(), r#"{"id":5}"#);
    }

    #[test]
    fn test_empty_strings_are_not_serialized() {
        let example = Example {
            x_id: Some(5),
            x_name: Some(String::new()),
        };

        assert_eq!(example.to_json(), r#"{"id":5}"#);
    }

    #[test]
    fn test_serialization_follows_table_order() {
        let example = Example::from_data(r#"{"name": "b", "id": 1}"#).unwrap();
        let keys: Vec<_> = example.data().keys().cloned().collect();

        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn test_blank_values_are_skipped_on_decode() {
        let mut example = Example {
            x_id: Some(1),
            x_name: Some("kept".to_string()),
        };

        example
            .set_data(r#"{"id": null, "name": ""}"#)
            .unwrap();

        assert_eq!(example.x_id, Some(1));
        assert_eq!(example.x_name.as_deref(), Some("kept"));
    }

    #[test]
    fn test_unmapped_key_is_an_error() {
        let err = Example::from_data(r#"{"id": 1, "colour": "red"}"#).unwrap_err();

        match err {
            Error::UnmappedKey { entity, key } => {
                assert_eq!(entity, "Example");
                assert_eq!(key, "colour");
            }
            other => panic!("Expected UnmappedKey, got {:?}", other),
        }
    }

    #[test]
    fn test_keys_are_trimmed_before_lookup() {
        let example = Example::from_data(r#"{" id ": 3}"#).unwrap();
        assert_eq!(example.x_id, Some(3));
    }

    #[test]
    fn test_bad_value_reports_entity_and_key() {
        let err = Example::from_data(r#"{"id": "seven"}"#).unwrap_err();

        match err {
            Error::InvalidValue {
                entity,
                key,
                expected,
                found,
            } => {
                assert_eq!(entity, "Example");
                assert_eq!(key, "id");
                assert_eq!(expected, "integer");
                assert_eq!(found, "\"seven\"");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_bytes_text_and_maps() {
        let from_bytes = Example::from_data(br#"{"id": 2}"#.as_slice()).unwrap();
        let from_text = Example::from_data(r#"{"id": 2}"#).unwrap();
        let mut map = Map::new();
        map.insert("id".to_string(), json!(2));
        let from_map = Example::from_data(map).unwrap();

        assert_eq!(from_bytes, from_text);
        assert_eq!(from_text, from_map);
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        assert!(matches!(
            Example::from_data("[1, 2]"),
            Err(Error::Coercion { expected: "object", .. })
        ));
        assert!(matches!(
            Example::from_data("{not json"),
            Err(Error::MalformedJson(_))
        ));
    }

    #[test]
    fn test_nested_entities_round_trip() {
        let wire = r#"{
            "label": "outer",
            "when": "2017-03-01",
            "at": "2016-11-10T10:24:26-0800",
            "children": [{"id": 1, "name": "a"}, {"id": 2}],
            "single": {"name": "solo"},
            "extra": {"z": 1, "a": [true, null]}
        }"#;

        let outer = Outer::from_data(wire).unwrap();

        assert_eq!(outer.when, NaiveDate::from_ymd_opt(2017, 3, 1));
        assert_eq!(outer.children.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            outer.to_json(),
            r#"{"label":"outer","when":"2017-03-01","at":"2016-11-10T10:24:26-0800","children":[{"id":1,"name":"a"},{"id":2}],"single":{"name":"solo"},"extra":{"z":1,"a":[true,null]}}"#
        );
        assert_eq!(Outer::from_data(outer.to_json()).unwrap(), outer);
    }

    #[test]
    fn test_equality_uses_wire_form() {
        let left = Example {
            x_id: Some(1),
            x_name: Some(String::new()),
        };
        let right = Example {
            x_id: Some(1),
            x_name: None,
        };
        let different = Example {
            x_id: Some(2),
            x_name: None,
        };

        assert_eq!(left, right);
        assert_ne!(left, different);
    }

    #[test]
    fn test_wire_eq_is_order_sensitive() {
        let ab = json!({"a": 1, "b": 2});
        let ba = json!({"b": 2, "a": 1});

        assert!(wire_eq(&ab, &ab.clone()));
        assert!(!wire_eq(&ab, &ba));
    }

    #[test]
    fn test_raw_values_keep_their_order_in_equality() {
        let first = Outer::from_data(r#"{"extra": {"a": 1, "b": 2}}"#).unwrap();
        let second = Outer::from_data(r#"{"extra": {"b": 2, "a": 1}}"#).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_debug_lists_present_attributes() {
        let outer = Outer {
            label: Some("x".to_string()),
            single: Some(Example {
                x_id: Some(4),
                x_name: None,
            }),
            ..Default::default()
        };

        assert_eq!(format!("{:?}", outer), r#"Outer(label="x", single=Example(x_id=4))"#);
        assert_eq!(format!("{:?}", Example::default()), "Example()");
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(i64::from_wire(json!("12")).unwrap(), 12);
        assert_eq!(i64::from_wire(json!(12.0)).unwrap(), 12);
        assert!(i64::from_wire(json!(12.5)).is_err());
        assert_eq!(f64::from_wire(json!("1.5")).unwrap(), 1.5);
        assert_eq!(String::from_wire(json!(42)).unwrap(), "42");
        assert!(bool::from_wire(json!("TRUE")).unwrap());
        assert!(bool::from_wire(json!("yes")).is_err());
    }

    #[test]
    fn test_single_value_becomes_sequence() {
        let values = Vec::<String>::from_wire(json!("only")).unwrap();
        assert_eq!(values, vec!["only".to_string()]);
    }

    #[test]
    fn test_null_sequence_elements_are_dropped() {
        let values = Vec::<f64>::from_wire(json!(["1", null, 2])).unwrap();
        assert_eq!(values, vec![1.0, 2.0]);

        let raw = vec![json!(1), Value::Null, json!("x")];
        assert_eq!(raw.to_wire(), json!([1, "x"]));
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = parse_timestamp("2016-11-10T10:24:26-0800").unwrap();

        assert_eq!(parse_timestamp("2016-11-10 10:24:26-0800").unwrap(), expected);
        assert_eq!(parse_timestamp("2016-11-10T10:24:26-08:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2016-11-10T18:24:26Z").unwrap(),
            parse_timestamp("2016-11-10 18:24:26").unwrap()
        );
        assert_eq!(expected.to_wire(), json!("2016-11-10T10:24:26-0800"));
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_serde_integration() {
        let example: Example = serde_json::from_str(r#"{"id": "9"}"#).unwrap();
        assert_eq!(example.x_id, Some(9));
        assert_eq!(serde_json::to_string(&example).unwrap(), r#"{"id":9}"#);

        let err = serde_json::from_str::<Example>(r#"{"other": 1}"#).unwrap_err();
        assert!(err.to_string().contains("other"));
    }
}
