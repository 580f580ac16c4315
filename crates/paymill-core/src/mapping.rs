//! # Field Mapping
//!
//! Static per-model field tables and the wire conversions driven by them.
//!
//! Every model implements [`Resource`] and declares a `const FIELDS` table of
//! [`FieldSpec`] entries. The wire names in that table match the model's serde
//! names; serialization goes through serde, and the table decides which of the
//! serialized fields take part in partial updates, filters and sorting.
//!
//! ```text
//! model ──serde──▶ wire map (JSON object) ──FIELDS[updateable]──▶ form params
//! ```

use crate::error::{PaymillError, PaymillResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a filterable field encodes its predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Verbatim text or resource id
    Text,
    /// Plain integer
    Number,
    /// Integer with equal / greater-than / less-than variants
    Amount,
    /// Exact epoch seconds or `start_end` range
    Date,
}

/// Wire metadata for one model field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub wire: &'static str,
    pub updateable: bool,
    pub filter: Option<FilterKind>,
    pub sortable: bool,
}

impl FieldSpec {
    pub const fn new(wire: &'static str) -> Self {
        Self {
            wire,
            updateable: false,
            filter: None,
            sortable: false,
        }
    }

    /// Field takes part in partial-update payloads
    pub const fn updateable(self) -> Self {
        Self {
            updateable: true,
            ..self
        }
    }

    /// Field can be used as a list filter
    pub const fn filterable(self, kind: FilterKind) -> Self {
        Self {
            filter: Some(kind),
            ..self
        }
    }

    /// Field can be used as the list sort key
    pub const fn sortable(self) -> Self {
        Self {
            sortable: true,
            ..self
        }
    }
}

/// A named entity exposed by the API.
///
/// Implementors are plain serde models whose serde names equal the wire
/// names listed in `FIELDS`.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Singular name used in errors and logs
    const NAME: &'static str;

    /// Endpoint path relative to the API base URL
    const PATH: &'static str;

    /// Static field table
    const FIELDS: &'static [FieldSpec];

    /// Extra query parameters sent with a delete
    const DELETE_PARAMS: &'static [(&'static str, &'static str)] = &[];

    /// Server-assigned identifier, if known
    fn id(&self) -> Option<&str>;

    /// True when at least one field can be sent in an update
    fn is_updateable() -> bool {
        Self::FIELDS.iter().any(|f| f.updateable)
    }

    /// Look up a field by wire name
    fn field(wire: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|f| f.wire == wire)
    }

    /// The id, or `MissingIdentifier` when absent or empty
    fn require_id(&self) -> PaymillResult<&str> {
        match self.id() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(PaymillError::MissingIdentifier {
                resource: Self::NAME,
            }),
        }
    }

    /// Full wire representation (wire name → value), unset fields omitted
    fn to_wire_map(&self) -> PaymillResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(PaymillError::Serialization(format!(
                "{} serialized to a non-object: {}",
                Self::NAME,
                other
            ))),
        }
    }

    /// Partial-update payload: updateable fields that are set
    fn update_params(&self) -> PaymillResult<Params> {
        let map = self.to_wire_map()?;
        let mut params = Params::new();
        for field in Self::FIELDS.iter().filter(|f| f.updateable) {
            if let Some(value) = map.get(field.wire) {
                params.push_value(field.wire, value);
            }
        }
        Ok(params)
    }
}

/// Ordered list of form or query parameters.
///
/// Keys may repeat (array parameters, two-sided amount bounds).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Builder: add a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Render a JSON value as form parameters.
    ///
    /// `null` is skipped, nested resources render as their id and arrays as
    /// repeated `key[]` entries.
    pub fn push_value(&mut self, key: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(s) => self.push(key, s.as_str()),
            Value::Number(n) => self.push(key, n.to_string()),
            Value::Bool(b) => self.push(key, b.to_string()),
            Value::Object(obj) => {
                if let Some(Value::String(id)) = obj.get("id") {
                    self.push(key, id.as_str());
                }
            }
            Value::Array(items) => {
                let item_key = format!("{}[]", key);
                for item in items {
                    if !item.is_array() {
                        self.push_value(&item_key, item);
                    }
                }
            }
        }
    }

    pub fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in insertion order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Single-object response envelope: `{"data": {...}, "mode": "test"}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub mode: Option<String>,
}

/// One page of a list response
#[derive(Debug, Clone, Deserialize)]
pub struct PaymillList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    /// Total matches on the server, not just this page
    #[serde(default, with = "flexible_int")]
    pub data_count: Option<i64>,

    #[serde(default)]
    pub mode: Option<String>,
}

impl<T> PaymillList<T> {
    /// Server-side total, falling back to the page size
    pub fn total_count(&self) -> i64 {
        self.data_count.unwrap_or(self.data.len() as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Integer the API sometimes sends as a string
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

impl IntOrString {
    fn into_i64<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            IntOrString::Int(n) => Ok(Some(n)),
            IntOrString::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Ok(Some(f as i64))
            }
            IntOrString::Float(f) => Err(E::custom(format!("expected integer, got {}", f))),
            IntOrString::Str(s) if s.trim().is_empty() => Ok(None),
            IntOrString::Str(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected integer, got {:?}", s))),
        }
    }
}

/// `Option<i64>` read from a number or numeric string, written as a number
pub mod flexible_int {
    use super::IntOrString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => s.serialize_i64(*n),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Option::<IntOrString>::deserialize(d)? {
            Some(raw) => raw.into_i64(),
            None => Ok(None),
        }
    }
}

/// `Option<DateTime<Utc>>` as epoch seconds.
///
/// Absent, `null`, zero and negative values read as unset.
pub mod epoch_seconds {
    use super::IntOrString;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_i64(dt.timestamp()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let seconds = match Option::<IntOrString>::deserialize(d)? {
            Some(raw) => raw.into_i64::<D::Error>()?,
            None => None,
        };
        Ok(seconds
            .filter(|s| *s > 0)
            .and_then(|s| DateTime::from_timestamp(s, 0)))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Resource;
    use serde_json::Value;
    use std::collections::HashSet;

    /// Checks a field table against a sample carrying every wire name:
    /// each entry must survive a serde round trip, updateable entries must
    /// reach the update payload, and list defaults must be valid.
    pub fn assert_field_table<R: Resource>(sample: Value) {
        let mut seen = HashSet::new();
        for field in R::FIELDS {
            assert!(seen.insert(field.wire), "{}.{} listed twice", R::NAME, field.wire);
            assert!(
                sample.get(field.wire).is_some(),
                "sample lacks {}.{}",
                R::NAME,
                field.wire
            );
        }

        let parsed: R = serde_json::from_value(sample).unwrap();
        let map = parsed.to_wire_map().unwrap();
        for field in R::FIELDS {
            assert!(
                map.contains_key(field.wire),
                "{}.{} is not a serde name of the model",
                R::NAME,
                field.wire
            );
        }

        let params = parsed.update_params().unwrap();
        for field in R::FIELDS.iter().filter(|f| f.updateable) {
            assert!(
                params.contains_key(field.wire),
                "{}.{} missing from update payload",
                R::NAME,
                field.wire
            );
        }

        assert!(!R::field("id").map(|f| f.updateable).unwrap_or(true));
        assert!(R::field("created_at").map(|f| f.sortable).unwrap_or(false));
    }
}
