//! The value tree produced by HCL conversion.
//!
//! Mirrors JSON types but separates integers from floats and keeps objects as
//! ordered key-value pairs, so insertion order survives without depending on
//! `IndexMap`. The extra [`Value::Intrinsic`] variant carries unevaluated
//! operations (identifier references, function calls, operator applications)
//! for a later evaluation stage.
//!
//! An intrinsic serializes as `{"fn": ..., "args": [{"name": ..., "value": ...}]}`,
//! the same shape a source object literal with `fn` and `args` keys would
//! have. In memory the two can never be confused: intrinsics are a distinct
//! variant, and [`Value::from_json`] never produces one. Once serialized the
//! discriminant is gone; [`is_intrinsic_shaped`] is the documented heuristic
//! for that form.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A JSON-compatible document value, plus intrinsics.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order. Duplicate keys are representable;
    /// the legacy document path emits them for same-key sibling blocks, and
    /// serialization writes them all in order.
    Object(Vec<(String, Value)>),
    /// An unevaluated operation preserved for later interpretation.
    Intrinsic(Intrinsic),
}

/// A named, argument-bearing placeholder for an unevaluated operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Intrinsic {
    /// Operation name: a fixed name like `"add"` or `"conditional"`, an
    /// `"identifier"` reference, or a called function's own name. Always a
    /// plain string.
    pub fn_name: String,
    /// Ordered arguments; position conveys operand role (lhs before rhs).
    pub args: Vec<Arg>,
}

/// One intrinsic argument. `value` is omitted from serialized output when
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: String,
    pub value: Option<Value>,
}

impl Intrinsic {
    pub fn new(fn_name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            fn_name: fn_name.into(),
            args,
        }
    }
}

impl Arg {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

impl Value {
    /// Lower a parsed JSON document into a [`Value`] tree.
    ///
    /// Never produces [`Value::Intrinsic`]: a JSON object that happens to
    /// carry `fn` and `args` keys stays a plain object. Only the expression
    /// compiler builds intrinsics.
    pub fn from_json(value: &serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), Value::from_json(child)))
                    .collect(),
            ),
        }
    }

    /// Look up the first entry with the given key in an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Value::Intrinsic(_))
    }
}

/// Does a serialized JSON value have the shape of an intrinsic: an object
/// with an `fn` key and an `args` array?
///
/// After serialization the [`Value::Intrinsic`] discriminant is gone, so this
/// is a heuristic: a source object that legitimately has both keys matches
/// too. In-memory trees should match on the variant instead.
pub fn is_intrinsic_shaped(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(map) => {
            map.contains_key("fn")
                && map
                    .get("args")
                    .is_some_and(serde_json::Value::is_array)
        }
        _ => false,
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                // Entries are written pairwise so duplicate keys come out in
                // order instead of collapsing.
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Intrinsic(intrinsic) => intrinsic.serialize(serializer),
        }
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("fn", &self.fn_name)?;
        map.serialize_entry("args", &self.args)?;
        map.end()
    }
}

impl Serialize for Arg {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        if let Some(value) = &self.value {
            map.serialize_entry("value", value)?;
        }
        map.end()
    }
}
