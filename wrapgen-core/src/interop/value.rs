//! Property values forwarded across the interop boundary.
//!
//! Change detection follows JavaScript's strict inequality: primitives
//! compare by value (so `NaN` never equals itself), objects and callbacks
//! compare by identity. Two structurally equal objects created separately
//! are different values; the same shared object is unchanged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// An insertion-ordered snapshot of component properties.
pub type PropertyMap = IndexMap<String, PropValue>;

/// Identity of a host-side callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    /// Allocate a fresh callback identity.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for CallbackId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single property value.
#[derive(Debug, Clone)]
pub enum PropValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A host object, shared so identity survives cloning the snapshot.
    Object(Arc<serde_json::Value>),
    Callback(CallbackId),
}

impl PropValue {
    /// Wrap a JSON value as a new object identity.
    pub fn object(value: serde_json::Value) -> Self {
        PropValue::Object(Arc::new(value))
    }

    /// Strict equality as the host runtime defines it.
    pub fn strict_eq(&self, other: &PropValue) -> bool {
        match (self, other) {
            (PropValue::Undefined, PropValue::Undefined) => true,
            (PropValue::Null, PropValue::Null) => true,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::String(a), PropValue::String(b)) => a == b,
            (PropValue::Object(a), PropValue::Object(b)) => Arc::ptr_eq(a, b),
            (PropValue::Callback(a), PropValue::Callback(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value.into())
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl From<CallbackId> for PropValue {
    fn from(value: CallbackId) -> Self {
        PropValue::Callback(value)
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Undefined | PropValue::Null => serializer.serialize_unit(),
            PropValue::Bool(b) => serializer.serialize_bool(*b),
            PropValue::Number(n) => serializer.serialize_f64(*n),
            PropValue::String(s) => serializer.serialize_str(s),
            PropValue::Object(v) => v.serialize(serializer),
            PropValue::Callback(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("__callbackId", &id.raw())?;
                map.end()
            }
        }
    }
}

/// Keys of `next` whose value strictly differs from `previous`, with their
/// new values. Keys absent from `next` are not reported.
pub fn changed_properties(previous: &PropertyMap, next: &PropertyMap) -> PropertyMap {
    next.iter()
        .filter(|(key, value)| match previous.get(key.as_str()) {
            Some(old) => !old.strict_eq(value),
            None => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Build a [`PropertyMap`] from `key => value` pairs.
#[macro_export]
macro_rules! props {
    () => { $crate::interop::PropertyMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::interop::PropertyMap::new();
        $( map.insert(::std::string::String::from($key), $crate::interop::PropValue::from($value)); )+
        map
    }};
}
