//! Lenient accessors over NetworkManager property and settings maps.
//!
//! NetworkManager publishes everything as `a{sv}` dictionaries. These
//! helpers look a key up, unwrap nested variants and return `None` when the
//! key is absent or carries an unexpected type.

use std::collections::HashMap;

use zbus::zvariant::{OwnedValue, Value};

/// `GetAll` reply: property name → value.
pub type PropertyMap = HashMap<String, OwnedValue>;

/// `GetSettings` reply: setting name → (key → value).
pub type SettingsMap = HashMap<String, PropertyMap>;

fn unwrap_variant<'a, 'v>(value: &'a Value<'v>) -> &'a Value<'v> {
    match value {
        Value::Value(inner) => unwrap_variant(inner),
        other => other,
    }
}

pub fn as_u32(value: &Value<'_>) -> Option<u32> {
    match unwrap_variant(value) {
        Value::U32(v) => Some(*v),
        Value::U8(v) => Some(u32::from(*v)),
        Value::U16(v) => Some(u32::from(*v)),
        _ => None,
    }
}

pub fn as_u8(value: &Value<'_>) -> Option<u8> {
    match unwrap_variant(value) {
        Value::U8(v) => Some(*v),
        _ => None,
    }
}

pub fn as_i64(value: &Value<'_>) -> Option<i64> {
    match unwrap_variant(value) {
        Value::I64(v) => Some(*v),
        Value::I32(v) => Some(i64::from(*v)),
        _ => None,
    }
}

pub fn as_bool(value: &Value<'_>) -> Option<bool> {
    match unwrap_variant(value) {
        Value::Bool(v) => Some(*v),
        _ => None,
    }
}

pub fn as_str<'a>(value: &'a Value<'_>) -> Option<&'a str> {
    match unwrap_variant(value) {
        Value::Str(s) => Some(s.as_str()),
        Value::ObjectPath(p) => Some(p.as_str()),
        _ => None,
    }
}

/// An `o` value. The root path `/` is NetworkManager's "none" marker and
/// maps to `None`.
pub fn as_object_path(value: &Value<'_>) -> Option<String> {
    match unwrap_variant(value) {
        Value::ObjectPath(p) if p.as_str() != "/" => Some(p.as_str().to_owned()),
        _ => None,
    }
}

/// An `ay` value.
pub fn as_bytes(value: &Value<'_>) -> Option<Vec<u8>> {
    match unwrap_variant(value) {
        Value::Array(array) => array.iter().map(as_u8).collect(),
        _ => None,
    }
}

/// An `ao` value, skipping the root path.
pub fn as_object_paths(value: &Value<'_>) -> Vec<String> {
    match unwrap_variant(value) {
        Value::Array(array) => array.iter().filter_map(as_object_path).collect(),
        _ => Vec::new(),
    }
}

/// An `as` value.
pub fn as_strings(value: &Value<'_>) -> Vec<String> {
    match unwrap_variant(value) {
        Value::Array(array) => array
            .iter()
            .filter_map(|v| as_str(v).map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Typed lookups on a property map.
pub trait PropertyMapExt {
    fn u32(&self, key: &str) -> Option<u32>;
    fn u8(&self, key: &str) -> Option<u8>;
    fn i64(&self, key: &str) -> Option<i64>;
    fn bool(&self, key: &str) -> Option<bool>;
    fn str(&self, key: &str) -> Option<&str>;
    fn bytes(&self, key: &str) -> Option<Vec<u8>>;
    fn object_path(&self, key: &str) -> Option<String>;
    fn object_paths(&self, key: &str) -> Vec<String>;
    fn strings(&self, key: &str) -> Vec<String>;
}

impl PropertyMapExt for PropertyMap {
    fn u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| as_u32(v))
    }

    fn u8(&self, key: &str) -> Option<u8> {
        self.get(key).and_then(|v| as_u8(v))
    }

    fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| as_i64(v))
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| as_bool(v))
    }

    fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| as_str(v))
    }

    fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.get(key).and_then(|v| as_bytes(v))
    }

    fn object_path(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| as_object_path(v))
    }

    fn object_paths(&self, key: &str) -> Vec<String> {
        self.get(key).map(|v| as_object_paths(v)).unwrap_or_default()
    }

    fn strings(&self, key: &str) -> Vec<String> {
        self.get(key).map(|v| as_strings(v)).unwrap_or_default()
    }
}

/// Decode an SSID byte string, dropping trailing NULs.
pub fn ssid_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_owned()
}
