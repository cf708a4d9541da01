//! Field trees parsed from event descriptions, and typed accessors over them.
//!
//! Every accessor is total: a missing key, a node of the wrong shape, or a
//! value that fails conversion all come back as "absent". The `lookup_*`
//! variants keep the distinction between absent and malformed for
//! diagnostics; the skip decision treats both the same.

use std::collections::BTreeMap;

use alloy_primitives::Bytes;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::util::BigInt;

/// A node in a parsed description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Object(BTreeMap<String, FieldValue>),
    Str(String),
    Absent,
}

static ABSENT: FieldValue = FieldValue::Absent;

impl From<JsonValue> for FieldValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => FieldValue::Str(s),
            // Integers keep their literal text (arbitrary precision); floats are dropped
            JsonValue::Number(n) => {
                let text = n.to_string();
                let digits = text.strip_prefix('-').unwrap_or(&text);
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    FieldValue::Str(text)
                } else {
                    FieldValue::Absent
                }
            }
            JsonValue::Object(map) => {
                FieldValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            _ => FieldValue::Absent,
        }
    }
}

impl FieldValue {
    /// Try to get as a non-empty string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Get a child node by key. Non-objects have no children.
    pub fn get(&self, key: &str) -> &FieldValue {
        match self {
            FieldValue::Object(map) => map.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }
}

/// Why a description could not become a field tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("empty description")]
    Empty,

    #[error("description is not an object")]
    NotAnObject,
}

/// Why a single field could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFault {
    /// Key missing, not a string, or an empty string.
    Absent,
    /// Present, but failed numeric or hex conversion.
    Malformed,
}

/// A parsed description whose root is known to be an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTree {
    root: FieldValue,
}

impl FieldTree {
    pub fn parse(description: &str) -> Result<Self, ParseFailure> {
        if description.is_empty() {
            return Err(ParseFailure::Empty);
        }

        let json: JsonValue =
            serde_json::from_str(description).map_err(|_| ParseFailure::NotAnObject)?;

        match FieldValue::from(json) {
            root @ FieldValue::Object(_) => Ok(Self { root }),
            _ => Err(ParseFailure::NotAnObject),
        }
    }

    pub fn get(&self, key: &str) -> &FieldValue {
        self.root.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.lookup_string(key).ok()
    }

    pub fn get_big_int(&self, key: &str) -> Option<BigInt> {
        self.lookup_big_int(key).ok()
    }

    pub fn get_bytes(&self, key: &str) -> Option<Bytes> {
        self.lookup_bytes(key).ok()
    }

    pub fn lookup_string(&self, key: &str) -> Result<&str, FieldFault> {
        self.get(key).as_str().ok_or(FieldFault::Absent)
    }

    pub fn lookup_big_int(&self, key: &str) -> Result<BigInt, FieldFault> {
        BigInt::parse_decimal(self.lookup_string(key)?).ok_or(FieldFault::Malformed)
    }

    pub fn lookup_bytes(&self, key: &str) -> Result<Bytes, FieldFault> {
        parse_hex_bytes(self.lookup_string(key)?).ok_or(FieldFault::Malformed)
    }
}

/// Optional `0x` prefix, then even-length hex.
fn parse_hex_bytes(s: &str) -> Option<Bytes> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).ok().map(Bytes::from)
}

/// Offending field names collected while reading one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFaults {
    pub missing: Vec<&'static str>,
    pub malformed: Vec<&'static str>,
}

impl FieldFaults {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.malformed.is_empty()
    }
}

/// Reads typed fields from a tree, remembering every fault.
///
/// Reads are independent: a fault on one key never stops the others from
/// being read, so the collected faults name every bad field.
pub struct FieldReader<'a> {
    tree: &'a FieldTree,
    faults: FieldFaults,
}

impl<'a> FieldReader<'a> {
    pub fn new(tree: &'a FieldTree) -> Self {
        Self {
            tree,
            faults: FieldFaults::default(),
        }
    }

    pub fn string(&mut self, key: &'static str) -> Option<String> {
        let result = self.tree.lookup_string(key).map(str::to_string);
        self.record(key, result)
    }

    pub fn big_int(&mut self, key: &'static str) -> Option<BigInt> {
        let result = self.tree.lookup_big_int(key);
        self.record(key, result)
    }

    pub fn bytes(&mut self, key: &'static str) -> Option<Bytes> {
        let result = self.tree.lookup_bytes(key);
        self.record(key, result)
    }

    fn record<T>(&mut self, key: &'static str, result: Result<T, FieldFault>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(FieldFault::Absent) => {
                self.faults.missing.push(key);
                None
            }
            Err(FieldFault::Malformed) => {
                self.faults.malformed.push(key);
                None
            }
        }
    }

    pub fn into_faults(self) -> FieldFaults {
        self.faults
    }
}
