//! Nested string-mapping type produced by the certificate info builder

use serde::Serialize;
use std::collections::BTreeMap;

/// A mapping from field labels to rendered values.
///
/// Values are either flat strings/integers or nested groups of
/// sub-fields (`issuer`, `subject`, `validity`, `public_key`, `san`).
/// The same label always maps to the same value shape; absent source
/// data renders as an empty string, never as an omitted key.
pub type Info = BTreeMap<String, InfoValue>;

/// A single value inside an [`Info`] mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InfoValue {
    /// An integer field such as `version` or `size_in_bits`
    Number(i64),
    /// A flat rendered string
    Text(String),
    /// A nested group of sub-fields
    Group(Info),
}

impl InfoValue {
    /// Return the string content if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Return the integer content if this is a numeric value
    pub fn as_number(&self) -> Option<i64> {
        match self {
            InfoValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Return the nested mapping if this is a group value
    pub fn as_group(&self) -> Option<&Info> {
        match self {
            InfoValue::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<String> for InfoValue {
    fn from(s: String) -> Self {
        InfoValue::Text(s)
    }
}

impl From<&str> for InfoValue {
    fn from(s: &str) -> Self {
        InfoValue::Text(s.to_string())
    }
}

impl From<u32> for InfoValue {
    fn from(n: u32) -> Self {
        InfoValue::Number(i64::from(n))
    }
}

impl From<Info> for InfoValue {
    fn from(g: Info) -> Self {
        InfoValue::Group(g)
    }
}
