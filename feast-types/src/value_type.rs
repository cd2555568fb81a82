//! The value-type domain for entity join keys and feature values.
//!
//! Codes and names match the `ValueType.Enum` wire enumeration, so a
//! `ValueType` round-trips through both the binary protobuf encoding (by
//! code) and the proto3 JSON mapping (by name).

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Supported data kinds for an entity's join key.
///
/// `Unknown` is the sentinel an unconfigured entity carries; it never
/// passes validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    #[default]
    Unknown,
    Bytes,
    String,
    Int32,
    Int64,
    Double,
    Float,
    Bool,
    UnixTimestamp,
    BytesList,
    StringList,
    Int32List,
    Int64List,
    DoubleList,
    FloatList,
    BoolList,
    UnixTimestampList,
}

impl ValueType {
    /// Every variant, in wire-code order.
    pub const ALL: [Self; 17] = [
        Self::Unknown,
        Self::Bytes,
        Self::String,
        Self::Int32,
        Self::Int64,
        Self::Double,
        Self::Float,
        Self::Bool,
        Self::UnixTimestamp,
        Self::BytesList,
        Self::StringList,
        Self::Int32List,
        Self::Int64List,
        Self::DoubleList,
        Self::FloatList,
        Self::BoolList,
        Self::UnixTimestampList,
    ];

    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Bytes => 1,
            Self::String => 2,
            Self::Int32 => 3,
            Self::Int64 => 4,
            Self::Double => 5,
            Self::Float => 6,
            Self::Bool => 7,
            Self::UnixTimestamp => 8,
            Self::BytesList => 11,
            Self::StringList => 12,
            Self::Int32List => 13,
            Self::Int64List => 14,
            Self::DoubleList => 15,
            Self::FloatList => 16,
            Self::BoolList => 17,
            Self::UnixTimestampList => 18,
        }
    }

    /// Maps a wire code back to a value type.
    ///
    /// Codes 9 and 10 are unassigned and, like any other code outside the
    /// enumeration, are rejected.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|vt| vt.code() == code)
            .ok_or_else(|| Error::InvalidValueType(code.to_string()))
    }

    /// Returns the canonical upper-case name used by the JSON mapping.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Bytes => "BYTES",
            Self::String => "STRING",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Bool => "BOOL",
            Self::UnixTimestamp => "UNIX_TIMESTAMP",
            Self::BytesList => "BYTES_LIST",
            Self::StringList => "STRING_LIST",
            Self::Int32List => "INT32_LIST",
            Self::Int64List => "INT64_LIST",
            Self::DoubleList => "DOUBLE_LIST",
            Self::FloatList => "FLOAT_LIST",
            Self::BoolList => "BOOL_LIST",
            Self::UnixTimestampList => "UNIX_TIMESTAMP_LIST",
        }
    }

    /// Returns true for the `Unknown` sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true for the repeated (`*_LIST`) kinds.
    #[must_use]
    pub const fn is_list(self) -> bool {
        self.code() >= Self::BytesList.code()
    }

    /// The scalar kind held by a list kind. Scalars map to themselves.
    #[must_use]
    pub const fn element_type(self) -> Self {
        match self {
            Self::BytesList => Self::Bytes,
            Self::StringList => Self::String,
            Self::Int32List => Self::Int32,
            Self::Int64List => Self::Int64,
            Self::DoubleList => Self::Double,
            Self::FloatList => Self::Float,
            Self::BoolList => Self::Bool,
            Self::UnixTimestampList => Self::UnixTimestamp,
            other => other,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|vt| vt.as_str() == s)
            .ok_or_else(|| Error::InvalidValueType(s.to_string()))
    }
}

impl TryFrom<i32> for ValueType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<ValueType> for i32 {
    fn from(vt: ValueType) -> Self {
        vt.code()
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// JSON parsers accept an enum either by name or by numeric code.
#[derive(Deserialize)]
#[serde(untagged)]
enum ValueTypeRepr {
    Name(String),
    Code(i32),
}

impl<'de> Deserialize<'de> for ValueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match ValueTypeRepr::deserialize(deserializer)? {
            ValueTypeRepr::Name(name) => name.parse().map_err(serde::de::Error::custom),
            ValueTypeRepr::Code(code) => Self::from_code(code).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn codes_are_unique() {
        let codes: BTreeSet<i32> = ValueType::ALL.iter().map(|vt| vt.code()).collect();
        assert_eq!(codes.len(), ValueType::ALL.len());
    }

    #[test]
    fn list_boundary() {
        assert!(!ValueType::UnixTimestamp.is_list());
        assert!(ValueType::BytesList.is_list());
    }
}
