//! Wire messages for the `feast.core` entity schema.
//!
//! Hand-written `prost` definitions matching `feast/core/Entity.proto`:
//!
//! ```text
//! message Entity       { EntitySpecV2 spec = 1; EntityMeta meta = 2; }
//! message EntitySpecV2 { string name = 1; ValueType.Enum value_type = 2;
//!                        string description = 3; string join_key = 4;
//!                        map<string, string> labels = 8; }
//! message EntityMeta   { google.protobuf.Timestamp created_timestamp = 1;
//!                        google.protobuf.Timestamp last_updated_timestamp = 2; }
//! ```
//!
//! `value_type` is kept as its raw `i32` code; decoding it into a
//! `ValueType` happens in `Entity::from_proto` so unknown codes surface as
//! a typed error instead of being silently mapped.

use std::collections::BTreeMap;

/// Full entity record: user-specified spec plus system-assigned meta.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityProto {
    #[prost(message, optional, tag = "1")]
    pub spec: Option<EntitySpecV2>,
    #[prost(message, optional, tag = "2")]
    pub meta: Option<EntityMeta>,
}

/// User-specified entity fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntitySpecV2 {
    #[prost(string, tag = "1")]
    pub name: String,
    /// Raw `ValueType.Enum` code.
    #[prost(int32, tag = "2")]
    pub value_type: i32,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub join_key: String,
    #[prost(btree_map = "string, string", tag = "8")]
    pub labels: BTreeMap<String, String>,
}

/// System-assigned bookkeeping fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityMeta {
    #[prost(message, optional, tag = "1")]
    pub created_timestamp: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub last_updated_timestamp: Option<::prost_types::Timestamp>,
}

impl EntityMeta {
    /// True when neither timestamp is set.
    pub fn is_empty(&self) -> bool {
        self.created_timestamp.is_none() && self.last_updated_timestamp.is_none()
    }
}
