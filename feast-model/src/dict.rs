//! Dictionary form of the entity wire message.
//!
//! The dictionary mirrors the proto3 JSON mapping of [`EntityProto`]:
//! lowerCamelCase keys, default-valued fields omitted, enums by name and
//! timestamps as RFC 3339 strings. Parsing is lenient in the same ways a
//! proto3 JSON parser is: original snake_case names are accepted, enums may
//! be given by code, `null` means "default", and unknown fields are ignored.

use crate::error::FeastResult;
use crate::protos::{EntityMeta, EntityProto, EntitySpecV2};
use chrono::{DateTime, Utc};
use feast_types::{timestamp, ValueType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A generic key-value mapping holding one entity.
pub type EntityDict = Map<String, Value>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntityRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    spec: SpecRecord,
    #[serde(default, deserialize_with = "null_as_default")]
    meta: MetaRecord,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecRecord {
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    name: String,
    #[serde(
        default,
        alias = "value_type",
        skip_serializing_if = "is_unknown",
        deserialize_with = "null_as_default"
    )]
    value_type: ValueType,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    description: String,
    #[serde(
        default,
        alias = "join_key",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    join_key: String,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "null_as_default"
    )]
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaRecord {
    #[serde(
        default,
        alias = "created_timestamp",
        skip_serializing_if = "Option::is_none",
        with = "timestamp::rfc3339_option"
    )]
    created_timestamp: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "last_updated_timestamp",
        skip_serializing_if = "Option::is_none",
        with = "timestamp::rfc3339_option"
    )]
    last_updated_timestamp: Option<DateTime<Utc>>,
}

fn is_unknown(vt: &ValueType) -> bool {
    vt.is_unknown()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EntityRecord {
    fn from_proto(proto: &EntityProto) -> FeastResult<Self> {
        let spec = proto.spec.clone().unwrap_or_default();
        let meta = proto.meta.clone().unwrap_or_default();
        Ok(Self {
            spec: SpecRecord {
                name: spec.name,
                value_type: ValueType::from_code(spec.value_type)?,
                description: spec.description,
                join_key: spec.join_key,
                labels: spec.labels,
            },
            meta: MetaRecord {
                created_timestamp: meta
                    .created_timestamp
                    .as_ref()
                    .map(timestamp::from_proto)
                    .transpose()?,
                last_updated_timestamp: meta
                    .last_updated_timestamp
                    .as_ref()
                    .map(timestamp::from_proto)
                    .transpose()?,
            },
        })
    }

    fn into_proto(self) -> EntityProto {
        EntityProto {
            spec: Some(EntitySpecV2 {
                name: self.spec.name,
                value_type: self.spec.value_type.code(),
                description: self.spec.description,
                join_key: self.spec.join_key,
                labels: self.spec.labels,
            }),
            meta: Some(EntityMeta {
                created_timestamp: self.meta.created_timestamp.as_ref().map(timestamp::to_proto),
                last_updated_timestamp: self
                    .meta
                    .last_updated_timestamp
                    .as_ref()
                    .map(timestamp::to_proto),
            }),
        }
    }
}

/// Renders a wire message as a dictionary.
///
/// Both `spec` and `meta` are always present in the output, possibly as
/// empty mappings.
pub fn message_to_dict(proto: &EntityProto) -> FeastResult<EntityDict> {
    let record = EntityRecord::from_proto(proto)?;
    Ok(serde_json::from_value(serde_json::to_value(record)?)?)
}

/// Parses a dictionary into a wire message, ignoring unknown fields.
pub fn dict_to_message(dict: &EntityDict) -> FeastResult<EntityProto> {
    let record: EntityRecord = serde_json::from_value(Value::Object(dict.clone()))?;
    Ok(record.into_proto())
}
