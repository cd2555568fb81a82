use crate::dict::{self, EntityDict};
use crate::error::{FeastError, FeastResult};
use crate::loader;
use crate::protos::{EntityMeta, EntityProto, EntitySpecV2};
use crate::usage::log_exceptions;
use chrono::{DateTime, Utc};
use feast_types::{timestamp, ValueType};
use prost::Message;
use serde_json::Value;
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A named, typed join key that associates features with real-world objects.
///
/// Equality and hashing cover `labels`, `name`, `description`, `value_type`
/// and `join_key`. Timestamps and `owner` are bookkeeping and never take
/// part in comparisons.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub value_type: ValueType,
    /// Column used to join entity rows with feature values. Falls back to
    /// `name` when not given.
    pub join_key: String,
    pub description: String,
    pub labels: BTreeMap<String, String>,
    /// Reserved. Not read from or written to any representation.
    pub owner: String,
    pub created_timestamp: Option<DateTime<Utc>>,
    pub last_updated_timestamp: Option<DateTime<Utc>>,
}

impl Entity {
    /// Creates an entity whose join key is its name.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        let name = name.into();
        Self {
            join_key: name.clone(),
            name,
            value_type,
            description: String::new(),
            labels: BTreeMap::new(),
            owner: String::new(),
            created_timestamp: None,
            last_updated_timestamp: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the join key. An empty key falls back to the entity name.
    pub fn with_join_key(mut self, join_key: impl Into<String>) -> Self {
        let join_key = join_key.into();
        self.join_key = if join_key.is_empty() {
            self.name.clone()
        } else {
            join_key
        };
        self
    }

    /// Replaces all labels with the given pairs.
    pub fn with_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels = labels
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_created_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.created_timestamp = Some(ts);
        self
    }

    pub fn with_last_updated_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.last_updated_timestamp = Some(ts);
        self
    }

    /// Validates the entity locally: it needs a name and a known type.
    pub fn is_valid(&self) -> FeastResult<()> {
        if self.name.is_empty() {
            return Err(FeastError::Validation("No name found in entity.".into()));
        }
        if self.value_type.is_unknown() {
            return Err(FeastError::Validation(format!(
                "No type found in entity {}.",
                self.name
            )));
        }
        Ok(())
    }

    /// Compares against a value of any type.
    ///
    /// Comparing with anything other than an `Entity` is an error, not a
    /// `false` result.
    pub fn try_eq<T: Any>(&self, other: &T) -> FeastResult<bool> {
        (other as &dyn Any)
            .downcast_ref::<Self>()
            .map(|other| self == other)
            .ok_or_else(|| FeastError::TypeMismatch {
                found: type_name::<T>().to_string(),
            })
    }

    // ── Wire form ────────────────────────────────────────────────

    /// Builds an entity from its wire message.
    ///
    /// A missing `spec` reads as an empty one. Meta timestamps are only set
    /// when present on the message.
    pub fn from_proto(proto: &EntityProto) -> FeastResult<Self> {
        log_exceptions("Entity::from_proto", || Self::decode_proto(proto))
    }

    fn decode_proto(proto: &EntityProto) -> FeastResult<Self> {
        let spec = proto.spec.clone().unwrap_or_default();
        let mut entity = Self::new(spec.name, ValueType::from_code(spec.value_type)?)
            .with_description(spec.description)
            .with_join_key(spec.join_key);
        entity.labels = spec.labels;

        if let Some(meta) = &proto.meta {
            entity.created_timestamp = meta
                .created_timestamp
                .as_ref()
                .map(timestamp::from_proto)
                .transpose()?;
            entity.last_updated_timestamp = meta
                .last_updated_timestamp
                .as_ref()
                .map(timestamp::from_proto)
                .transpose()?;
        }
        Ok(entity)
    }

    /// Converts to the full wire message. Unset timestamps stay unset.
    pub fn to_proto(&self) -> EntityProto {
        let meta = EntityMeta {
            created_timestamp: self.created_timestamp.as_ref().map(timestamp::to_proto),
            last_updated_timestamp: self
                .last_updated_timestamp
                .as_ref()
                .map(timestamp::to_proto),
        };
        EntityProto {
            spec: Some(self.to_spec_proto()),
            meta: Some(meta),
        }
    }

    /// Converts to the spec-only message sent with registry requests.
    pub fn to_spec_proto(&self) -> EntitySpecV2 {
        EntitySpecV2 {
            name: self.name.clone(),
            value_type: self.value_type.code(),
            description: self.description.clone(),
            join_key: self.join_key.clone(),
            labels: self.labels.clone(),
        }
    }

    /// Encodes the full wire message as protobuf bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    /// Decodes an entity from protobuf bytes.
    pub fn from_bytes(bytes: &[u8]) -> FeastResult<Self> {
        log_exceptions("Entity::from_bytes", || {
            Self::decode_proto(&EntityProto::decode(bytes)?)
        })
    }

    // ── Dictionary and YAML forms ────────────────────────────────

    /// Builds an entity from its dictionary form. Unknown fields are ignored.
    pub fn from_dict(dict: &EntityDict) -> FeastResult<Self> {
        log_exceptions("Entity::from_dict", || {
            Self::decode_proto(&dict::dict_to_message(dict)?)
        })
    }

    /// Converts to the dictionary form, dropping `meta` when it is empty.
    pub fn to_dict(&self) -> FeastResult<EntityDict> {
        let mut dict = dict::message_to_dict(&self.to_proto())?;
        if dict
            .get("meta")
            .and_then(Value::as_object)
            .is_some_and(|meta| meta.is_empty())
        {
            dict.remove("meta");
        }
        Ok(dict)
    }

    /// Builds an entity from a YAML file path or a YAML string holding a
    /// single document.
    pub fn from_yaml(input: &str) -> FeastResult<Self> {
        log_exceptions("Entity::from_yaml", || {
            let dict = loader::yaml_loader_single(input)?;
            Self::decode_proto(&dict::dict_to_message(&dict)?)
        })
    }

    /// Builds an entity from YAML text holding a single document. The text
    /// is never interpreted as a path.
    pub fn from_yaml_str(text: &str) -> FeastResult<Self> {
        log_exceptions("Entity::from_yaml_str", || {
            let dict = loader::parse_yaml_str_single(text)?;
            Self::decode_proto(&dict::dict_to_message(&dict)?)
        })
    }

    /// Renders the dictionary form as YAML, keeping key order.
    pub fn to_yaml(&self) -> FeastResult<String> {
        Ok(serde_yaml::to_string(&Value::Object(self.to_dict()?))?)
    }

    /// Pretty JSON of the full wire message, `meta` included.
    pub fn to_json(&self) -> FeastResult<String> {
        let dict = dict::message_to_dict(&self.to_proto())?;
        Ok(serde_json::to_string_pretty(&dict)?)
    }

    /// Replaces every field with the corresponding field of `other`.
    ///
    /// This is a full overwrite: unset timestamps on `other` clear the ones
    /// held here. `owner` is left alone.
    pub fn update_from(&mut self, other: &Self) {
        debug!(entity = %self.name, source = %other.name, "Replacing entity fields");
        self.name.clone_from(&other.name);
        self.description.clone_from(&other.description);
        self.value_type = other.value_type;
        self.labels.clone_from(&other.labels);
        self.join_key.clone_from(&other.join_key);
        self.created_timestamp = other.created_timestamp;
        self.last_updated_timestamp = other.last_updated_timestamp;
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
            && self.name == other.name
            && self.description == other.description
            && self.value_type == other.value_type
            && self.join_key == other.join_key
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.labels.hash(state);
        self.name.hash(state);
        self.description.hash(state);
        self.value_type.hash(state);
        self.join_key.hash(state);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl TryFrom<&EntityProto> for Entity {
    type Error = FeastError;

    fn try_from(proto: &EntityProto) -> FeastResult<Self> {
        Self::from_proto(proto)
    }
}

impl From<&Entity> for EntityProto {
    fn from(entity: &Entity) -> Self {
        entity.to_proto()
    }
}
