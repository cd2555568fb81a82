//! Entity model for the Feast feature store SDK.
//!
//! Defines the join-key abstraction every feature view depends on and its
//! interchangeable representations:
//! - [`Entity`] — in-memory value object (name, value type, join key, labels, timestamps)
//! - [`EntityProto`] — protobuf wire message with `spec` and `meta` sections
//! - [`EntityDict`] — proto3 JSON mapping, the base of the YAML form
//! - [`loader`] — YAML file/string loading
//!
//! Registries and clients that store entities are outside this crate; they
//! exchange entities through these types.

mod dict;
mod entity;
mod error;
pub mod loader;
pub mod protos;
pub mod usage;

pub use dict::{dict_to_message, message_to_dict, EntityDict};
pub use entity::Entity;
pub use error::{FeastError, FeastResult};
pub use feast_types::ValueType;
pub use protos::{EntityMeta, EntityProto, EntitySpecV2};
