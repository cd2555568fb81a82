//! Property-based tests for entity conversions.
//!
//! Every representation must carry the fields that take part in equality,
//! and timestamps must survive whenever they were set.

use chrono::{DateTime, TimeZone, Utc};
use feast_model::{Entity, ValueType};
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn value_type_strategy() -> impl Strategy<Value = ValueType> {
    prop::sample::select(ValueType::ALL.to_vec())
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_ äöü]{0,24}").unwrap()
}

fn labels_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,8}", text_strategy(), 0..4)
}

fn timestamp_strategy() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop::option::of(
        (0i64..4_102_444_800, 0u32..1_000_000_000)
            .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap()),
    )
}

fn entity_strategy() -> impl Strategy<Value = Entity> {
    (
        "[a-z][a-z0-9_]{0,16}",
        value_type_strategy(),
        text_strategy(),
        prop::option::of("[a-z][a-z0-9_]{0,16}"),
        labels_strategy(),
        timestamp_strategy(),
        timestamp_strategy(),
    )
        .prop_map(|(name, vt, description, join_key, labels, created, updated)| {
            let mut e = Entity::new(name, vt)
                .with_description(description)
                .with_join_key(join_key.unwrap_or_default())
                .with_labels(labels);
            e.created_timestamp = created;
            e.last_updated_timestamp = updated;
            e
        })
}

fn assert_same(restored: &Entity, original: &Entity) -> Result<(), TestCaseError> {
    prop_assert_eq!(restored, original);
    prop_assert_eq!(restored.created_timestamp, original.created_timestamp);
    prop_assert_eq!(
        restored.last_updated_timestamp,
        original.last_updated_timestamp
    );
    Ok(())
}

proptest! {
    #[test]
    fn proto_round_trip(e in entity_strategy()) {
        assert_same(&Entity::from_proto(&e.to_proto()).unwrap(), &e)?;
    }

    #[test]
    fn bytes_round_trip(e in entity_strategy()) {
        assert_same(&Entity::from_bytes(&e.to_bytes()).unwrap(), &e)?;
    }

    #[test]
    fn dict_round_trip(e in entity_strategy()) {
        assert_same(&Entity::from_dict(&e.to_dict().unwrap()).unwrap(), &e)?;
    }

    #[test]
    fn yaml_round_trip(e in entity_strategy()) {
        assert_same(&Entity::from_yaml(&e.to_yaml().unwrap()).unwrap(), &e)?;
    }

    /// `meta` appears in the dictionary exactly when a timestamp is set.
    #[test]
    fn meta_presence(e in entity_strategy()) {
        let has_timestamp = e.created_timestamp.is_some() || e.last_updated_timestamp.is_some();
        prop_assert_eq!(e.to_dict().unwrap().contains_key("meta"), has_timestamp);
    }

    #[test]
    fn join_key_never_empty(e in entity_strategy()) {
        prop_assert!(!e.join_key.is_empty());
    }

    #[test]
    fn update_from_copies_everything(a in entity_strategy(), b in entity_strategy()) {
        let mut target = a;
        target.update_from(&b);
        assert_same(&target, &b)?;
    }
}
