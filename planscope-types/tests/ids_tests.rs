use planscope_types::{AttachmentId, EntityId, PrototypeId};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── EntityId ──────────────────────────────────────────────────────

#[test]
fn entity_id_wraps_raw_value() {
    let id = EntityId::new(4214);
    assert_eq!(id.get(), 4214);
    assert_eq!(EntityId::from(4214), id);
}

#[test]
fn entity_id_display_and_parse() {
    let id = EntityId::new(118);
    let s = id.to_string();
    assert_eq!(s, "118");
    assert_eq!(EntityId::parse(&s).unwrap(), id);
}

#[test]
fn entity_id_from_str_trims_whitespace() {
    let parsed = EntityId::from_str(" 42 ").unwrap();
    assert_eq!(parsed, EntityId::new(42));
}

#[test]
fn entity_id_parse_invalid() {
    assert!(EntityId::parse("not-a-number").is_err());
    assert!(EntityId::parse("-3").is_err());
}

#[test]
fn entity_id_hash_and_eq() {
    let id = EntityId::new(7);
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn entity_id_orders_numerically() {
    let mut ids = vec![EntityId::new(30), EntityId::new(4), EntityId::new(12)];
    ids.sort();
    assert_eq!(ids, vec![EntityId::new(4), EntityId::new(12), EntityId::new(30)]);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn id_deserializes_from_number() {
    let id: EntityId = serde_json::from_str("9001").unwrap();
    assert_eq!(id.get(), 9001);
}

#[test]
fn id_deserializes_from_numeric_string() {
    let id: PrototypeId = serde_json::from_str("\"77\"").unwrap();
    assert_eq!(id.get(), 77);
}

#[test]
fn id_rejects_garbage_string() {
    assert!(serde_json::from_str::<AttachmentId>("\"abc\"").is_err());
}

#[test]
fn id_serializes_as_number() {
    let json = serde_json::to_string(&AttachmentId::new(5)).unwrap();
    assert_eq!(json, "5");
}

proptest! {
    #[test]
    fn display_parse_roundtrip(raw in any::<u64>()) {
        let id = EntityId::new(raw);
        prop_assert_eq!(EntityId::parse(&id.to_string()).unwrap(), id);
    }
}
