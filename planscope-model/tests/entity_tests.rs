use planscope_model::{Entity, EntityKind, ModelError, dot_path_to_pointer, value_at_path};
use planscope_types::{EntityId, PrototypeId};
use pretty_assertions::assert_eq;
use serde_json::json;

fn entity(value: serde_json::Value) -> Entity {
    serde_json::from_value(value).unwrap()
}

fn strategic_objective() -> Entity {
    entity(json!({
        "id": 501,
        "composedReference": "SO1",
        "parentId": 12,
        "parents": [{"parentId": 12}, {"parentId": 14}],
        "planId": 1100,
        "entityPrototype": {
            "id": 101,
            "type": "PE",
            "refCode": "SO",
            "orderNumber": 1,
            "value": {
                "name": {"en": {"singular": "Strategic Objective", "plural": "Strategic Objectives"}},
                "canSupport": {"xor": [{"id": 100}, {"refCode": "SP"}]},
                "possibleChildren": [{"id": 102}]
            }
        },
        "planEntityVersion": {
            "customReference": "SO1",
            "value": {
                "description": "Reduce mortality",
                "icon": "so-icon",
                "orderNumber": "2",
                "support": [{"planEntityIds": [400, "401"]}, {"planEntityIds": [400]}]
            }
        }
    }))
}

// ── Version resolution ───────────────────────────────────────────

#[test]
fn version_prefers_plan_version() {
    let e = entity(json!({
        "id": 1,
        "entityPrototype": {"id": 1, "type": "PE", "refCode": "SO"},
        "planVersion": {"customReference": "P"},
        "governingEntityVersion": {"customReference": "G"}
    }));
    assert_eq!(e.version().unwrap().custom_reference, "P");
}

#[test]
fn version_falls_through_to_governing_entity_version() {
    let e = entity(json!({
        "id": 2,
        "entityPrototype": {"id": 9, "type": "GVE", "refCode": "CL"},
        "governingEntityVersion": {"customReference": "CL-HEALTH"}
    }));
    assert_eq!(e.version().unwrap().custom_reference, "CL-HEALTH");
}

#[test]
fn version_is_none_without_any_slot() {
    let e = entity(json!({"id": 3, "entityPrototype": {"id": 9, "type": "GVE"}}));
    assert!(e.version().is_none());
    assert!(!e.has_support());
    assert!(e.support_plan_ids().is_empty());
}

#[test]
fn validate_rejects_multiple_versions() {
    let e = entity(json!({
        "id": 4,
        "entityPrototype": {"id": 1, "type": "PE"},
        "planEntityVersion": {},
        "governingEntityVersion": {}
    }));
    match e.validate() {
        Err(ModelError::AmbiguousVersion { id, count }) => {
            assert_eq!(id, EntityId::new(4));
            assert_eq!(count, 2);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(strategic_objective().validate().is_ok());
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn accessors_read_prototype_and_version() {
    let e = strategic_objective();
    assert_eq!(e.kind(), Some(EntityKind::Plan));
    assert_eq!(e.prototype_id(), PrototypeId::new(101));
    assert_eq!(e.ref_code(), "SO");
    assert_eq!(e.custom_reference(), Some("SO1"));
    assert_eq!(e.description(), Some("Reduce mortality"));
    assert_eq!(e.order_number(), Some(2.0));
    assert_eq!(e.type_label(), Some("Strategic Objective"));
    assert_eq!(e.display_name(), "Strategic Objective SO1");
}

#[test]
fn display_name_falls_back_to_composed_reference() {
    let e = entity(json!({
        "id": 5,
        "composedReference": "CL5",
        "entityPrototype": {"id": 9, "type": "GVE"}
    }));
    assert_eq!(e.display_name(), "CL5");
}

#[test]
fn parent_ids_merge_both_pointer_styles() {
    let e = strategic_objective();
    assert_eq!(e.parent_ids(), vec![EntityId::new(12), EntityId::new(14)]);
}

#[test]
fn support_plan_ids_are_deduplicated_in_order() {
    let e = strategic_objective();
    assert!(e.has_support());
    assert_eq!(e.support_plan_ids(), vec![EntityId::new(400), EntityId::new(401)]);
    assert_eq!(
        e.version().unwrap().primary_support_target(),
        Some(EntityId::new(400))
    );
}

#[test]
fn empty_support_list_counts_as_undeclared() {
    let e = entity(json!({
        "id": 6,
        "entityPrototype": {"id": 1, "type": "PE"},
        "planEntityVersion": {"value": {"support": []}}
    }));
    assert!(!e.has_support());
    assert_eq!(e.version().unwrap().primary_support_target(), None);
}

// ── canSupport normalization ─────────────────────────────────────

#[test]
fn can_support_xor_is_unwrapped() {
    let e = strategic_objective();
    let can_support = e.entity_prototype.value.can_support.as_ref().unwrap();
    assert!(can_support.exclusive);
    assert_eq!(can_support.refs.len(), 2);
    assert!(can_support.allows(Some(PrototypeId::new(100)), None));
    assert!(!can_support.allows(Some(PrototypeId::new(999)), Some("SO")));
    assert!(can_support.allows(None, Some("SP")));
    assert!(e.entity_prototype.has_support_capabilities());
}

#[test]
fn can_support_plain_list_and_bare_ids() {
    let e = entity(json!({
        "id": 7,
        "entityPrototype": {"id": 3, "type": "PE", "value": {"canSupport": [100, {"id": "101"}]}}
    }));
    let can_support = e.entity_prototype.value.can_support.as_ref().unwrap();
    assert!(!can_support.exclusive);
    assert!(can_support.allows(Some(PrototypeId::new(100)), None));
    assert!(can_support.allows(Some(PrototypeId::new(101)), None));
}

#[test]
fn id_only_refs_do_not_constrain_ref_code_lookups() {
    let e = entity(json!({
        "id": 8,
        "entityPrototype": {"id": 4, "type": "PE", "value": {"canSupport": [{"id": 1}]}}
    }));
    let can_support = e.entity_prototype.value.can_support.as_ref().unwrap();
    assert!(can_support.allows(None, Some("SO")));
    assert!(!can_support.allows(Some(PrototypeId::new(2)), Some("SO")));

    let coded = entity(json!({
        "id": 9,
        "entityPrototype": {"id": 4, "type": "PE", "value": {"canSupport": [{"id": 1, "refCode": "SP"}]}}
    }));
    let can_support = coded.entity_prototype.value.can_support.as_ref().unwrap();
    assert!(can_support.allows(None, Some("SP")));
    assert!(!can_support.allows(None, Some("SO")));
}

#[test]
fn empty_can_support_is_no_capability() {
    let e = entity(json!({
        "id": 8,
        "entityPrototype": {"id": 3, "type": "PE", "value": {"canSupport": []}}
    }));
    assert!(!e.entity_prototype.has_support_capabilities());
}

#[test]
fn can_support_serializes_back_to_original_shape() {
    let e = strategic_objective();
    assert_eq!(
        e.property("entityPrototype.value.canSupport.xor.0.id"),
        Some(json!(100))
    );
}

// ── Property paths ───────────────────────────────────────────────

#[test]
fn property_reads_known_and_unknown_fields() {
    let e = strategic_objective();
    assert_eq!(e.property_str("entityPrototype.refCode"), Some("SO".to_string()));
    assert_eq!(e.property("planId"), Some(json!(1100)));
    assert_eq!(
        e.property("planEntityVersion.value.support.0.planEntityIds.1"),
        Some(json!(401))
    );
    assert_eq!(e.property("planEntityVersion.value.missing"), None);
}

#[test]
fn dot_paths_convert_to_pointers() {
    assert_eq!(dot_path_to_pointer("a.b.0"), "/a/b/0");
    assert_eq!(dot_path_to_pointer("a/b.c~d"), "/a~1b/c~0d");
    assert_eq!(dot_path_to_pointer(""), "");
}

#[test]
fn value_at_path_reuses_one_serialization() {
    let e = strategic_objective();
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(value_at_path(&json, "entityPrototype.refCode"), Some(&json!("SO")));
    assert_eq!(value_at_path(&json, "parents.1.parentId"), Some(&json!(14)));
    assert_eq!(value_at_path(&json, "nope.nope"), None);
    assert_eq!(
        e.property("entityPrototype.refCode").as_ref(),
        value_at_path(&json, "entityPrototype.refCode")
    );
}
