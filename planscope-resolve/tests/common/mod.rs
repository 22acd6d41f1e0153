#![allow(dead_code)]

use planscope_model::{Entity, PlanDataset};
use serde_json::{Value, json};

pub fn plan_entity(id: u64, prototype: u64, ref_code: &str, can_support: Value, support: &[u64]) -> Entity {
    let support: Value = if support.is_empty() {
        Value::Null
    } else {
        json!([{"planEntityIds": support}])
    };
    serde_json::from_value(json!({
        "id": id,
        "composedReference": format!("{ref_code}{id}"),
        "entityPrototype": {
            "id": prototype,
            "type": "PE",
            "refCode": ref_code,
            "value": {
                "name": {"en": {"singular": ref_code, "plural": ref_code}},
                "canSupport": can_support
            }
        },
        "planEntityVersion": {
            "customReference": format!("{ref_code}{id}"),
            "value": {"support": support}
        }
    }))
    .unwrap()
}

pub fn governing_entity(id: u64, parent_id: Option<u64>) -> Entity {
    serde_json::from_value(json!({
        "id": id,
        "parentId": parent_id,
        "composedReference": format!("CL{id}"),
        "entityPrototype": {"id": 9, "type": "GVE", "refCode": "CL"},
        "governingEntityVersion": {"customReference": format!("CL{id}")}
    }))
    .unwrap()
}

pub fn with_parent(mut entity: Entity, parent_id: u64) -> Entity {
    entity.parent_id = Some(parent_id.into());
    entity
}

/// SP 100 <- SO 200, 201 <- CQ 300 (-> 200), 301 (-> 201) <- CA 400, 401.
/// Cluster objectives 400/401 sit below clusters 900/901.
pub fn hierarchy() -> PlanDataset {
    PlanDataset::new(
        vec![
            plan_entity(100, 1, "SP", Value::Null, &[]),
            plan_entity(200, 2, "SO", json!([{"id": 1}]), &[100]),
            plan_entity(201, 2, "SO", json!([{"id": 1}]), &[100]),
            plan_entity(300, 3, "CQ", json!({"xor": [{"id": 2}]}), &[200]),
            plan_entity(301, 3, "CQ", json!({"xor": [{"id": 2}]}), &[201]),
            with_parent(plan_entity(400, 4, "CA", json!([{"id": 3}]), &[300]), 900),
            with_parent(plan_entity(401, 4, "CA", json!([{"id": 3}]), &[301]), 901),
        ],
        vec![governing_entity(900, None), governing_entity(901, None)],
    )
}

pub fn ids(entities: &[&Entity]) -> Vec<u64> {
    entities.iter().map(|e| e.id.get()).collect()
}
