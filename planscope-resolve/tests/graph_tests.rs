mod common;

use common::{governing_entity, hierarchy, ids, plan_entity};
use planscope_model::{Entity, PlanDataset};
use planscope_resolve::{EntityGraph, order_entities};
use planscope_types::EntityId;
use serde_json::{Value, json};

#[test]
fn graph_indexes_both_lists() {
    let data = hierarchy();
    let graph = EntityGraph::new(&data);
    assert!(!graph.is_empty());
    assert_eq!(graph.plan_entities().len(), 7);
    assert_eq!(graph.governing_entities().len(), 2);
    assert_eq!(graph.get(EntityId::new(901)).unwrap().ref_code(), "CL");
    assert!(graph.get(EntityId::new(12345)).is_none());
    assert_eq!(graph.entities().count(), 9);
}

#[test]
fn first_occurrence_wins_on_duplicate_ids() {
    let data = PlanDataset::new(
        vec![plan_entity(1, 1, "SO", Value::Null, &[])],
        vec![governing_entity(1, None)],
    );
    let graph = EntityGraph::new(&data);
    assert_eq!(graph.get(EntityId::new(1)).unwrap().ref_code(), "SO");
}

#[test]
fn children_follow_both_parent_pointers() {
    let child: Entity = serde_json::from_value(json!({
        "id": 50,
        "parents": [{"parentId": 901}],
        "parentId": 900,
        "entityPrototype": {"id": 4, "type": "PE", "refCode": "CA"}
    }))
    .unwrap();
    let mut data = hierarchy();
    data.plan_entities.push(child);
    let graph = EntityGraph::new(&data);

    assert_eq!(ids(&graph.children_of(EntityId::new(900))), vec![400, 50]);
    assert_eq!(ids(&graph.children_of(EntityId::new(901))), vec![401, 50]);
    assert!(graph.children_of(EntityId::new(100)).is_empty());
}

#[test]
fn from_entities_sorts_by_family() {
    let data = hierarchy();
    let graph = EntityGraph::from_entities(data.entities());
    assert_eq!(graph.plan_entities().len(), 7);
    assert_eq!(graph.governing_entities().len(), 2);
}

#[test]
fn empty_graph() {
    let data = PlanDataset::default();
    assert!(EntityGraph::new(&data).is_empty());
}

#[test]
fn order_entities_by_prototype_then_version_then_id() {
    let make = |id: u64, proto_order: Option<u64>, order: Option<&str>| -> Entity {
        serde_json::from_value(json!({
            "id": id,
            "entityPrototype": {"id": 1, "type": "PE", "orderNumber": proto_order},
            "planEntityVersion": {"value": {"orderNumber": order}}
        }))
        .unwrap()
    };
    let entities = [
        make(1, Some(2), Some("1")),
        make(2, Some(1), Some("3")),
        make(3, Some(1), Some("2")),
        make(4, None, Some("1")),
        make(5, Some(1), None),
        make(6, Some(1), Some("2")),
    ];
    let mut refs: Vec<&Entity> = entities.iter().collect();
    order_entities(&mut refs);
    assert_eq!(ids(&refs), vec![3, 6, 2, 5, 1, 4]);
}
