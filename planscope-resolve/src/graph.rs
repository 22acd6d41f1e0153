//! Explicit graph view over a flat [`PlanDataset`].
//!
//! The API encodes hierarchy as id cross-references (`parentId`, `parents`,
//! `support`). [`EntityGraph`] indexes every entity by id once so those
//! references resolve with a hash lookup instead of a scan of both lists.

use planscope_model::{Entity, EntityKind, PlanDataset};
use planscope_types::EntityId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Borrowed id index over one dataset snapshot.
#[derive(Debug, Clone)]
pub struct EntityGraph<'a> {
    plan_entities: Vec<&'a Entity>,
    governing_entities: Vec<&'a Entity>,
    by_id: HashMap<EntityId, &'a Entity>,
    children: HashMap<EntityId, Vec<EntityId>>,
}

impl<'a> EntityGraph<'a> {
    /// Indexes a dataset. When an id occurs more than once the first
    /// occurrence wins, plan entities before governing entities.
    #[must_use]
    pub fn new(dataset: &'a PlanDataset) -> Self {
        Self::build(
            dataset.plan_entities.iter().collect(),
            dataset.governing_entities.iter().collect(),
        )
    }

    /// Indexes a loose entity collection, sorting each entity into a family
    /// by its prototype type. Entities of unknown type are indexed but belong
    /// to neither list. Ids are indexed in input order, so the first
    /// occurrence in the collection wins.
    pub fn from_entities(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let entities: Vec<&'a Entity> = entities.into_iter().collect();
        let mut graph = Self::unindexed(
            entities
                .iter()
                .copied()
                .filter(|e| e.kind() == Some(EntityKind::Plan))
                .collect(),
            entities
                .iter()
                .copied()
                .filter(|e| e.kind() == Some(EntityKind::Governing))
                .collect(),
        );
        for entity in entities {
            graph.index(entity);
        }
        graph
    }

    fn build(plan_entities: Vec<&'a Entity>, governing_entities: Vec<&'a Entity>) -> Self {
        let mut graph = Self::unindexed(plan_entities, governing_entities);
        let all: Vec<&'a Entity> = graph.entities().collect();
        for entity in all {
            graph.index(entity);
        }
        graph
    }

    fn unindexed(plan_entities: Vec<&'a Entity>, governing_entities: Vec<&'a Entity>) -> Self {
        Self {
            plan_entities,
            governing_entities,
            by_id: HashMap::new(),
            children: HashMap::new(),
        }
    }

    fn index(&mut self, entity: &'a Entity) {
        if self.by_id.contains_key(&entity.id) {
            return;
        }
        self.by_id.insert(entity.id, entity);
        for parent in entity.parent_ids() {
            self.children.entry(parent).or_default().push(entity.id);
        }
    }

    /// True when the dataset holds neither plan nor governing entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plan_entities.is_empty() && self.governing_entities.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&'a Entity> {
        self.by_id.get(&id).copied()
    }

    #[must_use]
    pub fn plan_entities(&self) -> &[&'a Entity] {
        &self.plan_entities
    }

    #[must_use]
    pub fn governing_entities(&self) -> &[&'a Entity] {
        &self.governing_entities
    }

    /// Plan entities followed by governing entities.
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        self.plan_entities
            .iter()
            .chain(&self.governing_entities)
            .copied()
    }

    /// Entities naming `id` in `parentId` or `parents`, in dataset order.
    #[must_use]
    pub fn children_of(&self, id: EntityId) -> Vec<&'a Entity> {
        self.children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|child| self.get(*child)).collect())
            .unwrap_or_default()
    }
}

fn cmp_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts entities for presentation: by prototype order number, then version
/// order number, then id. Missing order numbers sort last.
pub fn order_entities(entities: &mut [&Entity]) {
    entities.sort_by(|a, b| {
        cmp_order(a.entity_prototype.order_number, b.entity_prototype.order_number)
            .then_with(|| cmp_order(a.order_number(), b.order_number()))
            .then_with(|| a.id.cmp(&b.id))
    });
}
