//! Transitive `support` chains and the main-level child-id closure.
//!
//! An entity's version may declare `support` items naming the plan entities
//! its values feed into. Targets can themselves support further entities, so
//! the set an entity ultimately contributes to is the closure over those
//! links. Well-formed data only ever points upward; malformed loops are
//! handled according to [`CyclePolicy`].

use crate::{CyclePolicy, EntityGraph, ResolutionCache, ResolveError, ResolveResult, ResolverConfig};
use planscope_model::{Entity, PlanDataset};
use planscope_types::EntityId;
use std::collections::HashSet;
use tracing::{trace, warn};

/// Resolves support closures against an indexed dataset.
#[derive(Debug, Clone, Copy)]
pub struct SupportChainResolver<'g, 'a> {
    graph: &'g EntityGraph<'a>,
    config: &'g ResolverConfig,
}

impl<'g, 'a> SupportChainResolver<'g, 'a> {
    #[must_use]
    pub fn new(graph: &'g EntityGraph<'a>, config: &'g ResolverConfig) -> Self {
        Self { graph, config }
    }

    /// Plan entity ids that `entity` supports.
    ///
    /// Without `chained` only the entity's own support items are read. With
    /// `chained` every target is looked up in the graph and its own support
    /// ids are merged in, recursively. Targets missing from the graph end
    /// the chain silently.
    pub fn support_plan_ids(&self, entity: &Entity, chained: bool) -> ResolveResult<Vec<EntityId>> {
        let mut out = Vec::new();
        if !chained {
            push_unique(&mut out, entity.support_plan_ids());
            return Ok(out);
        }
        let mut path = Vec::new();
        let mut expanded = HashSet::from([entity.id]);
        self.collect(entity, &mut path, &mut expanded, &mut out)?;
        Ok(out)
    }

    /// Chained support ids, memoized per entity in `cache`.
    pub fn cached_support_plan_ids(
        &self,
        entity: &Entity,
        cache: &mut ResolutionCache,
    ) -> ResolveResult<Vec<EntityId>> {
        if let Some(ids) = cache.support_closure(entity.id) {
            return Ok(ids.to_vec());
        }
        let ids = self.support_plan_ids(entity, true)?;
        cache.store_support_closure(entity.id, ids.clone());
        Ok(ids)
    }

    fn collect(
        &self,
        entity: &Entity,
        path: &mut Vec<EntityId>,
        expanded: &mut HashSet<EntityId>,
        out: &mut Vec<EntityId>,
    ) -> ResolveResult<()> {
        let direct = entity.support_plan_ids();
        push_unique(out, direct.iter().copied());

        path.push(entity.id);
        for id in direct {
            if path.contains(&id) {
                match self.config.cycle_policy {
                    CyclePolicy::Truncate => {
                        warn!(entity = %entity.id, target = %id, "Support chain loops back, truncating");
                        continue;
                    }
                    CyclePolicy::Error => return Err(ResolveError::CyclicSupportGraph { entity: id }),
                }
            }
            // A target reached through two branches contributes the same ids twice.
            if !expanded.insert(id) {
                continue;
            }
            match self.graph.get(id) {
                Some(target) => self.collect(target, path, expanded, out)?,
                None => trace!(entity = %entity.id, target = %id, "Support target not in dataset"),
            }
        }
        path.pop();
        Ok(())
    }

    /// Ids of `root` and every main-level plan entity below it.
    ///
    /// Each plan entity whose prototype ref code is configured as main-level
    /// and which declares support is mapped to its first support target.
    /// Starting from `root`, entities whose mapped parent is already in the
    /// set are absorbed until nothing changes.
    #[must_use]
    pub fn plan_entities_child_ids(&self, root: EntityId) -> Vec<EntityId> {
        let parent_of: Vec<(EntityId, EntityId)> = self
            .graph
            .plan_entities()
            .iter()
            .filter(|e| self.config.is_root_ref_code(e.ref_code()))
            .filter_map(|e| Some((e.id, e.version()?.primary_support_target()?)))
            .collect();

        let mut ids = vec![root];
        let mut seen = HashSet::from([root]);
        loop {
            let mut grew = false;
            for (child, parent) in &parent_of {
                if seen.contains(parent) && seen.insert(*child) {
                    ids.push(*child);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }
        ids
    }

    /// Child-id closure, memoized per root in `cache`.
    pub fn cached_plan_entities_child_ids(
        &self,
        root: EntityId,
        cache: &mut ResolutionCache,
    ) -> Vec<EntityId> {
        if let Some(ids) = cache.child_closure(root) {
            return ids.to_vec();
        }
        let ids = self.plan_entities_child_ids(root);
        cache.store_child_closure(root, ids.clone());
        ids
    }
}

fn push_unique(out: &mut Vec<EntityId>, ids: impl IntoIterator<Item = EntityId>) {
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
}

/// Support ids of `entity` resolved against a loose entity collection, with
/// default configuration (loops are truncated).
#[must_use]
pub fn get_support_plan_ids(all_entities: &[Entity], entity: &Entity, chained: bool) -> Vec<EntityId> {
    let graph = EntityGraph::from_entities(all_entities);
    let config = ResolverConfig::default();
    SupportChainResolver::new(&graph, &config)
        .support_plan_ids(entity, chained)
        .unwrap_or_default()
}

/// Child-id closure of `root` over a dataset, with default configuration.
#[must_use]
pub fn get_plan_entities_child_ids(data: &PlanDataset, root: EntityId) -> Vec<EntityId> {
    let graph = EntityGraph::new(data);
    let config = ResolverConfig::default();
    SupportChainResolver::new(&graph, &config).plan_entities_child_ids(root)
}
