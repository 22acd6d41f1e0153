//! Context-aware selection of plan and governing entities.
//!
//! Given a dataset and the page the user is on, [`PlanEntityMatcher`] picks
//! the entities relevant to that position in the implicit hierarchy:
//!
//! - no context, or a non-hierarchical one: every candidate
//! - governing entity context: candidates whose `parentId` is the context
//! - plan entity context: candidates that may support the context's
//!   prototype, that ultimately support the context, and that are not
//!   siblings at the context's own level; plus every main-level descendant
//!
//! The context entity itself is always part of a hierarchical result when it
//! is among the candidates. Property filters narrow the final list.

use crate::{
    ContextEntity, ContextKind, EntityGraph, PropertyFilters, ResolutionCache, ResolveResult,
    ResolverConfig, SupportChainResolver,
};
use planscope_model::{Entity, EntityKind, PLAN_ENTITY_TYPE, PlanDataset};
use planscope_types::EntityId;
use std::collections::HashSet;
use tracing::{debug, trace};

/// What to match: an optional context, family restriction and filters.
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    pub context: Option<ContextEntity>,
    pub entity_type: Option<EntityKind>,
    pub filters: PropertyFilters,
}

impl MatchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context(mut self, context: ContextEntity) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_entity_type(mut self, kind: EntityKind) -> Self {
        self.entity_type = Some(kind);
        self
    }

    /// Restricts by the host's entity type name: `"plan"` selects plan
    /// entities, any other name governing entities.
    #[must_use]
    pub fn with_entity_type_name(self, name: &str) -> Self {
        let kind = if name == "plan" {
            EntityKind::Plan
        } else {
            EntityKind::Governing
        };
        self.with_entity_type(kind)
    }

    #[must_use]
    pub fn with_filters(mut self, filters: PropertyFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Selects entities relevant to a context over one indexed dataset.
#[derive(Debug, Clone, Copy)]
pub struct PlanEntityMatcher<'g, 'a> {
    graph: &'g EntityGraph<'a>,
    support: SupportChainResolver<'g, 'a>,
}

impl<'g, 'a> PlanEntityMatcher<'g, 'a> {
    #[must_use]
    pub fn new(graph: &'g EntityGraph<'a>, config: &'g ResolverConfig) -> Self {
        Self {
            graph,
            support: SupportChainResolver::new(graph, config),
        }
    }

    /// Entities matching `query`, in candidate order.
    ///
    /// Returns `Ok(None)` when the dataset holds no entities at all. Errors
    /// only surface from the support resolver under `CyclePolicy::Error`.
    pub fn matching_entities(
        &self,
        query: &MatchQuery,
        cache: &mut ResolutionCache,
    ) -> ResolveResult<Option<Vec<&'a Entity>>> {
        if self.graph.is_empty() {
            debug!("No plan or governing entities to match");
            return Ok(None);
        }

        let candidates: Vec<&'a Entity> = match query.entity_type {
            None => self.graph.entities().collect(),
            Some(EntityKind::Plan) => self.graph.plan_entities().to_vec(),
            Some(EntityKind::Governing) => self.graph.governing_entities().to_vec(),
        };

        let context = query.context.as_ref().filter(|c| c.is_hierarchical());
        let mut matched = match context {
            None => candidates.clone(),
            Some(ctx) if ctx.kind == ContextKind::GoverningEntity => candidates
                .iter()
                .copied()
                .filter(|e| e.parent_id == Some(ctx.original_id))
                .collect(),
            Some(ctx) => self.match_plan_entity_context(ctx, &candidates, cache)?,
        };

        if let Some(ctx) = context {
            let own = candidates.iter().copied().find(|e| e.id == ctx.original_id);
            if let Some(own) = own.filter(|own| !matched.iter().any(|e| e.id == own.id)) {
                matched.push(own);
            }
        }

        if !query.filters.is_empty() {
            matched.retain(|e| query.filters.matches(e));
        }

        debug!(
            candidates = candidates.len(),
            matched = matched.len(),
            context = ?context.map(|c| c.original_id),
            "Matched plan entities"
        );
        Ok(Some(matched))
    }

    fn match_plan_entity_context(
        &self,
        ctx: &ContextEntity,
        candidates: &[&'a Entity],
        cache: &mut ResolutionCache,
    ) -> ResolveResult<Vec<&'a Entity>> {
        let mut matched = Vec::new();
        let mut selected: HashSet<EntityId> = HashSet::new();

        for &candidate in candidates {
            if !self.may_support_prototype(candidate, ctx) {
                trace!(entity = %candidate.id, "Skipped: prototype cannot support context");
                continue;
            }
            if candidate.has_support() {
                let closure = self.support.cached_support_plan_ids(candidate, cache)?;
                if !closure.contains(&ctx.original_id) {
                    trace!(entity = %candidate.id, "Skipped: does not support context");
                    continue;
                }
            }
            if is_sibling(candidate, ctx) {
                trace!(entity = %candidate.id, "Skipped: sibling at context level");
                continue;
            }
            if selected.insert(candidate.id) {
                matched.push(candidate);
            }
        }

        let descendants: HashSet<EntityId> = self
            .support
            .cached_plan_entities_child_ids(ctx.original_id, cache)
            .into_iter()
            .collect();
        for &candidate in candidates {
            if descendants.contains(&candidate.id) && selected.insert(candidate.id) {
                matched.push(candidate);
            }
        }
        Ok(matched)
    }

    /// Capability check against the candidate prototype's `canSupport`.
    /// Candidates without declared capabilities, or contexts of unknown
    /// prototype, always pass.
    fn may_support_prototype(&self, candidate: &Entity, ctx: &ContextEntity) -> bool {
        if !ctx.has_known_prototype() {
            return true;
        }
        match &candidate.entity_prototype.value.can_support {
            Some(can_support) if !can_support.refs.is_empty() => {
                can_support.allows(ctx.prototype_id, ctx.prototype_ref_code.as_deref())
            }
            _ => true,
        }
    }
}

/// Another plan entity of exactly the context's prototype.
fn is_sibling(candidate: &Entity, ctx: &ContextEntity) -> bool {
    if candidate.id == ctx.original_id || candidate.entity_prototype.type_code != PLAN_ENTITY_TYPE {
        return false;
    }
    match (ctx.prototype_id, ctx.prototype_ref_code.as_deref()) {
        (Some(id), _) => candidate.prototype_id() == id,
        (None, Some(ref_code)) => candidate.ref_code() == ref_code,
        (None, None) => false,
    }
}

/// One-shot matching over a dataset with default configuration.
///
/// `entity_type` follows the host naming: `"plan"` or anything else for
/// governing entities. Returns `None` when the dataset is empty.
#[must_use]
pub fn get_matching_plan_entities<'a>(
    data: &'a PlanDataset,
    context: Option<&ContextEntity>,
    entity_type: Option<&str>,
    filters: Option<&PropertyFilters>,
) -> Option<Vec<&'a Entity>> {
    let graph = EntityGraph::new(data);
    let config = ResolverConfig::default();
    let mut query = MatchQuery::new();
    if let Some(context) = context {
        query = query.with_context(context.clone());
    }
    if let Some(name) = entity_type {
        query = query.with_entity_type_name(name);
    }
    if let Some(filters) = filters {
        query = query.with_filters(filters.clone());
    }
    let mut cache = ResolutionCache::new();
    // The default config truncates support loops, so resolution cannot fail.
    PlanEntityMatcher::new(&graph, &config)
        .matching_entities(&query, &mut cache)
        .ok()
        .flatten()
}
