use planscope_types::EntityId;
use std::collections::HashMap;

/// Memoized closures for one dataset snapshot.
///
/// Owned by the caller and passed to resolver calls so repeated lookups
/// against the same snapshot (one per context entity on a page, say) reuse
/// earlier traversals. Entries are keyed by id only, so a cache must not be
/// shared across different datasets; call [`ResolutionCache::clear`] or
/// create a new one when the snapshot changes.
#[derive(Debug, Default, Clone)]
pub struct ResolutionCache {
    support_closures: HashMap<EntityId, Vec<EntityId>>,
    child_closures: HashMap<EntityId, Vec<EntityId>>,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.support_closures.clear();
        self.child_closures.clear();
    }

    /// Number of memoized chained support closures.
    #[must_use]
    pub fn support_closure_count(&self) -> usize {
        self.support_closures.len()
    }

    /// Number of memoized child-id closures.
    #[must_use]
    pub fn child_closure_count(&self) -> usize {
        self.child_closures.len()
    }

    pub(crate) fn support_closure(&self, id: EntityId) -> Option<&[EntityId]> {
        self.support_closures.get(&id).map(Vec::as_slice)
    }

    pub(crate) fn store_support_closure(&mut self, id: EntityId, ids: Vec<EntityId>) {
        self.support_closures.insert(id, ids);
    }

    pub(crate) fn child_closure(&self, root: EntityId) -> Option<&[EntityId]> {
        self.child_closures.get(&root).map(Vec::as_slice)
    }

    pub(crate) fn store_child_closure(&mut self, root: EntityId, ids: Vec<EntityId>) {
        self.child_closures.insert(root, ids);
    }
}
