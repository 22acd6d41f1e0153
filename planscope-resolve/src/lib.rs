//! Resolution of flat plan datasets into context-aware entity sets.
//!
//! The planning API hands out plan entities and governing entities as two
//! flat lists. Their hierarchy only exists as id cross-references:
//! parent pointers, prototype `canSupport` declarations and `support`
//! chains. This crate turns those references into an explicit graph and
//! answers "which entities matter on this page?":
//!
//! - [`EntityGraph`]: id index, child lookup and presentation ordering
//! - [`SupportChainResolver`]: transitive support closures and the
//!   main-level child-id closure
//! - [`PlanEntityMatcher`]: context-aware matching with property filters
//! - [`ResolutionCache`]: caller-owned memo scoped to one dataset snapshot
//! - [`ResolverConfig`]: main-level ref codes and support-loop policy
//!
//! Everything here is synchronous and side-effect free apart from logging;
//! the graph borrows the dataset and can be shared across threads.

mod cache;
mod config;
mod context;
mod error;
mod filter;
mod graph;
mod matcher;
mod support;

pub use cache::ResolutionCache;
pub use config::{CyclePolicy, ResolverConfig};
pub use context::{ContextEntity, ContextKind};
pub use error::{ResolveError, ResolveResult};
pub use filter::{FilterValue, PropertyFilter, PropertyFilters};
pub use graph::{EntityGraph, order_entities};
pub use matcher::{MatchQuery, PlanEntityMatcher, get_matching_plan_entities};
pub use support::{SupportChainResolver, get_plan_entities_child_ids, get_support_plan_ids};
