//! Entity model for plan data fetched from the humanitarian planning API.
//!
//! Defines the shapes the resolver works on:
//! - [`Entity`]: a plan entity or governing entity with its implicit links
//! - [`EntityVersion`]: the type-specific version payload, with `support`
//! - [`EntityPrototype`]: role descriptor with `canSupport` capabilities
//! - [`PlanDataset`]: the two flat entity lists of one plan
//!
//! Ambiguous API shapes (`canSupport` as list or `{xor}`, ids as strings,
//! numbers as strings) are normalized during deserialization so downstream
//! code only ever sees one canonical form.

mod dataset;
mod entity;
mod error;
mod prototype;
mod version;

pub use dataset::PlanDataset;
pub use entity::{Entity, ParentRef, dot_path_to_pointer, value_at_path};
pub use error::{ModelError, ModelResult};
pub use prototype::{
    CanSupport, EntityKind, EntityPrototype, GOVERNING_ENTITY_TYPE, NamePair, PLAN_ENTITY_TYPE,
    PrototypeName, PrototypeRef, PrototypeValue,
};
pub use version::{EntityVersion, SupportItem, VersionValue};
