//! Core type definitions for planscope.
//!
//! This crate defines the small, domain-agnostic building blocks shared by
//! the model, resolver and attachment crates:
//! - Integer identifiers for entities, prototypes and attachments
//! - Localized text as delivered by the planning API
//! - Lenient numeric deserialization for loosely-typed payloads
//!
//! Anything that knows about plan entities or attachments belongs in the
//! crates built on top of this one, not here.

pub mod lenient;

mod ids;
mod text;

pub use ids::{AttachmentId, EntityId, PrototypeId};
pub use text::LocalizedText;
