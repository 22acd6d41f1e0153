use planscope_model::{Entity, EntityKind};
use planscope_types::{EntityId, PrototypeId};
use serde::{Deserialize, Serialize};

/// Type of the page object the user is currently looking at.
///
/// Only plan entity and governing entity contexts narrow the result; any
/// other page type (a plan overview, a section) leaves matching unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContextKind {
    PlanEntity,
    GoverningEntity,
    Other(String),
}

impl From<String> for ContextKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "plan_entity" => Self::PlanEntity,
            "governing_entity" => Self::GoverningEntity,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ContextKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ContextKind> for String {
    fn from(kind: ContextKind) -> Self {
        match kind {
            ContextKind::PlanEntity => "plan_entity".to_string(),
            ContextKind::GoverningEntity => "governing_entity".to_string(),
            ContextKind::Other(s) => s,
        }
    }
}

/// The user's current position in the plan hierarchy.
///
/// `original_id` is the API id of the entity the page represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntity {
    pub kind: ContextKind,
    pub original_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prototype_id: Option<PrototypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prototype_ref_code: Option<String>,
}

impl ContextEntity {
    #[must_use]
    pub fn new(kind: impl Into<ContextKind>, original_id: EntityId) -> Self {
        Self {
            kind: kind.into(),
            original_id,
            prototype_id: None,
            prototype_ref_code: None,
        }
    }

    #[must_use]
    pub fn with_prototype(mut self, id: PrototypeId) -> Self {
        self.prototype_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_prototype_ref_code(mut self, ref_code: impl Into<String>) -> Self {
        self.prototype_ref_code = Some(ref_code.into());
        self
    }

    /// Builds the context a page for `entity` would carry.
    #[must_use]
    pub fn for_entity(entity: &Entity) -> Self {
        let kind = match entity.kind() {
            Some(EntityKind::Plan) => ContextKind::PlanEntity,
            Some(EntityKind::Governing) => ContextKind::GoverningEntity,
            None => ContextKind::Other(entity.entity_prototype.type_code.clone()),
        };
        Self {
            kind,
            original_id: entity.id,
            prototype_id: Some(entity.prototype_id()),
            prototype_ref_code: Some(entity.ref_code().to_string()).filter(|c| !c.is_empty()),
        }
    }

    /// Whether this context narrows matching at all.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self.kind, ContextKind::PlanEntity | ContextKind::GoverningEntity)
    }

    /// Whether the prototype of the context is known by id or ref code.
    #[must_use]
    pub fn has_known_prototype(&self) -> bool {
        self.prototype_id.is_some() || self.prototype_ref_code.is_some()
    }
}
