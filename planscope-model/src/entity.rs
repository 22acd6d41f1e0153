use crate::{EntityKind, EntityPrototype, EntityVersion, ModelError, ModelResult};
use planscope_types::{EntityId, PrototypeId, lenient};
use serde::{Deserialize, Serialize};

/// A plan entity or governing entity as delivered by the planning API.
///
/// Hierarchy is implicit: `parent_id`/`parents` point at governing entities
/// or plans, and the version's `support` items point at higher-level plan
/// entities. Fields the model does not interpret are kept in `extra` so that
/// property filters can still address them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub entity_prototype: EntityPrototype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(
        default,
        deserialize_with = "lenient::null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parents: Vec<ParentRef>,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub composed_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_version: Option<EntityVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_entity_version: Option<EntityVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governing_entity_version: Option<EntityVersion>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRef {
    pub parent_id: EntityId,
}

impl Entity {
    /// Builds an entity with no version and no parents.
    #[must_use]
    pub fn new(id: EntityId, entity_prototype: EntityPrototype) -> Self {
        Self {
            id,
            entity_prototype,
            parent_id: None,
            parents: Vec::new(),
            composed_reference: String::new(),
            plan_version: None,
            plan_entity_version: None,
            governing_entity_version: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Resolves the type-specific version object.
    ///
    /// Checks `planVersion`, `planEntityVersion` and `governingEntityVersion`
    /// in that order and returns the first one present.
    #[must_use]
    pub fn version(&self) -> Option<&EntityVersion> {
        self.plan_version
            .as_ref()
            .or(self.plan_entity_version.as_ref())
            .or(self.governing_entity_version.as_ref())
    }

    fn version_slots(&self) -> usize {
        [
            self.plan_version.is_some(),
            self.plan_entity_version.is_some(),
            self.governing_entity_version.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Checks that at most one version slot is populated.
    pub fn validate(&self) -> ModelResult<()> {
        match self.version_slots() {
            0 | 1 => Ok(()),
            count => Err(ModelError::AmbiguousVersion { id: self.id, count }),
        }
    }

    /// The entity family, from the prototype type code.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        self.entity_prototype.kind()
    }

    #[must_use]
    pub fn prototype_id(&self) -> PrototypeId {
        self.entity_prototype.id
    }

    #[must_use]
    pub fn ref_code(&self) -> &str {
        &self.entity_prototype.ref_code
    }

    /// `parentId` followed by every `parents[].parentId`, without duplicates.
    #[must_use]
    pub fn parent_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.parent_id.into_iter().collect();
        for parent in &self.parents {
            if !ids.contains(&parent.parent_id) {
                ids.push(parent.parent_id);
            }
        }
        ids
    }

    /// Whether the version declares at least one support item.
    #[must_use]
    pub fn has_support(&self) -> bool {
        self.version().is_some_and(|v| v.support().is_some())
    }

    /// Directly supported plan entity ids, without following chains.
    #[must_use]
    pub fn support_plan_ids(&self) -> Vec<EntityId> {
        self.version()
            .map(EntityVersion::support_plan_ids)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn custom_reference(&self) -> Option<&str> {
        self.version()
            .map(|v| v.custom_reference.as_str())
            .filter(|r| !r.is_empty())
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.version()?.value.description.as_deref()
    }

    #[must_use]
    pub fn order_number(&self) -> Option<f64> {
        self.version()?.value.order_number
    }

    /// English singular name of the prototype, e.g. "Strategic Objective".
    #[must_use]
    pub fn type_label(&self) -> Option<&str> {
        self.entity_prototype
            .value
            .name
            .as_ref()
            .map(|n| n.en.singular.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Label for menus and tables: "<type label> <custom reference>".
    ///
    /// Falls back to the composed reference when either part is missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.type_label(), self.custom_reference()) {
            (Some(label), Some(reference)) => format!("{label} {reference}"),
            _ => self.composed_reference.clone(),
        }
    }

    /// Looks up a property of the entity's JSON form by dot path, e.g.
    /// `entityPrototype.refCode` or `planEntityVersion.value.support.0`.
    #[must_use]
    pub fn property(&self, path: &str) -> Option<serde_json::Value> {
        let json = serde_json::to_value(self).ok()?;
        value_at_path(&json, path).cloned()
    }

    /// Extract a string property by dot path.
    #[must_use]
    pub fn property_str(&self, path: &str) -> Option<String> {
        self.property(path)
            .and_then(|v| v.as_str().map(str::to_string))
    }
}

/// Looks up a dot path in an entity's JSON form. Callers checking several
/// paths serialize once and reuse the value.
#[must_use]
pub fn value_at_path<'v>(json: &'v serde_json::Value, path: &str) -> Option<&'v serde_json::Value> {
    json.pointer(&dot_path_to_pointer(path))
}

/// Converts `a.b.0` into the JSON pointer `/a/b/0`.
#[must_use]
pub fn dot_path_to_pointer(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    path.split('.')
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect()
}
