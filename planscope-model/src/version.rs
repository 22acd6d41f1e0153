use planscope_types::{EntityId, lenient};
use serde::{Deserialize, Serialize};

/// Type-specific version payload of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityVersion {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub custom_reference: String,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub value: VersionValue,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Vec<SupportItem>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Declares the plan entities an entity's values feed into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportItem {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub plan_entity_ids: Vec<EntityId>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SupportItem {
    #[must_use]
    pub fn new(plan_entity_ids: Vec<EntityId>) -> Self {
        Self {
            plan_entity_ids,
            extra: serde_json::Map::new(),
        }
    }
}

impl EntityVersion {
    /// Support items, treating an absent list and an empty one alike.
    #[must_use]
    pub fn support(&self) -> Option<&[SupportItem]> {
        self.value
            .support
            .as_deref()
            .filter(|items| !items.is_empty())
    }

    /// Every plan entity id named by this version's support items, in
    /// declaration order and without duplicates.
    #[must_use]
    pub fn support_plan_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = Vec::new();
        for item in self.support().unwrap_or_default() {
            for id in &item.plan_entity_ids {
                if !ids.contains(id) {
                    ids.push(*id);
                }
            }
        }
        ids
    }

    /// The single upward link of a main-level entity: the first id of its
    /// first support item.
    #[must_use]
    pub fn primary_support_target(&self) -> Option<EntityId> {
        self.support()?
            .first()
            .and_then(|item| item.plan_entity_ids.first().copied())
    }
}
