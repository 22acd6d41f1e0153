use crate::{Entity, ModelResult};
use planscope_types::{EntityId, lenient};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The flat entity collections of one plan, as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDataset {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub plan_entities: Vec<Entity>,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub governing_entities: Vec<Entity>,
}

impl PlanDataset {
    #[must_use]
    pub fn new(plan_entities: Vec<Entity>, governing_entities: Vec<Entity>) -> Self {
        Self {
            plan_entities,
            governing_entities,
        }
    }

    /// Parses a dataset from a JSON document.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.report_invalid();
        Ok(dataset)
    }

    /// Converts an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> ModelResult<Self> {
        let dataset: Self = serde_json::from_value(value)?;
        dataset.report_invalid();
        Ok(dataset)
    }

    fn report_invalid(&self) {
        for entity in self.entities() {
            if let Err(e) = entity.validate() {
                warn!("Inconsistent entity in dataset: {}", e);
            }
        }
        debug!(
            plan_entities = self.plan_entities.len(),
            governing_entities = self.governing_entities.len(),
            "Loaded plan dataset"
        );
    }

    /// True when neither list holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plan_entities.is_empty() && self.governing_entities.is_empty()
    }

    /// Plan entities followed by governing entities.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.plan_entities.iter().chain(&self.governing_entities)
    }

    /// First entity with the given id, searching plan entities first.
    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        self.entities().find(|e| e.id == id)
    }
}
