use planscope_types::{PrototypeId, lenient};
use serde::{Deserialize, Serialize};

/// Prototype type code for plan entities.
pub const PLAN_ENTITY_TYPE: &str = "PE";
/// Prototype type code for governing entities.
pub const GOVERNING_ENTITY_TYPE: &str = "GVE";

/// Which of the two entity families a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A node of the plan structure, e.g. a strategic objective ("PE").
    Plan,
    /// A cluster or sector grouping ("GVE").
    Governing,
}

impl EntityKind {
    /// Maps a prototype type code to a kind.
    #[must_use]
    pub fn from_type_code(code: &str) -> Option<Self> {
        match code {
            PLAN_ENTITY_TYPE => Some(Self::Plan),
            GOVERNING_ENTITY_TYPE => Some(Self::Governing),
            _ => None,
        }
    }

    /// The prototype type code of this kind.
    #[must_use]
    pub const fn type_code(self) -> &'static str {
        match self {
            Self::Plan => PLAN_ENTITY_TYPE,
            Self::Governing => GOVERNING_ENTITY_TYPE,
        }
    }
}

/// Schema-like descriptor shared by every entity instance of one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPrototype {
    pub id: PrototypeId,
    /// "PE" or "GVE". Kept verbatim so property filters see the API value.
    #[serde(rename = "type", default, deserialize_with = "lenient::null_default")]
    pub type_code: String,
    /// Business code of the role, e.g. "SO" or "CL".
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub ref_code: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_number: Option<f64>,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub value: PrototypeValue,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EntityPrototype {
    /// The entity family declared by the prototype type code.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::from_type_code(&self.type_code)
    }

    /// True when the prototype declares a non-empty `canSupport` list.
    #[must_use]
    pub fn has_support_capabilities(&self) -> bool {
        self.value
            .can_support
            .as_ref()
            .is_some_and(|c| !c.refs.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrototypeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PrototypeName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_support: Option<CanSupport>,
    #[serde(
        default,
        deserialize_with = "lenient::null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub possible_children: Vec<PrototypeRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrototypeName {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub en: NamePair,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePair {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub singular: String,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub plural: String,
}

/// Reference to another prototype, by id and/or ref code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPrototypeRef")]
#[serde(rename_all = "camelCase")]
pub struct PrototypeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PrototypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_code: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PrototypeRef {
    /// A reference carrying only a prototype id.
    #[must_use]
    pub fn id(id: PrototypeId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Whether this reference points at the given prototype.
    ///
    /// Ids are compared when both sides have one. Otherwise ref codes are
    /// compared. A reference carrying only an id cannot be checked against
    /// a prototype known only by ref code and does not constrain it.
    #[must_use]
    pub fn matches(&self, id: Option<PrototypeId>, ref_code: Option<&str>) -> bool {
        match (self.id, id) {
            (Some(own), Some(other)) => own == other,
            (Some(_), None) => match (self.ref_code.as_deref(), ref_code) {
                (Some(own), Some(other)) => own == other,
                _ => true,
            },
            (None, _) => match (self.ref_code.as_deref(), ref_code) {
                (Some(own), Some(other)) => own == other,
                _ => false,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrototypeRef {
    Id(PrototypeId),
    Object {
        #[serde(default)]
        id: Option<PrototypeId>,
        #[serde(default, rename = "refCode")]
        ref_code: Option<String>,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
}

impl From<RawPrototypeRef> for PrototypeRef {
    fn from(raw: RawPrototypeRef) -> Self {
        match raw {
            RawPrototypeRef::Id(id) => Self::id(id),
            RawPrototypeRef::Object { id, ref_code, extra } => Self {
                id,
                ref_code,
                extra,
            },
        }
    }
}

/// The prototypes an entity of this prototype may support.
///
/// The API sends either a plain list or `{"xor": [...]}`; both are unwrapped
/// here into one list. `exclusive` records which shape was received so the
/// value serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCanSupport", into = "RawCanSupport")]
pub struct CanSupport {
    pub refs: Vec<PrototypeRef>,
    pub exclusive: bool,
}

impl CanSupport {
    /// Whether the given prototype is an acceptable support target.
    #[must_use]
    pub fn allows(&self, id: Option<PrototypeId>, ref_code: Option<&str>) -> bool {
        self.refs.iter().any(|r| r.matches(id, ref_code))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawCanSupport {
    List(Vec<PrototypeRef>),
    Xor {
        #[serde(default, deserialize_with = "lenient::null_default")]
        xor: Vec<PrototypeRef>,
    },
}

impl From<RawCanSupport> for CanSupport {
    fn from(raw: RawCanSupport) -> Self {
        match raw {
            RawCanSupport::List(refs) => Self {
                refs,
                exclusive: false,
            },
            RawCanSupport::Xor { xor } => Self {
                refs: xor,
                exclusive: true,
            },
        }
    }
}

impl From<CanSupport> for RawCanSupport {
    fn from(value: CanSupport) -> Self {
        if value.exclusive {
            Self::Xor { xor: value.refs }
        } else {
            Self::List(value.refs)
        }
    }
}
