//! Normalized attachment representations.

use crate::AttachmentError;
use planscope_types::{AttachmentId, PrototypeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of attachment kinds the processor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Caseload,
    Indicator,
    FileWebContent,
    TextWebContent,
}

impl AttachmentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caseload => "caseload",
            Self::Indicator => "indicator",
            Self::FileWebContent => "filewebcontent",
            Self::TextWebContent => "textwebcontent",
        }
    }

    /// Whether attachments of this kind carry metric values.
    #[must_use]
    pub const fn is_data(self) -> bool {
        matches!(self, Self::Caseload | Self::Indicator)
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentType {
    type Err = AttachmentError;

    /// Parses the API discriminator case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "caseload" => Ok(Self::Caseload),
            "indicator" => Ok(Self::Indicator),
            "filewebcontent" => Ok(Self::FileWebContent),
            "textwebcontent" => Ok(Self::TextWebContent),
            _ => Err(AttachmentError::InvalidAttachmentType(s.to_string())),
        }
    }
}

/// A normalized attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessedAttachment {
    Data(DataAttachment),
    File(FileAttachment),
    Text(TextAttachment),
}

impl ProcessedAttachment {
    #[must_use]
    pub fn id(&self) -> AttachmentId {
        match self {
            Self::Data(a) => a.id,
            Self::File(a) => a.id,
            Self::Text(a) => a.id,
        }
    }

    #[must_use]
    pub fn attachment_type(&self) -> AttachmentType {
        match self {
            Self::Data(a) => a.attachment_type,
            Self::File(a) => a.attachment_type,
            Self::Text(a) => a.attachment_type,
        }
    }

    #[must_use]
    pub fn as_data(&self) -> Option<&DataAttachment> {
        match self {
            Self::Data(a) => Some(a),
            Self::File(_) | Self::Text(_) => None,
        }
    }
}

/// A caseload or indicator with positionally indexed values.
///
/// `values[i]` belongs to `prototype.fields[i]`: metric totals first, then
/// measure fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAttachment {
    pub id: AttachmentId,
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
    pub composed_reference: String,
    pub description: String,
    pub values: Vec<Option<f64>>,
    pub prototype: AttachmentPrototype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl DataAttachment {
    /// Value at a position, `None` when absent or out of range.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Position of the field with the given English name.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.prototype.fields.iter().position(|f| f == name)
    }

    /// Value of the field with the given English name.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.value(self.field_index(name)?)
    }

    /// Unit type used for automatic formatting, "amount" by default.
    #[must_use]
    pub fn unit_type(&self) -> &str {
        self.unit
            .as_ref()
            .map(|u| u.unit_type.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or("amount")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPrototype {
    pub id: PrototypeId,
    pub name: String,
    pub ref_code: String,
    #[serde(rename = "type")]
    pub prototype_type: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub label: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub group: UnitGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    People,
    Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: AttachmentId,
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
    pub url: String,
    pub title: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAttachment {
    pub id: AttachmentId,
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
    pub title: String,
    pub content: String,
}
