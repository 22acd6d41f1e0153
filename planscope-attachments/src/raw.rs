//! Attachment records as delivered by the planning API.
//!
//! The outer envelope is common to all attachment kinds. The version
//! `value` is kept as raw JSON here because its shape depends on `type`;
//! the processor decodes it into one of the payload structs below once the
//! kind is known.

use planscope_types::{AttachmentId, LocalizedText, PrototypeId, lenient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttachment {
    pub id: AttachmentId,
    /// Kind discriminator, matched case-insensitively ("caseLoad", ...).
    #[serde(rename = "type", default)]
    pub attachment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_version: Option<AttachmentVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_prototype: Option<RawAttachmentPrototype>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawAttachment {
    /// The version payload, or `null` when the record carries none.
    #[must_use]
    pub fn version_value(&self) -> &serde_json::Value {
        static NULL: serde_json::Value = serde_json::Value::Null;
        self.attachment_version
            .as_ref()
            .map_or(&NULL, |version| &version.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentVersion {
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttachmentPrototype {
    pub id: PrototypeId,
    #[serde(default)]
    pub ref_code: String,
    #[serde(rename = "type", default)]
    pub prototype_type: String,
    #[serde(default)]
    pub value: RawPrototypeValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrototypeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub metrics: Vec<FieldDefinition>,
    #[serde(
        default,
        deserialize_with = "lenient::null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub measure_fields: Vec<FieldDefinition>,
}

/// One metric or measure column of a data attachment prototype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
}

// ── Version payloads per kind ────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DataPayload {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub metrics: Metrics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Metrics {
    #[serde(default)]
    pub unit: Option<RawUnit>,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub values: MetricValues,
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub measure_fields: Vec<MetricValue>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetricValues {
    #[serde(default, deserialize_with = "lenient::null_default")]
    pub totals: Vec<MetricValue>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetricValue {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub value: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawUnit {
    #[serde(default)]
    pub label: Option<LocalizedText>,
    #[serde(rename = "type", default)]
    pub unit_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub is_gender: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<FileReference>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileReference {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TextPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
