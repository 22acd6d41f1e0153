//! Normalization of raw attachment records.

use crate::raw::{DataPayload, FilePayload, TextPayload};
use crate::{
    AttachmentError, AttachmentPrototype, AttachmentResult, AttachmentType, DataAttachment,
    FileAttachment, ProcessedAttachment, RawAttachment, TextAttachment, Unit, UnitGroup,
};
use planscope_types::{AttachmentId, PrototypeId};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Normalizes one attachment. Fails on an unknown `type` or a payload that
/// does not fit its type.
pub fn process_attachment(raw: &RawAttachment) -> AttachmentResult<ProcessedAttachment> {
    let attachment_type: AttachmentType = raw.attachment_type.parse()?;
    Ok(match attachment_type {
        AttachmentType::Caseload | AttachmentType::Indicator => {
            ProcessedAttachment::Data(process_data(raw, attachment_type)?)
        }
        AttachmentType::FileWebContent => ProcessedAttachment::File(process_file(raw)?),
        AttachmentType::TextWebContent => ProcessedAttachment::Text(process_text(raw)?),
    })
}

/// Normalizes an attachment still in JSON form.
///
/// The `type` discriminator is checked before the rest of the record is
/// decoded, so an unknown type is reported as such even when the record is
/// otherwise incomplete.
pub fn process_attachment_value(value: serde_json::Value) -> AttachmentResult<ProcessedAttachment> {
    let type_name = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    type_name.parse::<AttachmentType>()?;
    let raw: RawAttachment = serde_json::from_value(value)?;
    process_attachment(&raw)
}

fn payload<T>(raw: &RawAttachment) -> AttachmentResult<T>
where
    T: DeserializeOwned + Default,
{
    let value = raw.version_value();
    if value.is_null() {
        return Ok(T::default());
    }
    T::deserialize(value).map_err(|source| AttachmentError::MalformedPayload { id: raw.id, source })
}

fn process_data(raw: &RawAttachment, attachment_type: AttachmentType) -> AttachmentResult<DataAttachment> {
    let payload: DataPayload = payload(raw)?;
    let metrics = payload.metrics;

    let unit = metrics.unit.map(|unit| Unit {
        label: unit
            .label
            .as_ref()
            .map(|l| l.en_or_empty().to_string())
            .unwrap_or_default(),
        unit_type: unit.unit_type.unwrap_or_default(),
        group: if unit.is_gender {
            UnitGroup::People
        } else {
            UnitGroup::Amount
        },
    });

    let values = metrics
        .values
        .totals
        .iter()
        .chain(&metrics.measure_fields)
        .map(|item| item.value)
        .collect();

    let prototype = match &raw.attachment_prototype {
        Some(proto) => AttachmentPrototype {
            id: proto.id,
            name: field_name(proto.value.name.as_ref()),
            ref_code: proto.ref_code.clone(),
            prototype_type: proto.prototype_type.clone(),
            fields: proto
                .value
                .metrics
                .iter()
                .chain(&proto.value.measure_fields)
                .map(|field| field_name(field.name.as_ref()))
                .collect(),
        },
        None => {
            debug!(attachment = %raw.id, "Data attachment without prototype");
            AttachmentPrototype {
                id: PrototypeId::new(0),
                name: String::new(),
                ref_code: String::new(),
                prototype_type: String::new(),
                fields: Vec::new(),
            }
        }
    };

    Ok(DataAttachment {
        id: raw.id,
        attachment_type,
        composed_reference: raw.composed_reference.clone().unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        values,
        prototype,
        unit,
    })
}

fn field_name(name: Option<&planscope_types::LocalizedText>) -> String {
    name.map(|n| n.en_or_empty().to_string()).unwrap_or_default()
}

fn process_file(raw: &RawAttachment) -> AttachmentResult<FileAttachment> {
    let payload: FilePayload = payload(raw)?;
    let file = payload.file.unwrap_or_default();
    Ok(FileAttachment {
        id: raw.id,
        attachment_type: AttachmentType::FileWebContent,
        url: file.url.unwrap_or_default(),
        title: file.title.unwrap_or_default(),
        file_name: payload.name.unwrap_or_default(),
    })
}

fn process_text(raw: &RawAttachment) -> AttachmentResult<TextAttachment> {
    let payload: TextPayload = payload(raw)?;
    let content = payload
        .content
        .map(|c| html_escape::decode_html_entities(&c).into_owned())
        .unwrap_or_default();
    Ok(TextAttachment {
        id: raw.id,
        attachment_type: AttachmentType::TextWebContent,
        title: payload.name.unwrap_or_default(),
        content,
    })
}

/// An attachment the batch could not normalize.
#[derive(Debug)]
pub struct RejectedAttachment {
    pub id: AttachmentId,
    pub error: AttachmentError,
}

/// Outcome of normalizing a list of attachments.
#[derive(Debug, Default)]
pub struct AttachmentBatch {
    pub processed: BTreeMap<AttachmentId, ProcessedAttachment>,
    pub rejected: Vec<RejectedAttachment>,
}

impl AttachmentBatch {
    #[must_use]
    pub fn get(&self, id: AttachmentId) -> Option<&ProcessedAttachment> {
        self.processed.get(&id)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Normalizes a list of attachments keyed by id.
///
/// Each record is processed on its own: a record that fails is logged and
/// listed in `rejected` while the rest of the batch continues. A later
/// record with an already-seen id replaces the earlier one.
pub fn process_attachments<'a>(raws: impl IntoIterator<Item = &'a RawAttachment>) -> AttachmentBatch {
    let mut batch = AttachmentBatch::default();
    for raw in raws {
        match process_attachment(raw) {
            Ok(processed) => {
                batch.processed.insert(raw.id, processed);
            }
            Err(error) => {
                warn!(attachment = %raw.id, "Skipping attachment: {}", error);
                batch.rejected.push(RejectedAttachment { id: raw.id, error });
            }
        }
    }
    debug!(
        processed = batch.processed.len(),
        rejected = batch.rejected.len(),
        "Processed attachment batch"
    );
    batch
}
