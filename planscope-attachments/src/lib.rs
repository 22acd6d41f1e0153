//! Attachment normalization and data point evaluation.
//!
//! Raw attachment records ([`RawAttachment`]) arrive with a loose `type`
//! discriminator and a payload whose shape depends on it. The processor
//! turns them into [`ProcessedAttachment`] values: data attachments
//! (caseloads and indicators) with positionally indexed values, file links
//! and HTML-decoded text blocks.
//!
//! A [`DataPointConfig`] then selects one value, or combines two, and
//! describes how to present the result as a [`FormattedValue`].

mod data_point;
mod error;
mod format;
mod processed;
mod processor;
mod raw;

pub use data_point::{
    Calculation, DataPointConfig, DataPointRef, DataPointSpec, Formatting, Processing, Widget,
    format_value, get_value,
};
pub use error::{AttachmentError, AttachmentResult, DataPointError, DataPointResult};
pub use format::FormattedValue;
pub use processed::{
    AttachmentPrototype, AttachmentType, DataAttachment, FileAttachment, ProcessedAttachment,
    TextAttachment, Unit, UnitGroup,
};
pub use processor::{
    AttachmentBatch, RejectedAttachment, process_attachment, process_attachment_value,
    process_attachments,
};
pub use raw::{
    AttachmentVersion, FieldDefinition, RawAttachment, RawAttachmentPrototype, RawPrototypeValue,
};
