//! Data model shared by the digitization pipeline.

mod evidence;
mod form;
mod page;

pub use evidence::{EvidenceCategory, EvidenceItem};
pub use form::{FieldDescriptor, FieldMap, FormType, UnknownField};
pub use page::{MediaKind, Page, RecognitionResult};
