//! Batch recognition and the digitization session built on it.

mod batch;
mod digitize;

pub use batch::{
    combine_text, process_pages, BatchEvent, BatchOutcome, NoProgress, ProgressSink,
    PAGE_SEPARATOR,
};
pub use digitize::{digitize, Digitization};
