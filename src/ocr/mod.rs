//! Text recognition for uploaded pages.
//!
//! [`RecognitionEngine`] owns one [`RecognitionBackend`] and gives it an
//! explicit lifecycle: lazy initialization on first use, sticky failure,
//! and a shutdown that is safe to call at any time. [`TesseractBackend`]
//! is the production backend.

mod backend;
mod engine;
pub mod pdf_utils;
mod tesseract;
pub mod tools;

pub use backend::{OcrError, RecognitionBackend, RecognizedText};
pub use engine::{EngineError, RecognitionEngine, ShutdownHandle};
pub use tesseract::{parse_tsv, TesseractBackend, TesseractConfig};
