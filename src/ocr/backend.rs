//! Recognition backend abstraction.

use thiserror::Error;

/// Errors from recognition backends.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Unsupported media kind: {0}")]
    UnsupportedMediaKind(String),

    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("Language data missing: {0}")]
    LanguageDataMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text recognized from one image or PDF page.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText {
    pub text: String,
    /// Mean confidence, 0-100.
    pub confidence: f32,
}

/// A stateful recognition engine.
///
/// Implementations are driven by [`super::RecognitionEngine`], which calls
/// `initialize` once before the first recognition and `terminate` once when
/// the engine is shut down or dropped. Progress callbacks receive the
/// percentage complete for the current page.
pub trait RecognitionBackend: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check if this backend can run (binaries installed, data present).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Load language data and set recognition parameters.
    fn initialize(&mut self) -> Result<(), OcrError>;

    /// Recognize an encoded image (JPEG, PNG, ...).
    fn recognize_image(
        &mut self,
        image: &[u8],
        progress: &mut dyn FnMut(u8),
    ) -> Result<RecognizedText, OcrError>;

    /// Recognize one page (1-based) of a PDF document.
    fn recognize_pdf_page(
        &mut self,
        pdf: &[u8],
        page: u32,
        progress: &mut dyn FnMut(u8),
    ) -> Result<RecognizedText, OcrError>;

    /// Release engine resources.
    fn terminate(&mut self);
}
