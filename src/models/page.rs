//! Uploaded pages and their recognition results.

use std::sync::Arc;

use serde::Serialize;

/// Kind of media a page can be recognized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Pdf,
}

impl MediaKind {
    /// Classify a declared MIME type. Parameters such as `; charset=` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime_lower = mime.to_lowercase();
        let essence = mime_lower.split(';').next().unwrap_or("").trim();

        if essence == "application/pdf" {
            Some(MediaKind::Pdf)
        } else if essence.starts_with("image/") {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One uploaded image, or one page of an uploaded PDF.
///
/// Pages of the same PDF share their content buffer; `pdf_page` selects
/// which page of it this is.
#[derive(Debug, Clone)]
pub struct Page {
    /// Position in the physical document, starting at 1.
    pub ordinal: u32,
    /// Raw file content.
    pub content: Arc<[u8]>,
    /// Declared MIME type.
    pub media_type: String,
    /// Original file name, for audit display.
    pub file_name: Option<String>,
    /// Page number inside the source PDF (1-based). Defaults to 1.
    pub pdf_page: Option<u32>,
}

impl Page {
    pub fn new(ordinal: u32, content: impl Into<Arc<[u8]>>, media_type: impl Into<String>) -> Self {
        Self {
            ordinal,
            content: content.into(),
            media_type: media_type.into(),
            file_name: None,
            pdf_page: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_pdf_page(mut self, page: u32) -> Self {
        self.pdf_page = Some(page);
        self
    }

    /// Media kind derived from the declared type, if supported.
    pub fn media_kind(&self) -> Option<MediaKind> {
        MediaKind::from_mime(&self.media_type)
    }

    /// Name shown to users: the file name, or `page_<n>`.
    pub fn display_name(&self) -> String {
        match (&self.file_name, self.pdf_page) {
            (Some(name), Some(page)) => format!("{} (page {})", name, page),
            (Some(name), None) => name.clone(),
            (None, _) => format!("page_{}", self.ordinal),
        }
    }
}

/// Outcome of recognizing a single page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionResult {
    /// Ordinal of the page this result belongs to.
    pub page_number: u32,
    pub file_name: Option<String>,
    /// Recognized text, trimmed.
    pub text: String,
    /// Mean confidence, 0-100. Always 0 for failed pages.
    pub confidence: f32,
    pub success: bool,
    pub error: Option<String>,
    pub processing_time_ms: u64,
}

impl RecognitionResult {
    pub fn succeeded(page: &Page, text: &str, confidence: f32, processing_time_ms: u64) -> Self {
        Self {
            page_number: page.ordinal,
            file_name: page.file_name.clone(),
            text: text.trim().to_string(),
            confidence: if confidence.is_finite() {
                confidence.clamp(0.0, 100.0)
            } else {
                0.0
            },
            success: true,
            error: None,
            processing_time_ms,
        }
    }

    pub fn failed(page: &Page, error: impl Into<String>) -> Self {
        Self {
            page_number: page.ordinal,
            file_name: page.file_name.clone(),
            text: String::new(),
            confidence: 0.0,
            success: false,
            error: Some(error.into()),
            processing_time_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("IMAGE/JPEG"), Some(MediaKind::Image));
        assert_eq!(
            MediaKind::from_mime("application/pdf; charset=binary"),
            Some(MediaKind::Pdf)
        );
        assert_eq!(MediaKind::from_mime("text/plain"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }

    #[test]
    fn test_result_confidence_clamped() {
        let page = Page::new(1, b"x".to_vec(), "image/png");
        assert_eq!(RecognitionResult::succeeded(&page, "a", 140.0, 0).confidence, 100.0);
        assert_eq!(RecognitionResult::succeeded(&page, "a", -3.0, 0).confidence, 0.0);
        assert_eq!(RecognitionResult::succeeded(&page, "a", f32::NAN, 0).confidence, 0.0);
    }

    #[test]
    fn test_failed_result() {
        let page = Page::new(4, b"x".to_vec(), "image/png").with_file_name("scan.png");
        let result = RecognitionResult::failed(&page, "boom");
        assert_eq!(result.page_number, 4);
        assert!(!result.success);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.file_name.as_deref(), Some("scan.png"));
    }

    #[test]
    fn test_display_name() {
        let page = Page::new(2, b"x".to_vec(), "application/pdf");
        assert_eq!(page.display_name(), "page_2");
        let page = page.with_file_name("claim.pdf").with_pdf_page(3);
        assert_eq!(page.display_name(), "claim.pdf (page 3)");
    }
}
