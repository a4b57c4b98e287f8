//! One digitization run: recognized pages plus the classified, extracted form.

use serde::Serialize;
use tracing::info;

use super::batch::{process_pages, BatchOutcome, ProgressSink};
use crate::forms::{classify, detect_dates, extract};
use crate::models::{FieldMap, FormType, Page, RecognitionResult, UnknownField};
use crate::ocr::{EngineError, RecognitionBackend, RecognitionEngine};
use crate::validation::{ClaimData, ValidationReport, Validator};

/// Recognized text and the form extracted from it.
///
/// The form type changes only through [`Digitization::reclassify`], which
/// re-extracts from the stored text without recognizing anything again.
#[derive(Debug, Clone, Serialize)]
pub struct Digitization {
    results: Vec<RecognitionResult>,
    combined_text: String,
    form_type: FormType,
    fields: FieldMap,
    /// Dates found in the text, offered as occupation-date candidates.
    dates: Vec<String>,
    cancelled: bool,
}

impl Digitization {
    pub fn from_outcome(outcome: BatchOutcome) -> Self {
        let combined_text = outcome.combined_text();
        let mut digitization = Self::from_text(combined_text);
        digitization.results = outcome.results;
        digitization.cancelled = outcome.cancelled;
        digitization
    }

    /// Classify and extract already-recognized text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let combined_text = text.into();
        let form_type = classify(&combined_text);
        let fields = extract(&combined_text, form_type);
        let dates = detect_dates(&combined_text);
        info!(
            "Classified as {} ({} candidate dates)",
            form_type,
            dates.len()
        );
        Self {
            results: Vec::new(),
            combined_text,
            form_type,
            fields,
            dates,
            cancelled: false,
        }
    }

    pub fn results(&self) -> &[RecognitionResult] {
        &self.results
    }

    pub fn combined_text(&self) -> &str {
        &self.combined_text
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Pages whose recognition failed, for re-upload.
    pub fn failed_pages(&self) -> impl Iterator<Item = &RecognitionResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Switch to `form_type` and re-extract. Manual field edits are discarded.
    pub fn reclassify(&mut self, form_type: FormType) {
        info!("Reclassifying {} as {}", self.form_type, form_type);
        self.form_type = form_type;
        self.fields = extract(&self.combined_text, form_type);
    }

    /// Correct one extracted value.
    pub fn update_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        self.fields.set(key, value)
    }

    /// Validator inputs derived from the current fields.
    pub fn claim_data(&self) -> ClaimData {
        ClaimData::from_fields(&self.fields)
    }

    /// Validate the current fields with nothing overridden.
    pub fn validate(&self, validator: &Validator) -> ValidationReport {
        validator.generate_validation_report(&self.claim_data())
    }
}

/// Recognize `pages`, then classify and extract the combined text.
pub fn digitize<B: RecognitionBackend>(
    engine: &mut RecognitionEngine<B>,
    pages: &[Page],
    sink: &dyn ProgressSink,
) -> Result<Digitization, EngineError> {
    process_pages(engine, pages, sink).map(Digitization::from_outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM_B_TEXT: &str = "FORM B\nCLAIM FORM FOR COMMUNITY RIGHTS\nVillage: Mendha\nDistrict: Gadchiroli";

    #[test]
    fn test_from_text_classifies_and_extracts() {
        let digitization = Digitization::from_text(FORM_B_TEXT);
        assert_eq!(digitization.form_type(), FormType::FormB);
        assert_eq!(digitization.fields().value("village"), "Mendha");
        assert!(digitization.results().is_empty());
        assert!(!digitization.cancelled());
    }

    #[test]
    fn test_reclassify_re_extracts_same_text() {
        let mut digitization = Digitization::from_text(FORM_B_TEXT);
        digitization.reclassify(FormType::FormC);

        assert_eq!(digitization.form_type(), FormType::FormC);
        assert_eq!(digitization.fields().form_type(), FormType::FormC);
        assert_eq!(digitization.fields(), &extract(FORM_B_TEXT, FormType::FormC));
        assert_eq!(digitization.combined_text(), FORM_B_TEXT);
    }

    #[test]
    fn test_update_field() {
        let mut digitization = Digitization::from_text("");
        digitization.update_field("village", "Jagdalpur").unwrap();
        assert_eq!(digitization.fields().value("village"), "Jagdalpur");
        assert!(digitization.update_field("noSuchField", "x").is_err());
    }

    #[test]
    fn test_detected_dates() {
        let digitization = Digitization::from_text("Date: 12/03/1998\nSigned 01-01-2001");
        assert_eq!(digitization.dates(), ["12/03/1998", "01-01-2001"]);
    }

    #[test]
    fn test_from_outcome_keeps_results() {
        let outcome = BatchOutcome {
            results: vec![RecognitionResult {
                page_number: 1,
                file_name: Some("claim.png".to_string()),
                text: "Village: Jagdalpur".to_string(),
                confidence: 91.0,
                success: true,
                error: None,
                processing_time_ms: 12,
            }],
            cancelled: false,
        };
        let digitization = Digitization::from_outcome(outcome);
        assert_eq!(digitization.results().len(), 1);
        assert_eq!(digitization.failed_pages().count(), 0);
        assert_eq!(digitization.fields().value("village"), "Jagdalpur");
    }
}
