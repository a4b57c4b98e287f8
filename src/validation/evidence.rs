//! Evidence tokenizing, categorization and the Rule 13 sufficiency check.

use serde::Serialize;

use super::rules::ValidationRules;
use super::Validator;
use crate::models::{EvidenceCategory, EvidenceItem};

/// Keyword table for display categories, checked in order after identity
/// documents. First containing keyword wins.
const CATEGORY_KEYWORDS: &[(EvidenceCategory, &[&str])] = &[
    (EvidenceCategory::PublicDocuments, &["census", "survey", "gazetteer"]),
    (EvidenceCategory::PhysicalAttributes, &["house", "hut", "improvement"]),
    (EvidenceCategory::JudicialRecords, &["court", "judgment", "order"]),
    (EvidenceCategory::TraditionalStructures, &["well", "burial", "sacred"]),
    (EvidenceCategory::ElderStatements, &["elder", "statement", "witness"]),
    (EvidenceCategory::ResearchStudies, &["research", "study", "ethnograph"]),
    (
        EvidenceCategory::HistoricalRecords,
        &["princely", "historical", "jagir", "zamindari"],
    ),
    (
        EvidenceCategory::Genealogy,
        &["genealogy", "family tree", "vanshavali", "ancestry"],
    ),
];

/// Split a comma-delimited evidence field into trimmed, non-empty items.
pub fn split_evidence(text: &str) -> Vec<EvidenceItem> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(EvidenceItem::new)
        .collect()
}

/// Map free-text evidence to a statutory class, for display only.
pub fn categorize_evidence(text: &str) -> EvidenceCategory {
    if ValidationRules::identity_document(text).is_some() {
        return EvidenceCategory::GovtAuthorized;
    }

    let text = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(EvidenceCategory::PublicDocuments)
}

/// Result of the Rule 13 evidence check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceCheck {
    pub valid: bool,
    pub message: String,
    /// How many more items are needed, when too few were given.
    pub missing_count: Option<usize>,
    pub identity_doc_missing: bool,
    /// Identity document that satisfied the rule, if any.
    pub identity_document: Option<&'static str>,
}

impl Validator {
    /// At least `min_evidence` items, one of them an identity document.
    pub fn validate_two_evidence_rule<S: AsRef<str>>(&self, evidence: &[S]) -> EvidenceCheck {
        let required = self.rules().min_evidence;

        if evidence.len() < required {
            let missing = required - evidence.len();
            return EvidenceCheck {
                valid: false,
                message: format!(
                    "At least {} evidences required as per Rule 13 ({} provided, {} more needed)",
                    required,
                    evidence.len(),
                    missing
                ),
                missing_count: Some(missing),
                identity_doc_missing: false,
                identity_document: None,
            };
        }

        let identity_document = evidence
            .iter()
            .find_map(|item| ValidationRules::identity_document(item.as_ref()));

        match identity_document {
            Some(document) => EvidenceCheck {
                valid: true,
                message: "Evidence requirement satisfied".to_string(),
                missing_count: None,
                identity_doc_missing: false,
                identity_document: Some(document),
            },
            None => EvidenceCheck {
                valid: false,
                message: "At least one identity document required (Voter ID/Aadhaar/Ration Card/Passport/Domicile Certificate/House Tax Receipt)".to_string(),
                missing_count: None,
                identity_doc_missing: true,
                identity_document: None,
            },
        }
    }
}
