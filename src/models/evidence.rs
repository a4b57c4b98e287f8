//! Evidence entries and the statutory evidence classes of Rule 13.

use serde::{Deserialize, Serialize};

use crate::validation::categorize_evidence;

/// Evidence classes recognized by Rule 13 of the FRA rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    PublicDocuments,
    GovtAuthorized,
    PhysicalAttributes,
    JudicialRecords,
    ResearchStudies,
    HistoricalRecords,
    TraditionalStructures,
    Genealogy,
    ElderStatements,
}

impl EvidenceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PublicDocuments => "Public Documents & Government Records",
            Self::GovtAuthorized => "Government Authorized Documents",
            Self::PhysicalAttributes => "Physical Attributes",
            Self::JudicialRecords => "Quasi-judicial and Judicial Records",
            Self::ResearchStudies => "Research Studies & Documentation",
            Self::HistoricalRecords => "Historical Records from Princely States",
            Self::TraditionalStructures => "Traditional Structures",
            Self::Genealogy => "Genealogy Records",
            Self::ElderStatements => "Statements of Elders",
        }
    }
}

impl std::fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One free-text evidence entry with its display category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub text: String,
    pub category: EvidenceCategory,
}

impl EvidenceItem {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let category = categorize_evidence(&text);
        Self { text, category }
    }
}

impl AsRef<str> for EvidenceItem {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
