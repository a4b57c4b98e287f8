//! Statutory validation of extracted claims.
//!
//! Each rule is an independent check returning a structured result;
//! [`Validator::generate_validation_report`] composes them into a
//! [`ValidationReport`]. A report is blocking if and only if it carries errors.
//! Warnings flag items for manual review and never block.

mod area;
mod claim;
mod dates;
mod eligibility;
mod encroachment;
mod evidence;
mod report;
mod rules;

pub use area::AreaCheck;
pub use claim::{is_affirmative, ClaimData};
pub use dates::{parse_occupation_date, DateCheck};
pub use eligibility::EligibilityCheck;
pub use encroachment::{EncroachmentCheck, ReviewFlag, ReviewKind};
pub use evidence::{categorize_evidence, split_evidence, EvidenceCheck};
pub use report::{CompletenessCheck, DateSummary, OverallResult, ValidationReport};
pub use rules::{
    ValidationRules, IDENTITY_DOCUMENTS, MAX_AREA_HECTARES, MIN_EVIDENCE, SUSPICIOUS_PATTERNS,
};

/// Applies [`ValidationRules`] to claim data.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }
}
