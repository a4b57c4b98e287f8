//! Composed validation report.

use serde::Serialize;
use tracing::debug;

use super::area::AreaCheck;
use super::dates::DateCheck;
use super::eligibility::EligibilityCheck;
use super::encroachment::{EncroachmentCheck, ReviewKind};
use super::evidence::EvidenceCheck;
use super::{ClaimData, Validator};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallResult {
    /// True exactly when `errors` is empty.
    pub valid: bool,
    /// Blocking problems, in check order.
    pub errors: Vec<String>,
    /// Advisory items for manual review.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSummary {
    pub valid_dates: usize,
    pub invalid_dates: usize,
    pub details: Vec<DateCheck>,
}

/// Required template fields still blank after extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessCheck {
    pub complete: bool,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub overall: OverallResult,
    pub eligibility: EligibilityCheck,
    /// Absent when no evidence list was supplied.
    pub evidence: Option<EvidenceCheck>,
    /// Absent when no occupation dates were declared.
    pub dates: Option<DateSummary>,
    /// Absent when no area was supplied.
    pub area: Option<AreaCheck>,
    pub encroachment: EncroachmentCheck,
    /// Absent when the claim was not built from a field map.
    pub completeness: Option<CompletenessCheck>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.overall.valid
    }
}

impl Validator {
    pub fn generate_validation_report(&self, claim: &ClaimData) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let eligibility = self.validate_claimant_eligibility(claim);
        errors.extend(eligibility.errors.iter().cloned());

        let evidence = claim.evidence.as_ref().map(|items| {
            let check = self.validate_two_evidence_rule(items);
            if !check.valid {
                errors.push(check.message.clone());
            }
            check
        });

        let dates = (!claim.occupation_dates.is_empty()).then(|| {
            let details: Vec<DateCheck> = claim
                .occupation_dates
                .iter()
                .map(|date| self.validate_occupation_date(date))
                .collect();
            warnings.extend(details.iter().filter(|d| !d.valid).map(|d| d.message.clone()));
            DateSummary {
                valid_dates: details.iter().filter(|d| d.valid).count(),
                invalid_dates: details.iter().filter(|d| !d.valid).count(),
                details,
            }
        });

        let area = claim
            .area
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .map(|a| {
                let check = self.validate_land_area(a);
                if !check.valid {
                    if check.exceeds_limit {
                        errors.push(check.message.clone());
                    } else {
                        warnings.push(check.message.clone());
                    }
                }
                check
            });

        let empty = Vec::new();
        let encroachment = self.check_post_cutoff_encroachment(
            claim.evidence.as_ref().unwrap_or(&empty),
            &claim.occupation_dates,
        );
        // Date hits are already reported by the date check above.
        warnings.extend(
            encroachment
                .items
                .iter()
                .filter(|flag| flag.kind == ReviewKind::Evidence)
                .map(|flag| format!("Manual review: {} ('{}')", flag.issue, flag.item)),
        );

        let completeness = claim.fields.as_ref().map(|fields| {
            let missing: Vec<String> = fields
                .missing_required()
                .iter()
                .map(|field| field.label.to_string())
                .collect();
            warnings.extend(missing.iter().map(|label| format!("{} is required but not found", label)));
            CompletenessCheck {
                complete: missing.is_empty(),
                missing,
            }
        });

        debug!(
            "Validation report: {} errors, {} warnings",
            errors.len(),
            warnings.len()
        );

        ValidationReport {
            overall: OverallResult {
                valid: errors.is_empty(),
                errors,
                warnings,
            },
            eligibility,
            evidence,
            dates,
            area,
            encroachment,
            completeness,
        }
    }
}
