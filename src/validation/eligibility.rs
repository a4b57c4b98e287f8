//! Claimant eligibility: FDST or OTFD status plus identifying details.

use serde::Serialize;

use super::{ClaimData, Validator};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityCheck {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Validator {
    pub fn validate_claimant_eligibility(&self, claim: &ClaimData) -> EligibilityCheck {
        let mut errors = Vec::new();

        if !claim.is_scheduled_tribe && !claim.is_otfd {
            errors.push(
                "Claimant must be either Forest Dwelling Scheduled Tribe or Other Traditional Forest Dweller"
                    .to_string(),
            );
        }

        let required = [
            ("Claimant name", &claim.claimant_name),
            ("Village", &claim.village),
            ("District", &claim.district),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                errors.push(format!("{} is required", label));
            }
        }

        EligibilityCheck {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_claim() -> ClaimData {
        ClaimData {
            claimant_name: "Ram Singh".to_string(),
            village: "Jagdalpur".to_string(),
            district: "Bastar".to_string(),
            is_scheduled_tribe: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_eligible_claimant() {
        let check = Validator::default().validate_claimant_eligibility(&complete_claim());
        assert!(check.valid);
        assert!(check.errors.is_empty());
    }

    #[test]
    fn test_otfd_alone_is_enough() {
        let claim = ClaimData {
            is_scheduled_tribe: false,
            is_otfd: true,
            ..complete_claim()
        };
        assert!(Validator::default().validate_claimant_eligibility(&claim).valid);
    }

    #[test]
    fn test_no_category() {
        let claim = ClaimData {
            is_scheduled_tribe: false,
            ..complete_claim()
        };
        let check = Validator::default().validate_claimant_eligibility(&claim);
        assert!(!check.valid);
        assert_eq!(check.errors.len(), 1);
        assert!(check.errors[0].contains("Scheduled Tribe"));
    }

    #[test]
    fn test_blank_details_listed() {
        let claim = ClaimData {
            village: "  ".to_string(),
            district: String::new(),
            ..complete_claim()
        };
        let check = Validator::default().validate_claimant_eligibility(&claim);
        assert_eq!(
            check.errors,
            vec!["Village is required".to_string(), "District is required".to_string()]
        );
    }
}
