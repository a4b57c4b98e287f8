//! Statutory constants.

use chrono::NaiveDate;

/// Ceiling on claimed forest land, Section 4(6).
pub const MAX_AREA_HECTARES: f64 = 4.0;

/// Minimum number of evidence items, Rule 13.
pub const MIN_EVIDENCE: usize = 2;

/// Identity documents accepted under Rule 13, with the spellings that
/// identify each one in free text (lowercase).
pub const IDENTITY_DOCUMENTS: &[(&str, &[&str])] = &[
    ("Voter Identity Card", &["voter identity card", "voter id", "epic card"]),
    ("Aadhaar Card", &["aadhaar", "aadhar"]),
    ("Ration Card", &["ration card"]),
    ("Passport", &["passport"]),
    ("Domicile Certificate", &["domicile certificate"]),
    ("House Tax Receipts", &["house tax receipt", "house-tax receipt"]),
];

/// Evidence phrases suggesting occupation began after the cut-off.
/// The bare years are matched as substrings.
pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    "recent construction",
    "new settlement",
    "2006",
    "2007",
    "2008",
    "2009",
    "2010",
];

/// Tunable statutory parameters. Defaults follow the Act.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRules {
    /// Occupation must have begun on or before this date.
    pub cutoff_date: NaiveDate,
    pub max_area_hectares: f64,
    pub min_evidence: usize,
}

impl ValidationRules {
    /// 13 December 2005.
    pub fn statutory_cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2005, 12, 13).unwrap_or(NaiveDate::MIN)
    }

    /// Name of the first identity document mentioned in `text`.
    pub fn identity_document(text: &str) -> Option<&'static str> {
        let text = text.to_lowercase();
        IDENTITY_DOCUMENTS
            .iter()
            .find(|(_, spellings)| spellings.iter().any(|s| text.contains(s)))
            .map(|(name, _)| *name)
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            cutoff_date: Self::statutory_cutoff(),
            max_area_hectares: MAX_AREA_HECTARES,
            min_evidence: MIN_EVIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statutory_defaults() {
        let rules = ValidationRules::default();
        assert_eq!(rules.cutoff_date.to_string(), "2005-12-13");
        assert_eq!(rules.max_area_hectares, 4.0);
        assert_eq!(rules.min_evidence, 2);
    }

    #[test]
    fn test_identity_document_lookup() {
        assert_eq!(ValidationRules::identity_document("AADHAAR CARD"), Some("Aadhaar Card"));
        assert_eq!(ValidationRules::identity_document("my voter id"), Some("Voter Identity Card"));
        assert_eq!(
            ValidationRules::identity_document("House Tax Receipts 1998"),
            Some("House Tax Receipts")
        );
        assert_eq!(ValidationRules::identity_document("elder statement"), None);
    }
}
