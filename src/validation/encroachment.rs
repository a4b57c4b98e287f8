//! Post-cut-off encroachment heuristic.
//!
//! Separate from the hard date rule: this scans free-text evidence for
//! phrases and bare years (2006-2010) hinting at recent occupation. Bare
//! years are plain substring matches and can fire on unrelated numbers
//! such as survey numbers; hits only ever request manual review.

use serde::Serialize;

use super::rules::SUSPICIOUS_PATTERNS;
use super::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    Date,
    Evidence,
}

/// One item flagged for manual review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewFlag {
    pub kind: ReviewKind,
    /// The evidence entry or date that triggered the flag.
    pub item: String,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncroachmentCheck {
    pub flagged: bool,
    pub items: Vec<ReviewFlag>,
    pub requires_manual_review: bool,
}

impl Validator {
    pub fn check_post_cutoff_encroachment<E, D>(&self, evidence: &[E], dates: &[D]) -> EncroachmentCheck
    where
        E: AsRef<str>,
        D: AsRef<str>,
    {
        let mut items = Vec::new();

        for date in dates {
            let check = self.validate_occupation_date(date.as_ref());
            if check.after_cutoff {
                items.push(ReviewFlag {
                    kind: ReviewKind::Date,
                    item: date.as_ref().to_string(),
                    issue: check.message,
                });
            }
        }

        for entry in evidence {
            let text = entry.as_ref().to_lowercase();
            for pattern in SUSPICIOUS_PATTERNS {
                if text.contains(pattern) {
                    items.push(ReviewFlag {
                        kind: ReviewKind::Evidence,
                        item: entry.as_ref().to_string(),
                        issue: format!("Contains suspicious pattern: {}", pattern),
                    });
                }
            }
        }

        EncroachmentCheck {
            flagged: !items.is_empty(),
            requires_manual_review: !items.is_empty(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_claim() {
        let check = Validator::default()
            .check_post_cutoff_encroachment(&["Aadhaar Card", "Census 1971"], &["1990-05-01"]);
        assert!(!check.flagged);
        assert!(check.items.is_empty());
    }

    #[test]
    fn test_suspicious_phrases() {
        let check = Validator::default().check_post_cutoff_encroachment::<_, &str>(
            &["Recent construction of hut", "New Settlement record"],
            &[],
        );
        assert_eq!(check.items.len(), 2);
        assert!(check.items.iter().all(|f| f.kind == ReviewKind::Evidence));
        assert!(check.requires_manual_review);
    }

    #[test]
    fn test_bare_year_flags_each_match() {
        let check = Validator::default()
            .check_post_cutoff_encroachment::<_, &str>(&["Receipt 2007, renewed 2009"], &[]);
        assert_eq!(check.items.len(), 2);
        assert!(check.items[0].issue.ends_with("2007"));
    }

    #[test]
    fn test_survey_numbers_also_match() {
        // Known false positive of the substring heuristic.
        let check = Validator::default()
            .check_post_cutoff_encroachment::<_, &str>(&["Survey no. 120083"], &[]);
        assert!(check.flagged);
    }

    #[test]
    fn test_post_cutoff_dates_flagged() {
        let check = Validator::default().check_post_cutoff_encroachment::<&str, _>(
            &[],
            &["2008-03-01", "not a date", "2001-01-01"],
        );
        assert_eq!(check.items.len(), 1);
        assert_eq!(check.items[0].kind, ReviewKind::Date);
        assert_eq!(check.items[0].item, "2008-03-01");
    }
}
