//! Occupation date parsing and the cut-off date rule.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::Validator;

/// Accepted layouts, tried in order. Numeric day-first layouts follow the
/// convention of Indian government forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

static YEAR_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})$").unwrap());

/// Parse a declared occupation date. A bare year means 1 January.
pub fn parse_occupation_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(caps) = YEAR_ONLY.captures(input) {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// Result of checking one occupation date against the cut-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateCheck {
    pub input: String,
    pub date: Option<NaiveDate>,
    pub valid: bool,
    pub message: String,
    /// The claim needs a human decision on this date.
    pub requires_manual_review: bool,
    /// The date parsed and falls after the cut-off.
    pub after_cutoff: bool,
}

impl Validator {
    /// Occupation must have begun on or before the cut-off date.
    ///
    /// Failures are advisory: both unparsable and post-cut-off dates are
    /// flagged for manual review rather than rejected.
    pub fn validate_occupation_date(&self, input: &str) -> DateCheck {
        let cutoff = self.rules().cutoff_date;

        if input.trim().is_empty() {
            return DateCheck {
                input: input.to_string(),
                date: None,
                valid: false,
                message: "Date not provided".to_string(),
                requires_manual_review: true,
                after_cutoff: false,
            };
        }

        let Some(date) = parse_occupation_date(input) else {
            return DateCheck {
                input: input.to_string(),
                date: None,
                valid: false,
                message: format!("Invalid date format: '{}'", input.trim()),
                requires_manual_review: true,
                after_cutoff: false,
            };
        };

        if date > cutoff {
            return DateCheck {
                input: input.to_string(),
                date: Some(date),
                valid: false,
                message: format!(
                    "Occupation must be before {} (declared {})",
                    cutoff.format("%-d %b %Y"),
                    date.format("%-d %b %Y")
                ),
                requires_manual_review: true,
                after_cutoff: true,
            };
        }

        DateCheck {
            input: input.to_string(),
            date: Some(date),
            valid: true,
            message: "Date valid for FRA claim".to_string(),
            requires_manual_review: false,
            after_cutoff: false,
        }
    }
}
