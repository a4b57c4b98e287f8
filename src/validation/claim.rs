//! Validator inputs derived from extracted fields and auxiliary UI data.

use serde::{Deserialize, Serialize};

use super::area::parse_area;
use super::evidence::split_evidence;
use crate::models::{EvidenceItem, FieldMap, FormType};

/// Answers that mean a yes/no field was explicitly answered "no".
const NEGATIVE_ANSWERS: &[&str] = &[
    "no", "n", "false", "nil", "none", "na", "n/a", "-", "नहीं", "नही",
];

/// Whether a yes/no field counts as set: non-blank and not a negative answer.
///
/// OCR often captures a tribe name ("Gond") rather than "Yes"; that counts.
/// A printed "(Yes/No)" label before the answer is skipped.
pub fn is_affirmative(value: &str) -> bool {
    let answer = answer_token(value).to_lowercase();
    !answer.is_empty() && !NEGATIVE_ANSWERS.contains(&answer.as_str())
}

/// The claimant's answer: what follows any parenthesized labels and the
/// last `:` separator.
fn answer_token(value: &str) -> &str {
    let mut rest = value.trim();
    loop {
        rest = rest.trim_start_matches(['-', ':', '.', ' ']).trim();
        match rest.strip_prefix('(').and_then(|r| r.find(')').map(|end| &r[end + 1..])) {
            Some(after_label) => rest = after_label,
            None => break,
        }
    }
    match rest.rsplit_once(':') {
        Some((_, answer)) => answer.trim_start_matches(['-', '.', ' ']).trim(),
        None => rest,
    }
}

/// Everything the validator looks at for one claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimData {
    pub claimant_name: String,
    pub village: String,
    pub district: String,
    pub is_scheduled_tribe: bool,
    pub is_otfd: bool,
    /// `None` skips the evidence rule entirely.
    pub evidence: Option<Vec<EvidenceItem>>,
    pub occupation_dates: Vec<String>,
    /// Claimed area in hectares, as entered.
    pub area: Option<String>,
    /// Extracted fields, used for the completeness check.
    #[serde(skip)]
    pub fields: Option<FieldMap>,
}

impl ClaimData {
    /// Derive claim data from an extraction run.
    pub fn from_fields(fields: &FieldMap) -> Self {
        let form_type = fields.form_type();

        let claimant_key = match form_type {
            FormType::FormA => "claimantName",
            FormType::FormB => "claimantCommunity",
            FormType::FormC => "gramSabhaMembers",
        };

        let is_scheduled_tribe = is_affirmative(fields.value("isScheduledTribe"))
            || is_affirmative(fields.value("isFDSTCommunity"));
        let is_otfd = is_affirmative(fields.value("isOTFD"))
            || is_affirmative(fields.value("isOTFDCommunity"));

        let area = if form_type == FormType::FormA {
            total_extent(fields)
        } else {
            None
        };

        Self {
            claimant_name: fields.value(claimant_key).trim().to_string(),
            village: fields.value("village").trim().to_string(),
            district: fields.value("district").trim().to_string(),
            is_scheduled_tribe,
            is_otfd,
            evidence: fields
                .contains_key("evidence")
                .then(|| split_evidence(fields.value("evidence"))),
            occupation_dates: Vec::new(),
            area,
            fields: Some(fields.clone()),
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_occupation_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.occupation_dates = dates.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the evidence list with items parsed from comma-delimited text.
    pub fn with_evidence_text(mut self, text: &str) -> Self {
        self.evidence = Some(split_evidence(text));
        self
    }

    pub fn with_scheduled_tribe(mut self, value: bool) -> Self {
        self.is_scheduled_tribe = value;
        self
    }

    pub fn with_otfd(mut self, value: bool) -> Self {
        self.is_otfd = value;
        self
    }
}

/// Habitation plus cultivation extent, when at least one is present.
fn total_extent(fields: &FieldMap) -> Option<String> {
    let extents: Vec<f64> = ["extentForHabitation", "extentForCultivation"]
        .iter()
        .filter_map(|key| parse_area(fields.value(key)))
        .collect();

    if extents.is_empty() {
        None
    } else {
        Some(extents.iter().sum::<f64>().to_string())
    }
}
