//! Field extraction from recognized text.

use tracing::debug;

use super::patterns::{form_patterns, FieldPattern, COMMON_PATTERNS, DATE_PATTERN};
use crate::models::{FieldMap, FormType};

/// Non-empty trimmed lines of `text`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Extract the fields of `form_type` from combined page text.
///
/// Never fails: fields without a match stay as empty strings. The first
/// line that yields a value for a field wins; later lines never overwrite it.
pub fn extract(text: &str, form_type: FormType) -> FieldMap {
    let mut fields = FieldMap::seeded(form_type);
    let lines = split_lines(text);

    apply_patterns(&lines, &COMMON_PATTERNS, &mut fields);
    apply_patterns(&lines, form_patterns(form_type), &mut fields);

    debug!(
        "Extracted {}/{} fields for {}",
        fields.keys().filter(|k| !fields.is_blank(k)).count(),
        fields.len(),
        form_type
    );
    fields
}

fn apply_patterns(lines: &[&str], patterns: &[FieldPattern], fields: &mut FieldMap) {
    for line in lines {
        for pattern in patterns {
            // Keys outside the template (e.g. spouseName on Form C) are skipped.
            if !fields.accepts(pattern.key) {
                continue;
            }
            if let Some(value) = pattern.capture(line) {
                fields.fill(pattern.key, value);
            }
        }
    }
}

/// Every `dd/mm/yyyy` or `dd-mm-yyyy` date in `text`, in order of appearance.
pub fn detect_dates(text: &str) -> Vec<String> {
    DATE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_seeded_template() {
        for form_type in FormType::ALL {
            let fields = extract("", form_type);
            let keys: Vec<_> = fields.keys().collect();
            let mut expected: Vec<_> = form_type.template().iter().map(|f| f.key).collect();
            expected.sort();
            assert_eq!(keys, expected);
            assert!(fields.keys().all(|k| fields.value(k).is_empty()));
        }
    }

    #[test]
    fn test_basic_form_a_extraction() {
        let text = "Name of Claimant: Ram Singh\nVillage: Jagdalpur\nDistrict: Bastar";
        let fields = extract(text, FormType::FormA);

        assert_eq!(fields.value("claimantName"), "Ram Singh");
        assert_eq!(fields.value("village"), "Jagdalpur");
        assert_eq!(fields.value("district"), "Bastar");
        for key in fields.keys() {
            if !["claimantName", "village", "district"].contains(&key) {
                assert_eq!(fields.value(key), "", "unexpected value for {}", key);
            }
        }
    }

    #[test]
    fn test_first_line_wins() {
        let text = "Village: Jagdalpur\nsome noise\nVillage: Kondagaon";
        let fields = extract(text, FormType::FormA);
        assert_eq!(fields.value("village"), "Jagdalpur");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Name of claimant: Sita\nKhasra: 12/4\nGram Panchayat: Mendha\nDistrict: Gadchiroli";
        for form_type in FormType::ALL {
            assert_eq!(extract(text, form_type), extract(text, form_type));
        }
    }

    #[test]
    fn test_keys_outside_template_are_ignored() {
        let text = "Name of Claimant: Ram Singh\nKhasra: 101, 102";
        let fields = extract(text, FormType::FormC);
        assert!(!fields.contains_key("claimantName"));
        assert_eq!(fields.value("khasraNumbers"), "101, 102");
        assert_eq!(fields.len(), FormType::FormC.template().len());
    }

    #[test]
    fn test_form_a_specific_fields() {
        let text = "\
            Extent of forest land for habitation: 0.5\n\
            Extent of forest land for self-cultivation: 2.25\n\
            Evidence in support: Aadhaar Card, Ration Card, elder statement\n\
            Disputed lands: None";
        let fields = extract(text, FormType::FormA);
        assert_eq!(fields.value("extentForHabitation"), "0.5");
        assert_eq!(fields.value("extentForCultivation"), "2.25");
        assert_eq!(
            fields.value("evidence"),
            "Aadhaar Card, Ration Card, elder statement"
        );
        assert_eq!(fields.value("disputedLands"), "None");
    }

    #[test]
    fn test_form_b_specific_fields() {
        let text = "\
            Name of the claimant community: Gond Samaj\n\
            Nistar: firewood, bamboo\n\
            Minor forest produce: tendu leaves, mahua";
        let fields = extract(text, FormType::FormB);
        assert_eq!(fields.value("claimantCommunity"), "Gond Samaj");
        assert_eq!(fields.value("nistariRights"), "firewood, bamboo");
        assert_eq!(fields.value("mfpRights"), "tendu leaves, mahua");
    }

    #[test]
    fn test_common_fields_applied_before_form_fields() {
        // "village" comes from the common table even on Form C.
        let text = "Village: Mendha\nBordering villages: Lekha";
        let fields = extract(text, FormType::FormC);
        assert_eq!(fields.value("village"), "Mendha");
        assert_eq!(fields.value("borderingVillages"), "Lekha");
    }

    #[test]
    fn test_split_lines_drops_blank_lines() {
        assert_eq!(split_lines("  a \n\n   \n b"), vec!["a", "b"]);
    }

    #[test]
    fn test_detect_dates() {
        assert_eq!(
            detect_dates("Date: 12/05/1998\nSigned 1-1-2004"),
            vec!["12/05/1998", "1-1-2004"]
        );
        assert!(detect_dates("no dates").is_empty());
    }
}
