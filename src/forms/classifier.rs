//! Form type detection from recognized text.

use tracing::debug;

use crate::models::FormType;

/// Explicit form-name phrases, checked first. Any phrase selects the form.
const FORM_NAME_PHRASES: &[(FormType, &[&str])] = &[
    (
        FormType::FormA,
        &["form a", "claim form for rights to forest land"],
    ),
    (FormType::FormB, &["form b", "claim form for community rights"]),
    (
        FormType::FormC,
        &["form c", "claim form for rights to community forest resource"],
    ),
];

/// Content markers used when no form name is printed. All markers must appear.
const CONTENT_MARKERS: &[(FormType, &[&str])] = &[
    (FormType::FormA, &["extent of forest land", "self-cultivation"]),
    (FormType::FormB, &["community rights", "nistar"]),
    (FormType::FormC, &["gram sabha", "community forest resource"]),
];

/// Assign a form type to combined page text. Falls back to Form A.
pub fn classify(text: &str) -> FormType {
    let text = text.to_lowercase();

    for (form_type, phrases) in FORM_NAME_PHRASES {
        if let Some(phrase) = phrases.iter().find(|p| text.contains(*p)) {
            debug!("Classified as {} by form name '{}'", form_type, phrase);
            return *form_type;
        }
    }

    for (form_type, markers) in CONTENT_MARKERS {
        if markers.iter().all(|m| text.contains(m)) {
            debug!("Classified as {} by content markers", form_type);
            return *form_type;
        }
    }

    debug!("No form markers found, defaulting to {}", FormType::FormA);
    FormType::FormA
}
