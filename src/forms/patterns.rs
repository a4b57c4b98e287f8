//! Ordered field pattern tables.
//!
//! Each field has a list of alternatives tried in declared order. A pattern's
//! first capture group is the field value. Tables are applied line by line,
//! so both the order of fields and the order of alternatives are significant.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::FormType;

/// Regex alternatives for one field key.
#[derive(Debug)]
pub struct FieldPattern {
    pub key: &'static str,
    pub alternatives: Vec<Regex>,
}

impl FieldPattern {
    fn new(key: &'static str, alternatives: &[&str]) -> Self {
        Self {
            key,
            alternatives: alternatives
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
                .collect(),
        }
    }

    /// Value captured by the first alternative that matches `line` with a
    /// non-blank capture.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.alternatives.iter().find_map(|re| {
            re.captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|value| !value.is_empty())
        })
    }
}

/// Fields shared by all claim forms.
pub static COMMON_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            "claimantName",
            &[
                r"(?:name of (?:the )?claimant|claimant name|नाम)[\s:]*(.+)",
                r"(?:1\.?\s*name)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "spouseName",
            &[
                r"(?:name of (?:the )?spouse|spouse name|पति/पत्नी)[\s:]*(.+)",
                r"(?:2\.?\s*name of spouse)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "fatherMotherName",
            &[
                r"(?:name of father/mother|father/mother|पिता/माता)[\s:]*(.+)",
                r"(?:3\.?\s*name of father)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "address",
            &[r"(?:address|पता)[\s:]*(.+)", r"(?:4\.?\s*address)[\s:]*(.+)"],
        ),
        FieldPattern::new(
            "village",
            &[
                r"(?:village|गांव|ग्राम)[\s:]*(.+)",
                r"(?:5\.?\s*village)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "gramPanchayat",
            &[
                r"(?:gram panchayat|ग्राम पंचायत)[\s:]*(.+)",
                r"(?:6\.?\s*gram panchayat)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "tehsil",
            &[
                r"(?:tehsil|taluka|तहसील)[\s:]*(.+)",
                r"(?:7\.?\s*tehsil)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "district",
            &[r"(?:district|जिला)[\s:]*(.+)", r"(?:8\.?\s*district)[\s:]*(.+)"],
        ),
        FieldPattern::new(
            "isScheduledTribe",
            &[
                r"(?:scheduled tribe|अनुसूचित जनजाति)[\s:]*(.+)",
                r"(?:9\.?\s*\(?a\)?\s*scheduled tribe)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "isOTFD",
            &[
                r"(?:other traditional forest dweller|otfd)[\s:]*(.+)",
                r"(?:9\.?\s*\(?b\)?\s*other traditional)[\s:]*(.+)",
            ],
        ),
    ]
});

/// Form A: individual rights to forest land.
pub static FORM_A_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            "familyMembers",
            &[
                r"(?:family members|members in the family)[\s:]*(.+)",
                r"(?:10\.?\s*name of other members)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "extentForHabitation",
            &[
                r"(?:extent.*habitation|for habitation)[\s:]*([0-9.]+)",
                r"(?:1\.?\s*\(?a\)?\s*for habitation)[\s:]*([0-9.]+)",
            ],
        ),
        FieldPattern::new(
            "extentForCultivation",
            &[
                r"(?:extent.*cultivation|self.cultivation)[\s:]*([0-9.]+)",
                r"(?:1\.?\s*\(?b\)?\s*for self.cultivation)[\s:]*([0-9.]+)",
            ],
        ),
        FieldPattern::new(
            "disputedLands",
            &[
                r"(?:disputed lands?)[\s:]*(.+)",
                r"(?:2\.?\s*disputed lands)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "pattasLeases",
            &[
                r"(?:pattas?/leases?/grants?)[\s:]*(.+)",
                r"(?:3\.?\s*pattas)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "evidence",
            &[
                r"(?:evidence in support|evidence)[\s:]*(.+)",
                r"(?:8\.?\s*evidence)[\s:]*(.+)",
            ],
        ),
    ]
});

/// Form B: community rights.
pub static FORM_B_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            "claimantCommunity",
            &[
                r"(?:name of.*claimant.*community)[\s:]*(.+)",
                r"(?:1\.?\s*name of.*claimant)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "isFDSTCommunity",
            &[
                r"(?:fdst community|forest dwelling)[\s:]*(.+)",
                r"(?:1\.?\s*\(?a\)?\s*fdst)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "isOTFDCommunity",
            &[
                r"(?:otfd community)[\s:]*(.+)",
                r"(?:1\.?\s*\(?b\)?\s*otfd)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "nistariRights",
            &[
                r"(?:nistar|community rights)[\s:]*(.+)",
                r"(?:1\.?\s*community rights.*nistar)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "mfpRights",
            &[
                r"(?:minor forest produce|mfp)[\s:]*(.+)",
                r"(?:2\.?\s*rights over minor)[\s:]*(.+)",
            ],
        ),
    ]
});

/// Form C: community forest resource rights.
pub static FORM_C_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            "gramSabhaMembers",
            &[
                r"(?:members of.*gram sabha)[\s:]*(.+)",
                r"(?:5\.?\s*name.*members)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "khasraNumbers",
            &[
                r"(?:khasra|compartment)[\s:]*(.+)",
                r"(?:6\.?\s*khasra)[\s:]*(.+)",
            ],
        ),
        FieldPattern::new(
            "borderingVillages",
            &[
                r"(?:bordering villages?)[\s:]*(.+)",
                r"(?:7\.?\s*bordering)[\s:]*(.+)",
            ],
        ),
    ]
});

/// Form-specific table for `form_type`, applied after [`COMMON_PATTERNS`].
pub fn form_patterns(form_type: FormType) -> &'static [FieldPattern] {
    match form_type {
        FormType::FormA => &FORM_A_PATTERNS,
        FormType::FormB => &FORM_B_PATTERNS,
        FormType::FormC => &FORM_C_PATTERNS,
    }
}

/// Dates written as `dd/mm/yyyy` or `dd-mm-yyyy`.
pub static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{4})").unwrap());
