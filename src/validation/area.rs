//! Land-area ceiling check.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::Validator;

/// Leading decimal number, so values like "2.5 ha" still parse.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([-+]?(?:\d+\.?\d*|\.\d+))").unwrap());

/// Parse the numeric prefix of an area string.
pub(crate) fn parse_area(input: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(input)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Result of the land-area check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaCheck {
    pub input: String,
    pub hectares: Option<f64>,
    pub valid: bool,
    pub message: String,
    /// Area is above the statutory ceiling. Blocking.
    pub exceeds_limit: bool,
}

impl Validator {
    /// Area in hectares must be positive and within the ceiling.
    pub fn validate_land_area(&self, input: &str) -> AreaCheck {
        let max_area = self.rules().max_area_hectares;

        let Some(area) = parse_area(input) else {
            return AreaCheck {
                input: input.to_string(),
                hectares: None,
                valid: false,
                message: "Area must be a valid number".to_string(),
                exceeds_limit: false,
            };
        };

        if area <= 0.0 {
            return AreaCheck {
                input: input.to_string(),
                hectares: Some(area),
                valid: false,
                message: "Area must be greater than 0".to_string(),
                exceeds_limit: false,
            };
        }

        if area > max_area {
            return AreaCheck {
                input: input.to_string(),
                hectares: Some(area),
                valid: false,
                message: format!(
                    "Area of {} hectares exceeds the {} hectare ceiling of Section 4(6) of FRA",
                    area, max_area
                ),
                exceeds_limit: true,
            };
        }

        AreaCheck {
            input: input.to_string(),
            hectares: Some(area),
            valid: true,
            message: format!("Area within permissible limit of {} hectares", max_area),
            exceeds_limit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_is_inclusive() {
        let check = Validator::default().validate_land_area("4.0");
        assert!(check.valid);
        assert!(!check.exceeds_limit);
    }

    #[test]
    fn test_over_ceiling() {
        let check = Validator::default().validate_land_area("4.01");
        assert!(!check.valid);
        assert!(check.exceeds_limit);
    }

    #[test]
    fn test_negative_area() {
        let check = Validator::default().validate_land_area("-1");
        assert!(!check.valid);
        assert!(!check.exceeds_limit);
        assert_eq!(check.hectares, Some(-1.0));
    }

    #[test]
    fn test_not_a_number() {
        let check = Validator::default().validate_land_area("about two acres");
        assert!(!check.valid);
        assert!(!check.exceeds_limit);
        assert_eq!(check.hectares, None);
    }

    #[test]
    fn test_units_after_number() {
        assert_eq!(parse_area("2.5 ha"), Some(2.5));
        assert_eq!(parse_area(" .75"), Some(0.75));
        assert_eq!(parse_area("3."), Some(3.0));
        assert_eq!(parse_area(""), None);
        assert_eq!(parse_area("ha 2"), None);
    }

    #[test]
    fn test_zero_area() {
        assert!(!Validator::default().validate_land_area("0").valid);
    }
}
