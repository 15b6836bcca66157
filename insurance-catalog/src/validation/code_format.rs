//! Category code formats
//!
//! Each [`CategoryType`] owns a [`CodeRule`]. [`check_code`] is the
//! authoritative check run on every write; [`sanitize_code`] is the lenient
//! form used while a code is being typed, which strips what the rule would
//! reject and reports what it changed.

use std::ops::RangeInclusive;

use error_common::{codes::validation, ErrorContext, ValidationError, ValidationResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::models::CategoryType;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"^[0-9]*$").unwrap();
    static ref LETTERS_AND_SPACES: Regex = Regex::new(r"^[\p{L}\s]*$").unwrap();
    static ref DIGITS_AND_SYMBOLS: Regex = Regex::new(r"^[0-9\s\-_\.\(\)\[\]]*$").unwrap();
}

/// Characters a code may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Any,
    Digits,
    LettersAndSpaces,
    /// Digits, whitespace and `- _ . ( ) [ ]`
    DigitsAndSymbols,
}

impl Charset {
    fn pattern(self) -> Option<&'static Regex> {
        match self {
            Self::Any => None,
            Self::Digits => Some(&*DIGITS),
            Self::LettersAndSpaces => Some(&*LETTERS_AND_SPACES),
            Self::DigitsAndSymbols => Some(&*DIGITS_AND_SYMBOLS),
        }
    }

    pub fn matches(self, code: &str) -> bool {
        self.pattern().map_or(true, |pattern| pattern.is_match(code))
    }

    pub fn allows(self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.matches(c.encode_utf8(&mut buf))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRule {
    /// Maximum length in characters
    pub max_length: Option<usize>,
    pub charset: Charset,
    /// Integer range the code must parse into
    pub numeric_range: Option<RangeInclusive<i64>>,
    /// Values rejected after trimming
    pub forbidden_values: &'static [&'static str],
}

/// Reason a code failed its rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeViolation {
    TooLong { max_length: usize },
    InvalidCharacters,
    Forbidden,
    OutOfRange { min: i64, max: i64 },
}

impl CodeRule {
    pub const fn unrestricted() -> Self {
        Self {
            max_length: None,
            charset: Charset::Any,
            numeric_range: None,
            forbidden_values: &[],
        }
    }

    pub fn check(&self, code: &str) -> Result<(), CodeViolation> {
        if !self.charset.matches(code) {
            return Err(CodeViolation::InvalidCharacters);
        }
        if let Some(max_length) = self.max_length {
            if code.chars().count() > max_length {
                return Err(CodeViolation::TooLong { max_length });
            }
        }
        if self.forbidden_values.contains(&code.trim()) {
            return Err(CodeViolation::Forbidden);
        }
        if let Some(range) = &self.numeric_range {
            // A digit string too long for i64 is out of range as well
            let in_range = code.parse::<i64>().is_ok_and(|value| range.contains(&value));
            if !in_range {
                return Err(CodeViolation::OutOfRange {
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(())
    }

    /// Length kept while typing: the explicit maximum, else the digit count of the range maximum
    fn typing_length(&self) -> Option<usize> {
        self.max_length.or_else(|| {
            self.numeric_range
                .as_ref()
                .map(|range| range.end().unsigned_abs().to_string().len())
        })
    }
}

impl CategoryType {
    pub fn rule(self) -> CodeRule {
        match self {
            Self::TechnicalLevel => CodeRule::unrestricted(),
            Self::ProfessionalTitle | Self::MedicalServiceCode => CodeRule {
                max_length: Some(2),
                charset: Charset::Digits,
                ..CodeRule::unrestricted()
            },
            Self::BhytObjectCode => CodeRule {
                max_length: Some(2),
                charset: Charset::LettersAndSpaces,
                ..CodeRule::unrestricted()
            },
            Self::KcbObjectCode => CodeRule {
                max_length: Some(4),
                charset: Charset::DigitsAndSymbols,
                forbidden_values: &["0"],
                ..CodeRule::unrestricted()
            },
            Self::DischargeTypeCode | Self::AccidentCode => CodeRule {
                charset: Charset::Digits,
                numeric_range: Some(1..=99),
                ..CodeRule::unrestricted()
            },
        }
    }

    fn violation_message(self, violation: &CodeViolation) -> String {
        let label = self.label();
        match (self, violation) {
            (Self::ProfessionalTitle | Self::MedicalServiceCode, CodeViolation::InvalidCharacters) => {
                "Code must contain only numbers for this category type!".to_string()
            }
            (Self::ProfessionalTitle | Self::MedicalServiceCode, CodeViolation::TooLong { .. }) => {
                "The code length is only up to 2 digits!".to_string()
            }
            (Self::BhytObjectCode, _) => "BHYT object code must not exceed 2 characters and \
                must not contain numbers or special characters!"
                .to_string(),
            (Self::KcbObjectCode, _) => "KCB object code must not exceed 4 characters and \
                must contain only numbers and special characters (no letters and number '0')!"
                .to_string(),
            (_, CodeViolation::InvalidCharacters) => format!("{label} must be a number!"),
            (_, CodeViolation::OutOfRange { min, max }) => {
                format!("{label} must be between {min} and {max}!")
            }
            (_, CodeViolation::TooLong { max_length }) => {
                format!("{label} must not exceed {max_length} characters!")
            }
            (_, CodeViolation::Forbidden) => format!("{label} code is not allowed!"),
        }
    }
}

/// Check `code` against the rule of `category_type`
pub fn check_code(category_type: CategoryType, code: &str) -> ValidationResult<()> {
    category_type.rule().check(code).map_err(|violation| {
        let error_code = match violation {
            CodeViolation::OutOfRange { .. } => validation::OUT_OF_RANGE,
            _ => validation::INVALID_FORMAT,
        };
        ValidationError::new(
            error_code,
            format!(
                "{} ({}: '{}')",
                category_type.violation_message(&violation),
                category_type.label(),
                code
            ),
        )
        .with_context(
            ErrorContext::for_model("hic_category")
                .with_field("code")
                .add_context("category_type", category_type.as_str())
                .add_context("value", code),
        )
    })
}

/// Warning shown when typing altered the code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeWarning {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedCode {
    pub code: String,
    pub warning: Option<CodeWarning>,
}

/// Strip characters the rule rejects and cut the code to its maximum length
pub fn sanitize_code(category_type: CategoryType, code: &str) -> SanitizedCode {
    let rule = category_type.rule();
    let filtered: String = code.chars().filter(|c| rule.charset.allows(*c)).collect();
    let stripped = filtered.chars().count() != code.chars().count();

    let (cleaned, truncated) = match rule.typing_length() {
        Some(limit) if filtered.chars().count() > limit => {
            (filtered.chars().take(limit).collect::<String>(), true)
        }
        _ => (filtered, false),
    };

    let warning = (stripped || truncated).then(|| {
        let digits = rule.charset == Charset::Digits;
        let message = match (truncated, rule.typing_length()) {
            (true, Some(limit)) if digits => format!("Keep only the first {limit} digits"),
            (true, Some(limit)) => format!("Keep only the first {limit} characters"),
            _ if digits => "Keep only the digits".to_string(),
            _ => "Keep only the allowed characters".to_string(),
        };
        CodeWarning {
            title: "Invalid Characters Removed".to_string(),
            message,
        }
    });

    SanitizedCode {
        code: cleaned,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn professional_title_takes_two_digits() {
        assert!(check_code(CategoryType::ProfessionalTitle, "12").is_ok());
        assert!(check_code(CategoryType::MedicalServiceCode, "7").is_ok());

        let err = check_code(CategoryType::ProfessionalTitle, "123").unwrap_err();
        assert!(err.message.starts_with("The code length is only up to 2 digits!"));

        let err = check_code(CategoryType::ProfessionalTitle, "AB").unwrap_err();
        assert!(err.message.contains("only numbers"));
        assert!(err.message.contains("Professional Title"));
        assert!(err.message.contains("'AB'"));
    }

    #[test]
    fn bhyt_object_code_takes_letters() {
        assert!(check_code(CategoryType::BhytObjectCode, "AB").is_ok());
        assert!(check_code(CategoryType::BhytObjectCode, "Đ ").is_ok());
        assert!(check_code(CategoryType::BhytObjectCode, "A1").is_err());
        assert!(check_code(CategoryType::BhytObjectCode, "ABC").is_err());
    }

    #[test]
    fn kcb_object_code_rules() {
        assert!(check_code(CategoryType::KcbObjectCode, "1.2").is_ok());
        assert!(check_code(CategoryType::KcbObjectCode, "(3)").is_ok());
        assert!(check_code(CategoryType::KcbObjectCode, "0").is_err());
        assert!(check_code(CategoryType::KcbObjectCode, " 0 ").is_err());
        assert!(check_code(CategoryType::KcbObjectCode, "12345").is_err());
        assert!(check_code(CategoryType::KcbObjectCode, "1A").is_err());
    }

    #[test]
    fn discharge_and_accident_codes_are_in_range() {
        assert!(check_code(CategoryType::DischargeTypeCode, "1").is_ok());
        assert!(check_code(CategoryType::AccidentCode, "99").is_ok());

        let err = check_code(CategoryType::DischargeTypeCode, "150").unwrap_err();
        assert_eq!(err.code, validation::OUT_OF_RANGE);
        assert!(err.message.starts_with("Discharge Type Code must be between 1 and 99!"));

        assert!(check_code(CategoryType::AccidentCode, "0").is_err());
        assert!(check_code(CategoryType::AccidentCode, "99999999999999999999999").is_err());

        let err = check_code(CategoryType::AccidentCode, "x1").unwrap_err();
        assert!(err.message.starts_with("Accident Code must be a number!"));
    }

    #[test]
    fn technical_level_is_free_form() {
        assert!(check_code(CategoryType::TechnicalLevel, "Hạng I - đặc biệt").is_ok());
    }

    #[test]
    fn sanitize_strips_non_digits() {
        let sanitized = sanitize_code(CategoryType::ProfessionalTitle, "1a");
        assert_eq!(sanitized.code, "1");
        let warning = sanitized.warning.unwrap();
        assert_eq!(warning.title, "Invalid Characters Removed");
        assert_eq!(warning.message, "Keep only the digits");
    }

    #[test]
    fn sanitize_truncates_to_two_digits() {
        let sanitized = sanitize_code(CategoryType::MedicalServiceCode, "1234");
        assert_eq!(sanitized.code, "12");
        assert_eq!(sanitized.warning.unwrap().message, "Keep only the first 2 digits");

        let sanitized = sanitize_code(CategoryType::DischargeTypeCode, "x105");
        assert_eq!(sanitized.code, "10");
    }

    #[test]
    fn sanitize_leaves_valid_codes_alone() {
        let sanitized = sanitize_code(CategoryType::ProfessionalTitle, "07");
        assert_eq!(sanitized.code, "07");
        assert!(sanitized.warning.is_none());

        let sanitized = sanitize_code(CategoryType::TechnicalLevel, "anything at all");
        assert_eq!(sanitized.code, "anything at all");
        assert!(sanitized.warning.is_none());
    }
}
