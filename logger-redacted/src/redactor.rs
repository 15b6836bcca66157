use regex::Regex;
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use base64::{Engine as _, engine::general_purpose};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref INSURANCE_NUMBER_REGEX: Regex = Regex::new(r"\b\d{10}\b").unwrap();
    static ref CARD_NUMBER_REGEX: Regex = Regex::new(r"\b([A-Z]{2})\d{13}\b").unwrap();
}

/// Redaction rules applied to log text
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_insurance_numbers: bool,
    pub redact_card_numbers: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_insurance_numbers: true,
            redact_card_numbers: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// Identifier redactor for log messages
#[derive(Debug, Clone)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Card numbers first: their digit run is longer than an insurance number
        if self.config.redact_card_numbers {
            result = self.redact_card_numbers(&result);
        }

        if self.config.redact_insurance_numbers {
            result = self.redact_insurance_numbers(&result);
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    /// Mask a single known-sensitive value, regardless of its shape
    pub fn mask_value(&self, value: &str) -> String {
        if self.config.hash_for_correlation {
            format!("ID[{}]", self.hash_value(value))
        } else {
            "*".repeat(value.chars().count())
        }
    }

    fn redact_insurance_numbers(&self, text: &str) -> String {
        INSURANCE_NUMBER_REGEX.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("BHXH[{}]", self.hash_value(&caps[0]))
            } else {
                "**********".to_string()
            }
        }).to_string()
    }

    fn redact_card_numbers(&self, text: &str) -> String {
        CARD_NUMBER_REGEX.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("BHYT[{}]", self.hash_value(&caps[0]))
            } else {
                format!("{}{}", &caps[1], "*".repeat(13))
            }
        }).to_string()
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*')
                    ),
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}
