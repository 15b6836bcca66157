use chrono::NaiveDate;
use error_common::{codes::validation, ErrorContext, ValidationError, ValidationResult};

/// Length of a social insurance number
pub const INSURANCE_NUMBER_LEN: usize = 10;

/// Staff social insurance number: exactly 10 ASCII digits
pub fn validate_insurance_number(value: &str) -> ValidationResult<()> {
    let context = || ErrorContext::for_model("hr_employee").with_field("bhyt_code");

    if value.chars().count() != INSURANCE_NUMBER_LEN {
        return Err(ValidationError::new(
            validation::INVALID_FORMAT,
            "BHYT Code must be exactly 10 characters long.",
        )
        .with_context(context()));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            validation::INVALID_FORMAT,
            "BHYT Code must contain only numbers.",
        )
        .with_context(context()));
    }
    Ok(())
}

pub fn validate_certificate_date(issued_on: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if issued_on > today {
        return Err(ValidationError::new(
            validation::INVALID_PERIOD,
            "Certificate issue date cannot be in the future.",
        )
        .with_context(ErrorContext::for_model("hr_employee").with_field("certificate_date")));
    }
    Ok(())
}
