//! Named storage constraints of the catalog tables
//!
//! The names match `database-layer/migrations/001_insurance_catalog.sql`.

use database_layer::ConstraintDef;
use error_common::codes::validation;

pub static BENEFIT_CODE_UNIQ: ConstraintDef =
    ConstraintDef::new("benefit_code_uniq", "hic_benefit_code", "Benefit code must be unique!");
pub static BENEFIT_CODE_CHECK: ConstraintDef =
    ConstraintDef::new("benefit_code_check", "hic_benefit_code", "Benefit code must be greater than 0!");
pub static BENEFIT_RATE_CHECK: ConstraintDef = ConstraintDef::new(
    "benefit_rate_check",
    "hic_benefit_code",
    "Benefit rate must be between 1 and 100!",
);

pub static CATEGORY_CODE_TYPE_UNIQ: ConstraintDef = ConstraintDef::new(
    "category_code_type_uniq",
    "hic_category",
    "Category code must be unique within the same category type!",
);

pub static DEPARTMENT_BHYT_CODE_UNIQ: ConstraintDef =
    ConstraintDef::new("bhyt_code_uniq", "hr_department", "BHYT department code must be unique!");
pub static DEPARTMENT_HIS_CODE_UNIQ: ConstraintDef =
    ConstraintDef::new("his_code_uniq", "hr_department", "HIS department code must be unique!");

pub static STAFF_INSURANCE_CODE_UNIQUE: ConstraintDef =
    ConstraintDef::new("social_insurance_code_unique", "hr_employee", "BHYT Code must be unique!");
pub static STAFF_CERTIFICATE_CODE_UNIQUE: ConstraintDef = ConstraintDef::new(
    "certificate_code_unique",
    "hr_employee",
    "Practice Certificate Code must be unique!",
);
pub static STAFF_HIS_CODE_UNIQUE: ConstraintDef =
    ConstraintDef::new("staff_his_code_unique", "hr_employee", "HIS Code must be unique!");

pub static BED_CODE_TYPE_UNIQ: ConstraintDef = ConstraintDef::new(
    "code_type_uniq",
    "hic_hospital_bed",
    "Bed code must be unique within the same type (BHYT/HIS)!",
);
pub static BED_PRICE_CHECK: ConstraintDef =
    ConstraintDef::new("bed_price_check", "hic_hospital_bed", "Bed price must not be negative!");

pub static FACILITY_CODE_UNIQUE: ConstraintDef = ConstraintDef::new(
    "medical_facility_code_unique",
    "hic_medical_facility",
    "Medical facility code must be unique!",
);

pub static PAYMENT_RATE_CODE_UNIQUE: ConstraintDef =
    ConstraintDef::new("payment_rate_code_unique", "hic_payment_rate", "Payment rate code must be unique!");
pub static OUTPATIENT_RATE_CHECK: ConstraintDef = ConstraintDef::new(
    "outpatient_rate_check",
    "hic_payment_rate",
    "Outpatient rate must be between 0% and 100%!",
);
pub static INPATIENT_RATE_CHECK: ConstraintDef = ConstraintDef::new(
    "inpatient_rate_check",
    "hic_payment_rate",
    "Inpatient rate must be between 0% and 100%!",
);
pub static PAYMENT_RATE_DATE_CHECK: ConstraintDef =
    ConstraintDef::new("payment_rate_date_check", "hic_payment_rate", "End date must be after start date!");
pub static PAYMENT_RATE_PERIOD_EXCL: ConstraintDef = ConstraintDef::new(
    "payment_rate_period_excl",
    "hic_payment_rate",
    "Payment rate already exists for this hospital and technical level in this time period!",
);

pub static REFERENCE_CODE_UNIQUE: ConstraintDef =
    ConstraintDef::new("reference_code_unique", "hic_reference_level", "Reference code must be unique!");
pub static LEVEL_NUMBER_CHECK: ConstraintDef =
    ConstraintDef::new("level_number_check", "hic_reference_level", "Level number must be greater than 0!");
pub static REFERENCE_DATE_CHECK: ConstraintDef = ConstraintDef::new(
    "reference_date_check",
    "hic_reference_level",
    "Start date must be less than end date!",
);
pub static REFERENCE_LEVEL_PERIOD_EXCL: ConstraintDef = ConstraintDef::new(
    "reference_level_period_excl",
    "hic_reference_level",
    "The reference level time is overlapping with another reference level. Please check again.",
);

/// Every constraint the schema declares
pub static ALL: &[&ConstraintDef] = &[
    &BENEFIT_CODE_UNIQ,
    &BENEFIT_CODE_CHECK,
    &BENEFIT_RATE_CHECK,
    &CATEGORY_CODE_TYPE_UNIQ,
    &DEPARTMENT_BHYT_CODE_UNIQ,
    &DEPARTMENT_HIS_CODE_UNIQ,
    &STAFF_INSURANCE_CODE_UNIQUE,
    &STAFF_CERTIFICATE_CODE_UNIQUE,
    &STAFF_HIS_CODE_UNIQUE,
    &BED_CODE_TYPE_UNIQ,
    &BED_PRICE_CHECK,
    &FACILITY_CODE_UNIQUE,
    &PAYMENT_RATE_CODE_UNIQUE,
    &OUTPATIENT_RATE_CHECK,
    &INPATIENT_RATE_CHECK,
    &PAYMENT_RATE_DATE_CHECK,
    &PAYMENT_RATE_PERIOD_EXCL,
    &REFERENCE_CODE_UNIQUE,
    &LEVEL_NUMBER_CHECK,
    &REFERENCE_DATE_CHECK,
    &REFERENCE_LEVEL_PERIOD_EXCL,
];

pub fn find(name: &str) -> Option<&'static ConstraintDef> {
    ALL.iter().copied().find(|def| def.name == name)
}

/// Rejection code reported for a violated constraint
pub fn rejection_code(name: &str) -> &'static str {
    match name {
        "payment_rate_date_check" | "reference_date_check" => validation::INVALID_PERIOD,
        _ if name.ends_with("_excl") => validation::OVERLAPPING_PERIOD,
        _ if name.ends_with("_uniq") || name.ends_with("_unique") => validation::DUPLICATE_CODE,
        _ if name.ends_with("_check") => validation::OUT_OF_RANGE,
        _ => error_common::codes::database::CONSTRAINT_VIOLATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_in_schema() {
        let mut seen = HashSet::new();
        for def in ALL {
            assert!(seen.insert(def.name), "duplicate constraint {}", def.name);
            assert!(
                database_layer::SCHEMA_SQL.contains(&format!("CONSTRAINT {}", def.name)),
                "{} missing from schema",
                def.name
            );
        }
    }

    #[test]
    fn rejection_codes_follow_constraint_kind() {
        assert_eq!(rejection_code("benefit_code_uniq"), validation::DUPLICATE_CODE);
        assert_eq!(rejection_code("staff_his_code_unique"), validation::DUPLICATE_CODE);
        assert_eq!(rejection_code("payment_rate_period_excl"), validation::OVERLAPPING_PERIOD);
        assert_eq!(rejection_code("reference_date_check"), validation::INVALID_PERIOD);
        assert_eq!(rejection_code("inpatient_rate_check"), validation::OUT_OF_RANGE);
    }
}
