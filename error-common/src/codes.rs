// Error codes implementation
// Stable identifiers attached to every rejection raised by the catalog

pub mod validation {
    pub const REQUIRED_FIELD: &str = "VALIDATION_1001";
    pub const INVALID_FORMAT: &str = "VALIDATION_1002";
    pub const OUT_OF_RANGE: &str = "VALIDATION_1003";
    pub const DUPLICATE_CODE: &str = "VALIDATION_1004";
    pub const OVERLAPPING_PERIOD: &str = "VALIDATION_1005";
    pub const INVALID_PERIOD: &str = "VALIDATION_1006";
    pub const LOCKED_RECORD: &str = "VALIDATION_1007";
    pub const INVALID_REFERENCE: &str = "VALIDATION_1008";
    pub const RECORD_IN_USE: &str = "VALIDATION_1009";
}

pub mod database {
    pub const CONSTRAINT_VIOLATION: &str = "DB_4003";
    pub const RECORD_NOT_FOUND: &str = "DB_4004";
}
