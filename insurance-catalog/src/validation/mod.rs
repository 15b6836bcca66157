//! Write-path validators shared by the catalog services

pub mod code_format;
pub mod identifiers;
pub mod period;

pub use code_format::*;
pub use identifiers::*;
pub use period::*;
