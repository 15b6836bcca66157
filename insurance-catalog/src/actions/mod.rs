//! User-facing actions built on the catalog services

pub mod department_wizard;
pub mod his_sync;
pub mod mappings;
pub mod notification;

pub use department_wizard::*;
pub use his_sync::*;
pub use mappings::*;
pub use notification::*;
