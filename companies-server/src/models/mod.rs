//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod company;
pub mod listing;

pub use validation::ValidationError;
pub use company::{
    validate_activity_code, validate_non_empty, validate_tax_id, ActivityCode, CompanyPatch,
    CreateCompanyRequest, LegalName, NewCompany, TaxId, TradeName, UpdateCompanyRequest,
};
pub use listing::{ListParams, ListQuery, SortDir, SortField, DEFAULT_LIMIT, MAX_LIMIT};
