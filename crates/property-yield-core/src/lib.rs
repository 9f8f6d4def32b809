pub mod error;
pub mod format;
pub mod numeric;
pub mod policy;
pub mod property;
pub mod types;

#[cfg(feature = "charges")]
pub mod charges;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "portfolio")]
pub mod portfolio;

pub use error::PropertyYieldError;
pub use format::format_currency;
pub use policy::PolicyConfig;
pub use property::{validate_input, FieldIssue, PropertyInput, PropertyType};
pub use types::*;

#[cfg(feature = "charges")]
pub use charges::{apply_derived_charges, insurance::calculate_insurance, lpt::calculate_lpt};

#[cfg(feature = "financing")]
pub use financing::mortgage::calculate_mortgage_payment;

#[cfg(feature = "analysis")]
pub use analysis::{
    roi::{calculate_roi, AnalysisResult},
    sensitivity::{calculate_sensitivity, SensitivityItem},
};

/// Standard result type for all property-yield operations
pub type PropertyYieldResult<T> = Result<T, PropertyYieldError>;
