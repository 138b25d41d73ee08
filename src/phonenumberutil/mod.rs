mod helper_constants;
mod helper_functions;
mod phone_number_regexps_and_mappings;
mod parsing;
mod validation;
mod region_inference;
mod formatting;
mod example_numbers;
pub(self) mod helper_types;
pub mod errors;
pub mod enums;
pub mod metadata_store;
pub mod phonenumberutil;

pub use enums::{PhoneNumberFormat, PhoneNumberType, NumberLengthType};
pub use phonenumberutil::PhoneNumberUtil;

/// Outcome of a possibility check: the kind of possible number, or the
/// reason it is not possible.
pub type ValidationResult = Result<NumberLengthType, errors::ValidationError>;
