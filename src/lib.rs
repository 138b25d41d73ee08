mod interfaces;
/// This module is automatically generated from /resources/*.proto
mod proto_gen;
mod phonenumberutil;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub(crate) mod regex_util;
pub(crate) mod string_util;

mod macros;

pub use phonenumberutil::{
    PhoneNumberUtil,
    metadata_store::MetadataStore,
    enums::{PhoneNumberFormat, PhoneNumberType, NumberLengthType},
    errors,
    ValidationResult,
};
pub use proto_gen::{phonemetadata, phonenumber};
pub use proto_gen::phonenumber::PhoneNumber;
pub use proto_gen::phonenumber::phone_number::CountryCodeSource;
pub use regexp_cache::InvalidRegexError;
