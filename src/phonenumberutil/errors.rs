// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::num::ParseIntError;

use strum::IntoStaticStr;
use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// Errors which can only be caused by a bug in the library or its metadata.
#[derive(Debug, PartialEq, Error)]
pub enum InternalLogicError {
    #[error("{0}")]
    InvalidRegex(#[from] InvalidRegexError),
}

/// Parse failure as seen inside the crate, where a broken metadata regex is
/// still a possible outcome.
#[derive(Debug, PartialEq, Error)]
pub enum ParseErrorInternal {
    #[error("{0}")]
    FailedToParse(#[from] ParseError),
    #[error("{0}")]
    RegexError(#[from] InvalidRegexError)
}

/// Why a string could not be parsed into a [`crate::PhoneNumber`].
///
/// Like [`ValidationError`], converts into its reason tag (`"NOT_A_NUMBER"`,
/// `"INVALID_COUNTRY_CODE"`, `"TOO_SHORT_NSN"`, ...).
#[derive(Debug, PartialEq, Error, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseError {
    /// No calling code in the input and no usable default region, or a
    /// calling code no region uses.
    #[error("missing or unknown country calling code")]
    InvalidCountryCode,
    #[error("input is not a phone number: {0}")]
    NotANumber(#[from] NotANumberError),
    /// Nothing but a calling code (or less) after the international prefix.
    #[error("too short after the international dialling prefix")]
    TooShortAfterIdd,
    #[error("national significant number is too short")]
    TooShortNsn,
    #[error("national significant number is too long")]
    TooLongNsn,
}

#[derive(Debug, PartialEq, Error)]
pub enum NotANumberError {
    #[error("does not look like a phone number")]
    NotMatchedValidNumberPattern,
    #[error("malformed RFC3966 phone-context")]
    InvalidPhoneContext,
    #[error("{0}")]
    FailedToParseNumberAsInt(#[from] ParseIntError),
    #[error("{0}")]
    FailedToExtractNumber(#[from] ExtractNumberError),
}

#[derive(Debug, PartialEq, Error)]
pub enum ExtractNumberError {
    #[error("no digit or plus sign in input")]
    NoValidStartCharacter,
    #[error("nothing left after stripping punctuation")]
    NotANumber,
}

/// Why no example number could be produced.
#[derive(Debug, PartialEq, Error)]
pub enum GetExampleNumberError {
    /// The example stored in metadata does not parse; a metadata bug.
    #[error("stored example does not parse: {0}")]
    FailedToParse(#[from] ParseError),
    #[error("metadata has no example of this type")]
    NoExampleNumber,
    #[error("unknown region code")]
    InvalidRegionCode
}

/// Why a number is not possible, judged by its length alone.
///
/// The reason tag of every variant is available as a `&'static str`
/// (`"TOO_SHORT"`, `"INVALID_LENGTH"`, ...) through `Into`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("unknown country calling code")]
    InvalidCountryCode,
    /// Shorter than every possible length.
    #[error("shorter than every possible length")]
    TooShort,
    /// Between the shortest and the longest possible length without being one
    /// of them. Also returned when the metadata has no numbers of the asked
    /// type at all.
    #[error("not one of the possible lengths")]
    InvalidLength,
    /// Longer than every possible length.
    #[error("longer than every possible length")]
    TooLong,
}

/// Metadata resource could not be turned into a usable store.
#[derive(Debug, PartialEq, Error)]
pub enum MetadataError {
    #[error("Corrupt metadata: {0}")]
    CorruptMetadata(String),
}

#[derive(Debug, PartialEq, Error)]
pub enum NotFoundError {
    #[error("No metadata for region code {0}")]
    Region(String),
    #[error("No metadata for country calling code {0}")]
    CallingCode(i32),
}

/// Raised when a region is asked for a number whose calling code is not
/// served by any region in the store.
#[derive(Debug, PartialEq, Error)]
#[error("Country calling code {0} does not belong to any known region")]
pub struct AmbiguousRegionError(pub i32);

#[derive(Debug, PartialEq, Error)]
pub enum AmbiguousRegionErrorInternal {
    #[error("{0}")]
    Ambiguous(#[from] AmbiguousRegionError),
    #[error("{0}")]
    RegexError(#[from] InvalidRegexError)
}

impl From<ExtractNumberError> for ParseError {
    fn from(value: ExtractNumberError) -> Self {
        NotANumberError::FailedToExtractNumber(value).into()
    }
}

impl From<ExtractNumberError> for ParseErrorInternal {
    fn from(value: ExtractNumberError) -> Self {
        ParseError::from(value).into()
    }
}

impl From<NotANumberError> for ParseErrorInternal {
    fn from(value: NotANumberError) -> Self {
        ParseError::from(value).into()
    }
}

impl ParseErrorInternal {
    pub fn into_public(self) -> ParseError {
        match self {
            ParseErrorInternal::FailedToParse(err) => err,
            ParseErrorInternal::RegexError(err) =>
                panic!("metadata contains an invalid regex: {}", err)
        }
    }
}

impl AmbiguousRegionErrorInternal {
    pub fn into_public(self) -> AmbiguousRegionError {
        match self {
            AmbiguousRegionErrorInternal::Ambiguous(err) => err,
            AmbiguousRegionErrorInternal::RegexError(err) =>
                panic!("metadata contains an invalid regex: {}", err)
        }
    }
}
