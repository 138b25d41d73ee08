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

use std::borrow::Cow;

use dec_from_char::DecimalExtended;
use log::trace;
use regex::Regex;

use super::{
    helper_constants::{
        MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        PLUS_SIGN, RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
    },
    helper_functions::{normalize_helper, test_number_length_with_unknown_type},
    helper_types::StrippedNumber,
    PhoneNumberUtil,
};
use crate::{
    errors::{
        ExtractNumberError, NotANumberError, ParseError, ParseErrorInternal, ValidationError,
    },
    phonemetadata::PhoneMetadata,
    phonenumber::PhoneNumber,
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
    string_util::braced_group_refs,
    CountryCodeSource, NumberLengthType,
};

/// Pattern used in place of a missing international prefix. It can never
/// match a normalized number.
const NON_MATCHING_IDD: &str = "NonMatch";

impl PhoneNumberUtil {
    /// Parses a string and returns it as a phone number in proto buffer format.
    /// The method is quite lenient and looks for a number in the input text
    /// (raw input) and does not check whether the string is definitely only a
    /// phone number. To do this, it ignores punctuation and white-space, as well
    /// as any text before the number (e.g. a leading "Tel: ") and trims the
    /// non-number bits. It will accept a number in any format (E164, national,
    /// international etc), assuming it can be interpreted with the defaultRegion
    /// supplied. It also attempts to convert any alpha characters into digits if
    /// it thinks this is a vanity number of the type "1800 MICROSOFT".
    ///
    /// This method will return an error if the number is not considered to be a
    /// possible number. Note that validation of whether the number is actually a
    /// valid number for a particular region is not performed. This can be done
    /// separately with [`PhoneNumberUtil::is_valid_number`].
    ///
    /// `default_region` is the region that we are expecting the number to be
    /// from. This is only used if the number being parsed is not written in
    /// international format. The country calling code for the number in this case
    /// would be stored as that of the default region supplied. If the number is
    /// guaranteed to start with a '+' followed by the country calling code, then
    /// "ZZ" can be supplied.
    pub fn parse(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false)
            .map_err(|err| err.into_public())
    }

    /// Parses a string and returns it in proto buffer format. This method differs
    /// from [`PhoneNumberUtil::parse`] in that it always populates the raw_input
    /// field of the protocol buffer with number_to_parse as well as the
    /// country_code_source field and the preferred domestic carrier code.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true)
            .map_err(|err| err.into_public())
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. At the moment, checks to see that the string begins with
    /// at least 2 digits, ignoring any punctuation commonly found in phone
    /// numbers. This method does not require the number to be normalized in
    /// advance - but does assume that leading non-number symbols have been
    /// removed, such as by [`PhoneNumberUtil::extract_possible_number`].
    pub fn is_viable_phone_number(&self, phone_number: &str) -> bool {
        if phone_number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(phone_number)
    }

    /// Returns true if the number is a valid vanity (alpha) number such as 800
    /// MICROSOFT. A valid vanity number will start with at least 3 digits and
    /// will have three or more alpha characters. This does not do region-specific
    /// checks - to work out if this number is actually valid for a region, it
    /// should be parsed and methods such as is_possible_number_with_reason and
    /// is_valid_number should be used.
    pub fn is_alpha_number(&self, number: &str) -> bool {
        if !self.is_viable_phone_number(number) {
            // Number is too short, or doesn't match the basic phone number pattern.
            return false;
        }
        let (number, _) = self.maybe_strip_extension(number);
        self.reg_exps.valid_alpha_phone_pattern.is_match(number)
    }

    /// Cuts the part of `phone_number` that can be a number: from the first
    /// digit or plus sign, without trailing punctuation, and without a second
    /// number glued on ("(530) 583-6985 x302/x2303" keeps "x302").
    pub fn extract_possible_number<'a>(
        &self,
        phone_number: &'a str,
    ) -> Result<&'a str, ExtractNumberError> {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(phone_number) else {
            trace!("Number '{}' has no valid start character", phone_number);
            return Err(ExtractNumberError::NoValidStartCharacter);
        };
        let mut number = &phone_number[start.start()..];

        // Remove trailing non-alpha non-numerical characters.
        if let Some(trailing) = self.reg_exps.unwanted_end_char_pattern.find(number) {
            number = &number[..trailing.start()];
        }
        // Check for extra numbers at the end.
        if let Some(second_number) = self.reg_exps.second_number_start_pattern.find(number) {
            number = &number[..second_number.start()];
        }
        if number.is_empty() {
            return Err(ExtractNumberError::NotANumber);
        }
        Ok(number)
    }

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals, and
    /// strips punctuation and alpha characters.
    pub fn normalize_digits_only(&self, phone_number: &str) -> String {
        normalize_digits(phone_number, false)
    }

    /// Normalizes a string of characters representing a phone number. This
    /// strips all characters which are not diallable on a mobile phone keypad
    /// (including all non-ASCII digits).
    pub fn normalize_diallable_chars_only(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.diallable_char_mappings, true, phone_number)
    }

    /// Converts all alpha characters in a number to their respective digits on
    /// a keypad, but retains existing formatting.
    pub fn convert_alpha_characters_in_number(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.alpha_mappings, false, phone_number)
    }

    pub(super) fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
    ) -> Result<PhoneNumber, ParseErrorInternal> {
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            trace!("Input string is too long, exceeds {} characters", MAX_INPUT_STRING_LENGTH);
            return Err(ParseError::TooLongNsn.into());
        }

        let national_number = self.build_national_number_for_parsing(number_to_parse)?;

        if !self.is_viable_phone_number(&national_number) {
            trace!("The string supplied did not seem to be a phone number '{}'", national_number);
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        if !self.check_region_for_parsing(&national_number, default_region) {
            trace!("Missing or invalid default country '{}'", default_region);
            return Err(ParseError::InvalidCountryCode.into());
        }

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_owned());
        }

        // Attempt to parse extension first, since it doesn't require
        // region-specific data and we want to have the non-normalised number
        // here.
        let (national_number, extension) = self.maybe_strip_extension(&national_number);
        if let Some(extension) = extension {
            phone_number.set_extension(extension.to_owned());
        }

        let mut region_metadata = self.metadata.metadata_for_region(default_region);
        // Check to see if the number is given in international format so we know
        // whether this number is from the default region or not.
        let extracted = match self.maybe_extract_country_code(
            national_number,
            region_metadata,
            keep_raw_input,
            &mut phone_number,
        ) {
            Err(ParseErrorInternal::FailedToParse(ParseError::InvalidCountryCode)) => {
                // Strip the plus-char, and try again.
                let Some(after_plus) = self.reg_exps.plus_chars_pattern.consume_start(national_number)
                else {
                    return Err(ParseError::InvalidCountryCode.into());
                };
                let extracted = self.maybe_extract_country_code(
                    after_plus,
                    region_metadata,
                    keep_raw_input,
                    &mut phone_number,
                )?;
                if extracted.is_none() {
                    trace!("Could not interpret numbers after plus-sign.");
                    return Err(ParseError::InvalidCountryCode.into());
                }
                extracted
            }
            result => result?,
        };

        let mut normalized_national_number = match extracted {
            Some((country_code, national_number)) => {
                let phone_number_region = self.metadata.region_code_for_calling_code(country_code);
                if phone_number_region != default_region {
                    // Metadata cannot be None because the country calling code is valid.
                    region_metadata = self
                        .metadata
                        .metadata_for_region_or_calling_code(country_code, phone_number_region);
                }
                national_number
            }
            None => {
                // If no extracted country calling code, use the region supplied
                // instead. Note that the national number was already normalized
                // by maybe_extract_country_code.
                let Some(metadata) = region_metadata else {
                    return Err(ParseError::InvalidCountryCode.into());
                };
                phone_number.set_country_code(metadata.country_code());
                self.normalize(national_number)
            }
        };

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn.into());
        }

        if let Some(metadata) = region_metadata {
            if let Some((potential_national_number, carrier_code)) = self
                .maybe_strip_national_prefix_and_carrier_code(&normalized_national_number, metadata)?
            {
                // We require that the NSN remaining after stripping the national
                // prefix and carrier code be long enough to be a possible length
                // for the region. Otherwise, we don't do the stripping, since the
                // original number could be a valid short number.
                let validation_result =
                    test_number_length_with_unknown_type(&potential_national_number, metadata);
                if !matches!(
                    validation_result,
                    Err(ValidationError::TooShort)
                        | Err(ValidationError::InvalidLength)
                        | Ok(NumberLengthType::IsPossibleLocalOnly)
                ) {
                    if keep_raw_input {
                        if let Some(carrier_code) = carrier_code.filter(|code| !code.is_empty()) {
                            phone_number.set_preferred_domestic_carrier_code(carrier_code);
                        }
                    }
                    normalized_national_number = potential_national_number.into_owned();
                }
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn.into());
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            trace!("The string supplied is too long to be a phone number.");
            return Err(ParseError::TooLongNsn.into());
        }
        Self::set_italian_leading_zeros_for_phone_number(&normalized_national_number, &mut phone_number);
        let national_number = normalized_national_number
            .parse::<u64>()
            .map_err(NotANumberError::FailedToParseNumberAsInt)?;
        phone_number.set_national_number(national_number);
        Ok(phone_number)
    }

    /// Converts the number to the part that should be parsed: for RFC3966 input
    /// the global number prefix from the phone-context and the local part,
    /// otherwise the extracted possible number. The isdn-subaddress is dropped.
    fn build_national_number_for_parsing<'a>(
        &self,
        number_to_parse: &'a str,
    ) -> Result<Cow<'a, str>, ParseErrorInternal> {
        let mut national_number = if let Some(index_of_phone_context) =
            number_to_parse.find(RFC3966_PHONE_CONTEXT)
        {
            let phone_context = Self::extract_phone_context(number_to_parse, index_of_phone_context);
            if !self.is_phone_context_valid(phone_context) {
                trace!("The phone-context value '{}' is invalid.", phone_context);
                return Err(NotANumberError::InvalidPhoneContext.into());
            }

            // Now append everything between the "tel:" prefix and the
            // phone-context. This should include the national number, an
            // optional extension or isdn-subaddress component. Note we also
            // handle the case when "tel:" is missing, as we have seen in some of
            // the phone number inputs. In that case, we append everything from
            // the beginning.
            let index_of_national_number = number_to_parse
                .find(RFC3966_PREFIX)
                .map(|index| index + RFC3966_PREFIX.len())
                .filter(|index| *index <= index_of_phone_context)
                .unwrap_or(0);
            let local_part = &number_to_parse[index_of_national_number..index_of_phone_context];

            // If the phone context contains a phone number prefix, we need to
            // capture it, whereas domains will be ignored.
            if phone_context.starts_with(PLUS_SIGN) {
                Cow::Owned(fast_cat::concat_str!(phone_context, local_part))
            } else {
                Cow::Borrowed(local_part)
            }
        } else {
            // Extract a possible number from the string passed in (this strips
            // leading characters that could not be the start of a phone number.)
            Cow::Borrowed(
                self.extract_possible_number(number_to_parse)
                    .map_err(NotANumberError::FailedToExtractNumber)?,
            )
        };

        // Delete the isdn-subaddress and everything after it if it is present.
        // Note extension won't appear at the same time with isdn-subaddress
        // according to paragraph 5.3 of the RFC3966 spec.
        if let Some(index_of_isdn) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            if index_of_isdn > 0 {
                national_number = match national_number {
                    Cow::Borrowed(s) => Cow::Borrowed(&s[..index_of_isdn]),
                    Cow::Owned(mut s) => {
                        s.truncate(index_of_isdn);
                        Cow::Owned(s)
                    }
                };
            }
        }
        // If both phone context and isdn-subaddress are absent but other
        // parameters are present, the parameters are left in national_number.
        // This is because we are concerned about deleting content from a
        // potential number string when there is no strong evidence that the
        // number is actually written in RFC3966.
        Ok(national_number)
    }

    /// Extracts the value of the phone-context parameter, which starts after
    /// ";phone-context=" and runs to the next ';' or the end of input.
    fn extract_phone_context(number_to_extract_from: &str, index_of_phone_context: usize) -> &str {
        let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
        let phone_context = &number_to_extract_from[phone_context_start..];
        match phone_context.find(';') {
            Some(phone_context_end) => &phone_context[..phone_context_end],
            None => phone_context,
        }
    }

    /// Returns whether the value of phone-context follows the syntax defined in
    /// RFC3966.
    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        // Does phone-context value match pattern of global-number-digits or
        // domainname.
        self.reg_exps.rfc3966_global_number_digits_pattern.is_match(phone_context)
            || self.reg_exps.rfc3966_domainname_pattern.is_match(phone_context)
    }

    /// Checks to see that the region code used is valid, or if it is not valid,
    /// that the number to parse starts with a + symbol so that we can attempt to
    /// infer the country from the number.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        self.metadata.is_valid_region_code(default_region)
            || (!number_to_parse.is_empty()
                && self.reg_exps.plus_chars_pattern.matches_start(number_to_parse))
    }

    /// Strips any extension (as in, the part of the number dialled after the
    /// call is connected, usually indicated with extn, ext, x or similar) from
    /// the end of the number, and returns the number without it together with
    /// the extension.
    pub(super) fn maybe_strip_extension<'a>(&self, number: &'a str) -> (&'a str, Option<&'a str>) {
        let Some(captures) = self.reg_exps.extn_pattern.captures(number) else {
            return (number, None);
        };
        let Some(full_match) = captures.get(0) else {
            return (number, None);
        };
        let number_before_extension = &number[..full_match.start()];
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !self.is_viable_phone_number(number_before_extension) {
            return (number, None);
        }
        // The numbers are captured into groups in the regular expression.
        let extension = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .find(|group| !group.is_empty());
        match extension {
            Some(extension) => (number_before_extension, Some(extension)),
            None => (number, None),
        }
    }

    /// Tries to extract a country calling code from a number. Country calling
    /// codes are extracted in the following ways:
    ///  - by stripping the international dialing prefix of the region the
    ///    person is dialing from, if this is present in the number, and looking
    ///    at the next digits
    ///  - by stripping the '+' sign if present and then looking at the next
    ///    digits
    ///  - by comparing the start of the number and the country calling code of
    ///    the default region. If the number is not considered possible for the
    ///    numbering plan of the default region initially, but starts with the
    ///    country calling code of this region, validation will be reattempted
    ///    after stripping this country calling code. If this number is
    ///    considered a possible number, then the first digits will be considered
    ///    the country calling code and removed as such.
    ///
    /// Returns the country calling code with the normalized national number
    /// following it, or `None` when the number carries no country calling code.
    /// An error is returned if the number starts with a '+' or an international
    /// prefix but the country calling code supplied after this does not match
    /// that of any known region.
    pub(super) fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
        keep_raw_input: bool,
        phone_number: &mut PhoneNumber,
    ) -> Result<Option<(i32, String)>, ParseErrorInternal> {
        if number.is_empty() {
            return Ok(None);
        }
        // Set the default prefix to be something that will never match if there
        // is no default region.
        let possible_country_idd_prefix = default_region_metadata
            .map(|metadata| metadata.international_prefix())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(NON_MATCHING_IDD);

        let StrippedNumber {
            digits: full_number,
            source: country_code_source,
        } = self.maybe_strip_international_prefix_and_normalize(number, possible_country_idd_prefix)?;

        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        if country_code_source != CountryCodeSource::FROM_DEFAULT_COUNTRY {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                trace!("Phone number had an IDD, but after this was not long enough to be a viable phone number.");
                return Err(ParseError::TooShortAfterIdd.into());
            }
            let Some((potential_country_code, national_number)) =
                self.extract_country_code(&full_number)
            else {
                // If this fails, they must be using a strange country calling code
                // that we don't recognize, or that doesn't exist.
                return Err(ParseError::InvalidCountryCode.into());
            };
            phone_number.set_country_code(potential_country_code);
            return Ok(Some((potential_country_code, national_number.to_owned())));
        }

        if let Some(default_region_metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code for
            // the default region. If so, we remove the country calling code, and
            // do some checks on the validity of the number before and after.
            let default_country_code = default_region_metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) = full_number.strip_prefix(default_country_code_str) {
                let general_desc = &default_region_metadata.general_desc;
                let potential_national_number = self
                    .maybe_strip_national_prefix_and_carrier_code(
                        potential_national_number,
                        default_region_metadata,
                    )?
                    .map(|(stripped, _)| stripped)
                    .unwrap_or(Cow::Borrowed(potential_national_number));

                // If the number was not valid before but is valid now, or if it
                // was too long before, we consider the number with the country
                // calling code stripped to be a better result and keep that
                // instead.
                let was_matching = self
                    .matcher_api
                    .match_national_number(&full_number, general_desc, false);
                let is_matching = self
                    .matcher_api
                    .match_national_number(&potential_national_number, general_desc, false);
                let was_too_long = test_number_length_with_unknown_type(
                    &full_number,
                    default_region_metadata,
                ) == Err(ValidationError::TooLong);
                if (!was_matching && is_matching) || was_too_long {
                    if keep_raw_input {
                        phone_number.set_country_code_source(
                            CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN,
                        );
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok(Some((default_country_code, potential_national_number.into_owned())));
                }
            }
        }
        // No country calling code present.
        phone_number.set_country_code(0);
        Ok(None)
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    ///
    /// `possible_idd_prefix` represents the international direct dialing prefix
    /// from the region we think this number may be dialed in.
    fn maybe_strip_international_prefix_and_normalize<'a>(
        &self,
        number: &'a str,
        possible_idd_prefix: &str,
    ) -> Result<StrippedNumber<'a>, InvalidRegexError> {
        if number.is_empty() {
            return Ok(StrippedNumber::new(
                Cow::Borrowed(number),
                CountryCodeSource::FROM_DEFAULT_COUNTRY,
            ));
        }
        if let Some(after_plus) = self.reg_exps.plus_chars_pattern.consume_start(number) {
            return Ok(StrippedNumber::new(
                Cow::Owned(self.normalize(after_plus)),
                CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN,
            ));
        }
        // Attempt to parse the first digits as an international prefix.
        let idd_pattern = self.reg_exps.regexp_cache.get_regex(possible_idd_prefix)?;
        let normalized = self.normalize(number);
        Ok(match self.parse_prefix_as_idd(&idd_pattern, &normalized) {
            Some(after_idd) => StrippedNumber::new(
                Cow::Owned(after_idd.to_owned()),
                CountryCodeSource::FROM_NUMBER_WITH_IDD,
            ),
            None => StrippedNumber::new(
                Cow::Owned(normalized),
                CountryCodeSource::FROM_DEFAULT_COUNTRY,
            ),
        })
    }

    /// Strips the IDD from the start of the number if present. Returns the
    /// rest of the number if the IDD was stripped.
    fn parse_prefix_as_idd<'a>(&self, idd_pattern: &Regex, number: &'a str) -> Option<&'a str> {
        let rest = idd_pattern.consume_start(number)?;
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if let Some(first_digit) = self
            .reg_exps
            .capturing_digit_pattern
            .captures(rest)
            .and_then(|captures| captures.get(1))
        {
            if normalize_digits(first_digit.as_str(), false) == "0" {
                return None;
            }
        }
        Some(rest)
    }

    /// Extracts country calling code from full_number, returning it together
    /// with the rest of the number. It assumes that the leading plus sign or
    /// IDD has already been removed. Returns `None` if full_number doesn't start
    /// with a valid country calling code.
    fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        let max_length = MAX_LENGTH_COUNTRY_CODE.min(full_number.len());
        // Longest code first; country calling codes form a prefix-free set, so
        // this only matters for inconsistent metadata.
        (1..=max_length).rev().find_map(|length| {
            let potential_country_code = full_number.get(..length)?.parse::<i32>().ok()?;
            self.metadata
                .has_calling_code(potential_country_code)
                .then(|| (potential_country_code, &full_number[length..]))
        })
    }

    /// Strips any national prefix (such as 0, 1) present in the number
    /// provided. Returns the number with the prefix stripped (and the national
    /// prefix transform rule applied) together with the carrier code, or `None`
    /// if nothing was stripped.
    pub(super) fn maybe_strip_national_prefix_and_carrier_code<'a>(
        &self,
        number: &'a str,
        metadata: &PhoneMetadata,
    ) -> Result<Option<(Cow<'a, str>, Option<String>)>, InvalidRegexError> {
        let possible_national_prefix = if metadata.has_national_prefix_for_parsing() {
            metadata.national_prefix_for_parsing()
        } else {
            metadata.national_prefix()
        };
        if number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length or with no national prefix.
            return Ok(None);
        }

        // Attempt to parse the first digits as a national prefix.
        let prefix_pattern = self.reg_exps.regexp_cache.get_regex(possible_national_prefix)?;
        let Some(prefix_captures) = prefix_pattern.captures_start(number) else {
            return Ok(None);
        };
        let Some(prefix_match) = prefix_captures.get(0) else {
            return Ok(None);
        };

        let general_desc = &metadata.general_desc;
        // Check if the original number is viable.
        let is_viable_original_number =
            self.matcher_api.match_national_number(number, general_desc, false);
        // prefix_captures.get(num_of_groups) == None implies nothing was
        // captured by the capturing groups in possible_national_prefix;
        // therefore, no transformation is necessary, and we just remove the
        // national prefix.
        let num_of_groups = prefix_captures.len() - 1;
        let transform_rule = metadata.national_prefix_transform_rule();
        let last_group = prefix_captures.get(num_of_groups);
        let first_group = || prefix_captures.get(1).map(|group| group.as_str().to_owned());

        if transform_rule.is_empty() || last_group.is_none() {
            let stripped = &number[prefix_match.end()..];
            // If the original number was viable, and the resultant number is not,
            // we return.
            if is_viable_original_number
                && !self.matcher_api.match_national_number(stripped, general_desc, false)
            {
                return Ok(None);
            }
            let carrier_code = if num_of_groups > 0 && last_group.is_some() {
                first_group()
            } else {
                None
            };
            Ok(Some((Cow::Borrowed(stripped), carrier_code)))
        } else {
            // Check that the resultant number is still viable. If not, return.
            // Check this by copying the string and making the transformation on
            // the copy first.
            let mut transformed_number = String::with_capacity(number.len() + transform_rule.len());
            prefix_captures.expand(&braced_group_refs(transform_rule), &mut transformed_number);
            transformed_number.push_str(&number[prefix_match.end()..]);
            if is_viable_original_number
                && !self
                    .matcher_api
                    .match_national_number(&transformed_number, general_desc, false)
            {
                return Ok(None);
            }
            let carrier_code = if num_of_groups > 1 { first_group() } else { None };
            Ok(Some((Cow::Owned(transformed_number), carrier_code)))
        }
    }

    /// Normalizes a string of characters representing a phone number. This
    /// performs the following conversions:
    ///  - Punctuation is stripped.
    ///  - For ALPHA/VANITY numbers:
    ///    - Letters are converted to their numeric representation on a telephone
    ///      keypad. The keypad used here is the one defined in ITU
    ///      Recommendation E.161. This is only done if there are 3 or more
    ///      letters in the number, to lessen the risk that such letters are
    ///      typos.
    ///  - For other numbers:
    ///    - Wide-ascii digits are converted to normal ASCII (European) digits.
    ///    - Arabic-Indic numerals are converted to European numerals.
    ///    - Spurious alpha characters are stripped.
    pub(super) fn normalize(&self, phone_number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, phone_number)
        } else {
            normalize_digits(phone_number, false)
        }
    }

    /// A helper function to set the values related to leading zeros in a
    /// PhoneNumber.
    fn set_italian_leading_zeros_for_phone_number(
        national_number: &str,
        phone_number: &mut PhoneNumber,
    ) {
        if national_number.len() > 1 && national_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
            // Note that if the national number is all "0"s, the last "0" is not
            // counted as a leading zero.
            let number_of_leading_zeros = national_number[..national_number.len() - 1]
                .bytes()
                .take_while(|byte| *byte == b'0')
                .count();
            if number_of_leading_zeros != 1 {
                phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
            }
        }
    }
}

/// Converts every Unicode decimal digit to its ASCII form. Other characters are
/// either kept or dropped.
pub(super) fn normalize_digits(phone_number: &str, keep_non_digits: bool) -> String {
    let mut normalized = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        match phone_char
            .to_decimal_utf8()
            .and_then(|digit| char::from_digit(digit as u32, 10))
        {
            Some(digit) => normalized.push(digit),
            None if keep_non_digits => normalized.push(phone_char),
            None => {}
        }
    }
    normalized
}
