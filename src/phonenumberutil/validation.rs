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

use log::trace;

use super::{
    helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY, helper_functions::test_number_length,
    PhoneNumberType, PhoneNumberUtil, ValidationResult,
};
use crate::{errors::ValidationError, phonenumber::PhoneNumber};

impl PhoneNumberUtil {
    /// Convenience wrapper around [`PhoneNumberUtil::is_possible_number_with_reason`].
    /// Instead of returning the reason for failure, this method returns true if
    /// the number is either a possible fully-qualified number (containing the
    /// area code and country code), or if the number could be a possible local
    /// number (with a country code, but missing an area code). Local numbers are
    /// considered possible if they could be possibly dialled in this format: if
    /// the area code is needed for a call to connect, the number is not
    /// considered possible without it.
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Convenience wrapper around
    /// [`PhoneNumberUtil::is_possible_number_for_type_with_reason`].
    pub fn is_possible_number_for_type(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> bool {
        self.is_possible_number_for_type_with_reason(phone_number, phone_number_type)
            .is_ok()
    }

    /// Checks whether a phone number is a possible number. It provides a more
    /// lenient check than [`PhoneNumberUtil::is_valid_number`] in the following
    /// sense:
    ///   1. It only checks the length of phone numbers. In particular, it
    ///      doesn't check starting digits of the number.
    ///   2. For some numbers (particularly fixed-line), many regions have the
    ///      concept of area code, which together with subscriber number
    ///      constitute the national significant number. It is sometimes okay to
    ///      dial only the subscriber number when dialing in the same area. This
    ///      function will return `IsPossibleLocalOnly` if the subscriber-number-only
    ///      version is passed in. On the other hand, because is_valid_number
    ///      validates using information on both starting digits (for fixed line
    ///      numbers, that would most likely be area codes) and length (obviously
    ///      includes the length of area codes for fixed line numbers), it will
    ///      return false for the subscriber-number-only version.
    pub fn is_possible_number_with_reason(&self, phone_number: &PhoneNumber) -> ValidationResult {
        self.is_possible_number_for_type_with_reason(phone_number, PhoneNumberType::Unknown)
    }

    /// Same as [`PhoneNumberUtil::is_possible_number_with_reason`], but for a
    /// specific type. For example, "0123456" is possible as a local fixed-line
    /// number but may be too short for a mobile one. If a type is not supported
    /// by the number's region at all, `InvalidLength` is returned.
    pub fn is_possible_number_for_type_with_reason(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> ValidationResult {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: For regions that share a country calling code, like NANPA
        // numbers, we just use the rules from the default region (US in this
        // case) since the get_region_code_for_number will not work if the number
        // is possible but not valid. This is handled by putting all possible
        // lengths for any region with this country calling code in the metadata
        // for the default region.
        if !self.metadata.has_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.metadata.region_code_for_calling_code(country_code);
        // Metadata cannot be None because the country calling code is valid.
        let Some(metadata) = self
            .metadata
            .metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length(&national_number, metadata, phone_number_type)
    }

    /// Tests whether a phone number matches a valid pattern. Note this doesn't
    /// verify the number is actually in use, which is impossible to tell by
    /// just looking at a number itself. It only verifies whether the parsed,
    /// canonicalised number is valid: not whether a particular series of digits
    /// entered by the user is diallable from the region provided when parsing.
    /// For example, the number +41 (0) 78 927 2696 can be parsed into a number
    /// with country code "41" and national significant number "789272696". This
    /// is valid, while the original string is not diallable.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        match self.get_region_code_for_number(phone_number) {
            Ok(region_code) => self.is_valid_number_for_region(phone_number, region_code),
            Err(err) => {
                trace!("Number is not valid: {}", err);
                false
            }
        }
    }

    /// Tests whether a phone number is valid for a certain region. Note this
    /// doesn't verify the number is actually in use, which is impossible to
    /// tell by just looking at a number itself. If the country calling code is
    /// not the same as the country calling code for the region, this
    /// immediately exits with false. After this, the specific number pattern
    /// rules for the region are examined. This is useful for determining for
    /// example whether a particular number is valid for Canada, rather than
    /// just a valid NANPA number.
    ///
    /// Warning: In most cases, you want to use
    /// [`PhoneNumberUtil::is_valid_number`] instead. For example, this method
    /// will mark numbers from British Crown dependencies such as the Isle of
    /// Man as invalid for the region "GB" (United Kingdom), since it has its
    /// own region code, "IM", which may be undesirable.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self
            .metadata
            .metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if region_code != REGION_CODE_FOR_NON_GEO_ENTITY && country_code != metadata.country_code() {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata) != PhoneNumberType::Unknown
    }
}
