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

use super::PhoneNumberUtil;
use crate::{
    errors::{AmbiguousRegionError, AmbiguousRegionErrorInternal},
    phonenumber::PhoneNumber,
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
    PhoneNumberType,
};

impl PhoneNumberUtil {
    /// Returns the region where a phone number is from. This could be used for
    /// geocoding at the region level. Only guarantees correct results for valid,
    /// full numbers (not short-codes, or invalid numbers).
    ///
    /// When several regions share the country calling code and none of them
    /// claims the number, the main region for the code is returned. An error is
    /// returned only when no region uses the country calling code.
    pub fn get_region_code_for_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<&str, AmbiguousRegionError> {
        self.get_region_code_for_number_internal(phone_number)
            .map_err(|err| err.into_public())
    }

    fn get_region_code_for_number_internal(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<&str, AmbiguousRegionErrorInternal> {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.metadata.region_codes_for_calling_code(country_calling_code);
        match region_codes.as_slice() {
            [] => {
                trace!("Missing/invalid country calling code ({})", country_calling_code);
                Err(AmbiguousRegionError(country_calling_code).into())
            }
            [region_code] => Ok(*region_code),
            _ => Ok(self.get_region_code_for_number_from_region_list(phone_number, &region_codes)?),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &[&'b str],
    ) -> Result<&'b str, InvalidRegexError> {
        let national_number = Self::get_national_significant_number(phone_number);
        // Regions with leading digits claim numbers by prefix alone.
        for code in region_codes {
            let Some(metadata) = self.metadata.metadata_for_region(code) else {
                continue;
            };
            if metadata.has_leading_digits()
                && self
                    .reg_exps
                    .regexp_cache
                    .get_regex(metadata.leading_digits())?
                    .matches_start(&national_number)
            {
                return Ok(*code);
            }
        }
        for code in region_codes {
            let Some(metadata) = self.metadata.metadata_for_region(code) else {
                continue;
            };
            if !metadata.has_leading_digits()
                && self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown
            {
                return Ok(*code);
            }
        }
        trace!(
            "No region claims number '{}', falling back to the main region",
            national_number
        );
        Ok(region_codes[0])
    }

    /// Returns the region code that matches the specific country calling code.
    /// In the case of no region code being found, "ZZ" will be returned. In the
    /// case of multiple regions, the one designated in the metadata as the
    /// "main" region for this calling code will be returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.metadata.region_code_for_calling_code(country_calling_code)
    }

    /// Returns a list with the region codes that match the specific country
    /// calling code, main region first. For non-geographical country calling
    /// codes, the region code 001 is returned. Also, in the case of no region
    /// code being found, an empty list is returned.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> Vec<&str> {
        self.metadata.region_codes_for_calling_code(country_calling_code)
    }

    /// Returns the country calling code for a specific region. For example,
    /// this would be 1 for the United States, and 64 for New Zealand. Returns 0
    /// for unknown regions.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        self.metadata.calling_code_for_region(region_code)
    }
}
