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

use log::{trace, warn};

use super::{
    helper_constants::PLUS_SIGN, helper_functions::get_number_desc_by_type, PhoneNumberType,
    PhoneNumberUtil,
};
use crate::{
    errors::GetExampleNumberError,
    i18n::RegionCode,
    phonemetadata::{PhoneMetadata, PhoneNumberDesc},
    phonenumber::PhoneNumber,
};

impl PhoneNumberUtil {
    /// Gets a valid fixed-line number for the specified region. Returns an
    /// error if the region was unknown, or the region 001 is passed in. For 001
    /// (representing non-geographical numbers), call
    /// [`PhoneNumberUtil::get_example_number_for_non_geo_entity`] instead.
    pub fn get_example_number(&self, region_code: &str) -> Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type_and_region_code(region_code, PhoneNumberType::FixedLine)
    }

    /// Gets a valid number for the specified region and number type.
    pub fn get_example_number_for_type_and_region_code(
        &self,
        region_code: &str,
        phone_number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.metadata.metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        let desc = get_number_desc_by_type(metadata, phone_number_type);
        if !desc.has_example_number() {
            return Err(GetExampleNumberError::NoExampleNumber);
        }
        Ok(self.parse(desc.example_number(), region_code)?)
    }

    /// Gets a valid number for the specified number type (it may belong to any
    /// region). Regions are searched in alphabetical order first, then the
    /// non-geographical entities by ascending calling code.
    pub fn get_example_number_for_type(
        &self,
        phone_number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        for region_code in self.get_supported_regions() {
            match self.get_example_number_for_type_and_region_code(region_code, phone_number_type) {
                Ok(example_number) => return Ok(example_number),
                Err(err) => trace!("No {:?} example for {}: {}", phone_number_type, region_code, err),
            }
        }
        // If there wasn't an example number for a region, try the non-geographical
        // entities.
        let mut calling_codes: Vec<i32> =
            self.get_supported_global_network_calling_codes().into_iter().collect();
        calling_codes.sort_unstable();
        for country_calling_code in calling_codes {
            let Some(metadata) = self.metadata.metadata_for_non_geo_entity(country_calling_code) else {
                continue;
            };
            let desc = get_number_desc_by_type(metadata, phone_number_type);
            if desc.has_example_number() {
                return self.parse_non_geo_example(country_calling_code, desc.example_number());
            }
        }
        // There are no example numbers of this type for any country in the
        // library.
        Err(GetExampleNumberError::NoExampleNumber)
    }

    /// Gets a valid number for the specified country calling code for a
    /// non-geographical entity.
    pub fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.metadata.metadata_for_non_geo_entity(country_calling_code) else {
            warn!("Invalid or unknown country calling code provided: {}", country_calling_code);
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        // For geographical entities, fixed-line data is always present. However,
        // for non-geographical entities, this is not the case, so we have to go
        // through different types to find the example number.
        let desc_with_example = non_geo_example_descs(metadata)
            .into_iter()
            .find(|desc| desc.has_example_number());
        match desc_with_example {
            Some(desc) => self.parse_non_geo_example(country_calling_code, desc.example_number()),
            None => Err(GetExampleNumberError::NoExampleNumber),
        }
    }

    fn parse_non_geo_example(
        &self,
        country_calling_code: i32,
        example_number: &str,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let mut buf = itoa::Buffer::new();
        let number = fast_cat::concat_str!(PLUS_SIGN, buf.format(country_calling_code), example_number);
        Ok(self.parse(&number, RegionCode::get_unknown())?)
    }
}

/// Types searched for a non-geographical example, in order.
fn non_geo_example_descs(metadata: &PhoneMetadata) -> [&PhoneNumberDesc; 7] {
    [
        &*metadata.mobile,
        &*metadata.toll_free,
        &*metadata.shared_cost,
        &*metadata.voip,
        &*metadata.voicemail,
        &*metadata.uan,
        &*metadata.premium_rate,
    ]
}
