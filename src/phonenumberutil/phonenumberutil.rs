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

use std::collections::HashSet;

use log::{trace, warn};

use super::{
    helper_functions::{self, get_supported_types_for_metadata},
    metadata_store::MetadataStore,
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
    PhoneNumberType,
};
use crate::{
    errors::MetadataError,
    interfaces::MatcherApi,
    phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    phonenumber::PhoneNumber,
    regex_based_matcher::RegexBasedMatcher,
};

/// Types checked before fixed line and mobile, in order.
const SPECIAL_RATE_TYPES: [PhoneNumberType; 8] = [
    PhoneNumberType::PremiumRate,
    PhoneNumberType::TollFree,
    PhoneNumberType::SharedCost,
    PhoneNumberType::VoIP,
    PhoneNumberType::PersonalNumber,
    PhoneNumberType::Pager,
    PhoneNumberType::UAN,
    PhoneNumberType::VoiceMail,
];

/// Entry point of the library: parses, validates, formats phone numbers and
/// infers their regions.
///
/// The util owns its metadata and is immutable after construction, so a
/// single instance can be shared by reference (or behind an `Arc`) between
/// any number of threads.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    pub(super) matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(super) reg_exps: PhoneNumberRegExpsAndMappings,

    /// Per-region and per-calling-code metadata.
    pub(super) metadata: MetadataStore,
}

impl PhoneNumberUtil {
    /// Builds a util over the metadata compiled into the crate.
    pub fn new() -> Result<Self, MetadataError> {
        Ok(Self::new_for_metadata_store(MetadataStore::load_compiled()?))
    }

    /// Builds a util over custom metadata, e.g. a reduced test set.
    pub fn new_for_metadata(collection: PhoneMetadataCollection) -> Result<Self, MetadataError> {
        Ok(Self::new_for_metadata_store(MetadataStore::from_collection(collection)?))
    }

    pub fn new_for_metadata_store(metadata: MetadataStore) -> Self {
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new()),
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            metadata,
        }
    }

    pub fn metadata_store(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Returns all regions the library has metadata for, sorted.
    pub fn get_supported_regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self.metadata.supported_regions().collect();
        regions.sort_unstable();
        regions
    }

    /// Returns all global network calling codes the library has metadata for.
    pub fn get_supported_global_network_calling_codes(&self) -> HashSet<i32> {
        self.metadata.supported_global_network_calling_codes().collect()
    }

    /// Returns all country calling codes the library has metadata for, covering
    /// both non-geographical entities (global network calling codes) and those
    /// used for geographical entities.
    pub fn get_supported_calling_codes(&self) -> HashSet<i32> {
        self.metadata.supported_calling_codes().collect()
    }

    /// Returns the types for a given region which the library has metadata for.
    /// Will not include FixedLineOrMobile (if numbers for this non-geographical
    /// entity could be classified as FixedLineOrMobile, both FixedLine and
    /// Mobile would be present) and Unknown.
    ///
    /// Returns `None` for regions without metadata.
    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.metadata.metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code provided: {}", region_code);
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    /// Same as [`Self::get_supported_types_for_region`] for a non-geographical
    /// entity.
    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.metadata.metadata_for_non_geo_entity(country_calling_code) else {
            warn!("Unknown country calling code for a non-geographical entity provided: {}", country_calling_code);
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    pub fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.metadata.metadata_for_region(region_code)
    }

    pub fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<&PhoneMetadata> {
        self.metadata.metadata_for_non_geo_entity(country_calling_code)
    }

    /// Checks if this is a region under the North American Numbering Plan
    /// Administration (NANPA).
    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.metadata.is_nanpa_region(region_code)
    }

    /// Returns the national dialling prefix for a specific region. For example,
    /// this would be 1 for the United States, and 0 for New Zealand. Set
    /// strip_non_digits to true to strip symbols like "~" (which indicates a wait
    /// for a dialling tone) from the prefix returned. If no national prefix is
    /// present, we return an empty string.
    ///
    /// Returns `None` for regions without metadata.
    pub fn get_ndd_prefix_for_region(
        &self,
        region_code: &str,
        strip_non_digits: bool,
    ) -> Option<String> {
        let Some(metadata) = self.metadata.metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return None;
        };
        let prefix = metadata.national_prefix();
        Some(if strip_non_digits {
            prefix.replace('~', "")
        } else {
            prefix.to_owned()
        })
    }

    /// Gets the national significant number of a phone number. Note a national
    /// significant number doesn't contain a national prefix or any formatting.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix. Ensure the number of leading zeros is at least 0 so we
        // don't crash in the case of malicious input.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(phone_number.number_of_leading_zeros().max(0) as usize)
        } else {
            String::new()
        };

        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        fast_cat::concat_str!(&zeros_start, national_number)
    }

    /// Gets the type of a valid phone number. `Unknown` is returned for
    /// invalid numbers and numbers whose region can't be determined.
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let Ok(region_code) = self.get_region_code_for_number(phone_number) else {
            return PhoneNumberType::Unknown;
        };
        let Some(metadata) = self
            .metadata
            .metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
    }

    /// Classifies a national significant number against the descriptions of
    /// `metadata`. The special-rate types win over fixed-line and mobile, and a
    /// number matching both of those is `FixedLineOrMobile`.
    pub(super) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        let matches = |number_type| {
            self.is_number_matching_desc(
                national_number,
                helper_functions::get_number_desc_by_type(metadata, number_type),
            )
        };
        if !matches(PhoneNumberType::Unknown) {
            trace!("'{national_number}' is outside the general pattern of {}", metadata.id());
            return PhoneNumberType::Unknown;
        }
        if let Some(special) = SPECIAL_RATE_TYPES.into_iter().find(|t| matches(*t)) {
            trace!("'{national_number}' classified as {special:?}");
            return special;
        }

        let shared_pattern = metadata.same_mobile_and_fixed_line_pattern();
        let number_type = match (matches(PhoneNumberType::FixedLine), shared_pattern) {
            (true, true) => PhoneNumberType::FixedLineOrMobile,
            (true, false) if matches(PhoneNumberType::Mobile) => PhoneNumberType::FixedLineOrMobile,
            (true, false) => PhoneNumberType::FixedLine,
            // A shared pattern that missed as fixed line misses as mobile too.
            (false, false) if matches(PhoneNumberType::Mobile) => PhoneNumberType::Mobile,
            (false, _) => PhoneNumberType::Unknown,
        };
        trace!("'{national_number}' classified as {number_type:?}");
        number_type
    }

    pub(super) fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc,
    ) -> bool {
        // Lengths are checked first to skip the regex. A description without
        // lengths inherits those of the general description.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&actual_length)
        {
            return false;
        }
        helper_functions::is_match(&*self.matcher_api, national_number, number_desc)
    }
}
