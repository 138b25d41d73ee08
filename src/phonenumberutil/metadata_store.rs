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

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, error, warn};
use strum::IntoEnumIterator;

use crate::{
    errors::{MetadataError, NotFoundError},
    i18n,
    regex_util::anchored,
    phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    PhoneNumberType,
};

use super::{
    helper_constants::{METADATA, NANPA_COUNTRY_CODE, REGION_CODE_FOR_NON_GEO_ENTITY},
    helper_functions::get_number_desc_by_type,
};

/// Immutable, indexed dialing-plan data.
///
/// Built once from a [`PhoneMetadataCollection`], either the compiled-in one or
/// one supplied by the caller. Construction validates every entry, so a store
/// that exists never holds an entry without a general description or with a
/// pattern that does not compile.
#[derive(Debug)]
pub struct MetadataStore {
    /// A mapping from a country calling code to the region codes which denote
    /// the regions represented by that country calling code. Note regions under
    /// NANPA share the country calling code 1 and Russia and Kazakhstan share the
    /// country calling code 7. The main country for the code is always first.
    /// This is implemented as a sorted vector to achieve better performance.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,

    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,
}

impl MetadataStore {
    /// Loads the dialing plans compiled into the library.
    pub fn load_compiled() -> Result<Self, MetadataError> {
        Self::from_text_format(METADATA).map_err(|err| {
            error!("Could not parse compiled-in metadata: {}", err);
            err
        })
    }

    /// Loads a [`PhoneMetadataCollection`] written in protobuf text format.
    pub fn from_text_format(text: &str) -> Result<Self, MetadataError> {
        let collection = protobuf::text_format::parse_from_str::<PhoneMetadataCollection>(text)
            .map_err(|err| MetadataError::CorruptMetadata(format!("{:?}", err)))?;
        Self::from_collection(collection)
    }

    pub fn from_collection(collection: PhoneMetadataCollection) -> Result<Self, MetadataError> {
        let mut instance = Self {
            country_calling_code_to_region_code_map: Default::default(),
            nanpa_regions: Default::default(),
            region_to_metadata_map: Default::default(),
            country_code_to_non_geographical_metadata_map: Default::default(),
        };
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        for metadata in collection.metadata {
            validate_metadata(&metadata)?;

            let region_code = metadata.id().to_owned();
            let country_calling_code = metadata.country_code();
            let main_country_code = metadata.main_country_for_code();

            if i18n::RegionCode::get_non_geo_entity() == region_code {
                if instance
                    .country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata)
                    .is_some()
                {
                    return Err(MetadataError::CorruptMetadata(format!(
                        "duplicate non-geographical entity for +{}", country_calling_code
                    )));
                }
            } else {
                if i18n::RegionCode::get_unknown() == region_code {
                    return Err(MetadataError::CorruptMetadata(format!(
                        "region code {} is reserved", region_code
                    )));
                }
                if instance
                    .region_to_metadata_map
                    .insert(region_code.clone(), metadata)
                    .is_some()
                {
                    return Err(MetadataError::CorruptMetadata(format!(
                        "duplicate region {}", region_code
                    )));
                }
            }

            let regions = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_code {
                regions.push_front(region_code.clone());
            } else {
                regions.push_back(region_code.clone());
            }
            if country_calling_code == NANPA_COUNTRY_CODE {
                instance.nanpa_regions.insert(region_code);
            }
        }

        instance.country_calling_code_to_region_code_map.extend(
            country_calling_code_to_region_map.into_iter().map(| (k, v) | {
                (k, Vec::from(v))
            })
        );
        // Sort all the pairs in ascending order according to country calling code.
        instance
            .country_calling_code_to_region_code_map
            .sort_by_key(|(a, _)| *a);
        debug!(
            "Loaded metadata for {} regions and {} non-geographical entities",
            instance.region_to_metadata_map.len(),
            instance.country_code_to_non_geographical_metadata_map.len()
        );
        Ok(instance)
    }

    /// Returns the metadata of a geographical region.
    pub fn lookup_by_region(&self, region_code: &str) -> Result<&PhoneMetadata, NotFoundError> {
        self.region_to_metadata_map
            .get(region_code)
            .ok_or_else(|| NotFoundError::Region(region_code.to_owned()))
    }

    /// Returns all metadata sharing a country calling code, main region first.
    /// For a non-geographical entity this is its single entry.
    pub fn lookup_by_calling_code(
        &self,
        country_calling_code: i32,
    ) -> Result<Vec<&PhoneMetadata>, NotFoundError> {
        let entries = self
            .region_codes_for_calling_code(country_calling_code)
            .into_iter()
            .filter_map(|region_code| {
                self.metadata_for_region_or_calling_code(country_calling_code, region_code)
            })
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return Err(NotFoundError::CallingCode(country_calling_code));
        }
        Ok(entries)
    }

    pub fn metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    pub fn metadata_for_non_geo_entity(&self, country_calling_code: i32) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
    }

    pub fn metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.metadata_for_non_geo_entity(country_calling_code)
        } else {
            self.metadata_for_region(region_code)
        }
    }

    /// Returns the region codes that match the specific country calling code,
    /// main region first. Empty when the code is unknown.
    pub fn region_codes_for_calling_code(&self, country_calling_code: i32) -> Vec<&str> {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| {
                self.country_calling_code_to_region_code_map[index]
                    .1
                    .iter()
                    .map(|v| v.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the main region code for the country calling code, or the
    /// unknown region "ZZ".
    pub fn region_code_for_calling_code(&self, country_calling_code: i32) -> &str {
        self.region_codes_for_calling_code(country_calling_code)
            .first()
            .copied()
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    /// Returns the country calling code of a geographical region, or 0 if the
    /// region is unknown.
    pub fn calling_code_for_region(&self, region_code: &str) -> i32 {
        match self.region_to_metadata_map.get(region_code) {
            Some(metadata) => metadata.country_code(),
            None => {
                warn!("Invalid or missing region code ({}) provided.", region_code);
                0
            }
        }
    }

    pub fn has_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(k, _)| *k)
            .is_ok()
    }

    pub fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    pub fn is_nanpa_region(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    pub fn supported_regions(&self) -> impl Iterator<Item = &str> {
        self.region_to_metadata_map.keys().map(|k| k.as_str())
    }

    pub fn supported_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_calling_code_to_region_code_map.iter().map(|(k, _)| *k)
    }

    pub fn supported_global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_code_to_non_geographical_metadata_map.keys().copied()
    }
}

fn corrupt(metadata: &PhoneMetadata, reason: impl std::fmt::Display) -> MetadataError {
    MetadataError::CorruptMetadata(format!("{} (+{}): {}", metadata.id(), metadata.country_code(), reason))
}

fn check_pattern(metadata: &PhoneMetadata, field: &str, pattern: &str) -> Result<(), MetadataError> {
    regex::Regex::new(pattern)
        .map(|_| ())
        .map_err(|err| corrupt(metadata, format_args!("{} is not a valid pattern: {}", field, err)))
}

/// Patterns matched against a whole number must also compile in their
/// anchored form, the one the matcher and the formatter use.
fn check_full_match_pattern(metadata: &PhoneMetadata, field: &str, pattern: &str) -> Result<(), MetadataError> {
    check_pattern(metadata, field, pattern)?;
    regex::Regex::new(&anchored(pattern))
        .map(|_| ())
        .map_err(|err| corrupt(metadata, format_args!("{} does not anchor: {}", field, err)))
}

fn check_desc(metadata: &PhoneMetadata, field: &str, desc: &PhoneNumberDesc) -> Result<(), MetadataError> {
    if desc.has_national_number_pattern() {
        check_full_match_pattern(metadata, field, desc.national_number_pattern())?;
    }
    if desc.possible_length.iter().any(|len| *len <= 0) {
        return Err(corrupt(metadata, format_args!("{} has a non-positive possible length", field)));
    }
    if desc.possible_length_local_only.iter().any(|len| desc.possible_length.contains(len)) {
        return Err(corrupt(metadata, format_args!("{} has overlapping local-only lengths", field)));
    }
    Ok(())
}

/// Checks an entry before it is indexed. A store is all or nothing: one bad
/// entry rejects the whole collection.
fn validate_metadata(metadata: &PhoneMetadata) -> Result<(), MetadataError> {
    if metadata.id().is_empty() {
        return Err(corrupt(metadata, "missing region id"));
    }
    if metadata.country_code() <= 0 {
        return Err(corrupt(metadata, "missing country calling code"));
    }
    let general_desc = &metadata.general_desc;
    if !general_desc.has_national_number_pattern() || general_desc.possible_length.is_empty() {
        return Err(corrupt(metadata, "general description needs a pattern and possible lengths"));
    }
    for number_type in PhoneNumberType::iter() {
        let field: &'static str = number_type.into();
        check_desc(metadata, field, get_number_desc_by_type(metadata, number_type))?;
    }
    check_desc(metadata, "no_international_dialling", &metadata.no_international_dialling)?;

    let optional_patterns = [
        ("international_prefix", metadata.international_prefix()),
        ("national_prefix_for_parsing", metadata.national_prefix_for_parsing()),
        ("leading_digits", metadata.leading_digits()),
    ];
    for (field, pattern) in optional_patterns {
        if !pattern.is_empty() {
            check_pattern(metadata, field, pattern)?;
        }
    }
    for format in metadata.number_format.iter().chain(metadata.intl_number_format.iter()) {
        check_full_match_pattern(metadata, "number_format.pattern", format.pattern())?;
        for leading_digits in &format.leading_digits_pattern {
            check_pattern(metadata, "number_format.leading_digits_pattern", leading_digits)?;
        }
    }
    Ok(())
}
