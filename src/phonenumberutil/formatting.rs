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

use regex::NoExpand;

use super::{
    helper_constants::{DEFAULT_EXTN_PREFIX, RFC3966_EXTN_PREFIX},
    helper_functions::join_formatted_parts,
    PhoneNumberFormat, PhoneNumberUtil,
};
use crate::{
    errors::InternalLogicError,
    macros::owned_from_cow_or,
    phonemetadata::{NumberFormat, PhoneMetadata},
    phonenumber::PhoneNumber,
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
    string_util::braced_group_refs,
};

type Result<T> = std::result::Result<T, InternalLogicError>;

impl PhoneNumberUtil {
    /// Formats a phone number in the specified format using default rules.
    ///
    /// * E164 is the canonical form: `+<code><nsn>`, extensions dropped.
    /// * INTERNATIONAL and NATIONAL group the digits with the first matching
    ///   format of the number's main region. NATIONAL adds the national prefix
    ///   where the region's rules ask for it.
    /// * RFC3966 is the `tel:` URI with `-` between groups.
    ///
    /// Numbers whose country calling code is unknown come back as the bare
    /// national significant number, except in E164 where the code is always
    /// prefixed. A number that failed to parse but kept its raw input is
    /// formatted as that raw input.
    pub fn format<'b>(
        &self,
        phone_number: &'b PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>> {
        if phone_number.national_number() == 0 && !phone_number.raw_input().is_empty() {
            return Ok(Cow::Borrowed(phone_number.raw_input()));
        }
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);

        if number_format == PhoneNumberFormat::E164 {
            return Ok(Cow::Owned(join_formatted_parts(
                country_calling_code,
                number_format,
                &national_significant_number,
                ("", ""),
            )));
        }
        let Some(metadata) = self.formatting_metadata(country_calling_code) else {
            return Ok(Cow::Owned(national_significant_number));
        };
        let national_part = owned_from_cow_or!(
            self.format_nsn(&national_significant_number, metadata, number_format, "")?,
            national_significant_number
        );
        Ok(Cow::Owned(join_formatted_parts(
            country_calling_code,
            number_format,
            &national_part,
            extension_parts(phone_number, metadata, number_format),
        )))
    }

    /// Formats a phone number using caller-supplied formats instead of the
    /// region's own. National prefix rules of the formats may use `$NP` for
    /// the national prefix and `$FG` for the first group; the rule is ignored
    /// for regions that have no national prefix.
    ///
    /// Numbers with an unknown country calling code are returned as the bare
    /// national significant number.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> Result<String> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let Some(metadata) = self.formatting_metadata(country_calling_code) else {
            return Ok(national_significant_number);
        };

        let national_part = match self
            .choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number)?
        {
            Some(user_format) => {
                let resolved = resolve_user_prefix_rule(user_format, metadata.national_prefix());
                Cow::Owned(self.format_nsn_using_pattern(
                    &national_significant_number,
                    &resolved,
                    number_format,
                    "",
                )?)
            }
            None => Cow::Borrowed(national_significant_number.as_str()),
        };
        Ok(join_formatted_parts(
            country_calling_code,
            number_format,
            &national_part,
            extension_parts(phone_number, metadata, number_format),
        ))
    }

    /// Formats a phone number in NATIONAL format for dialing through the
    /// given carrier. The carrier code is always used, even when the number
    /// has a preferred domestic carrier code of its own. An empty carrier code
    /// gives the plain NATIONAL format, as does a region without carrier
    /// formatting rules.
    pub fn format_national_number_with_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        carrier_code: &str,
    ) -> Result<String> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let Some(metadata) = self.formatting_metadata(country_calling_code) else {
            return Ok(national_significant_number);
        };
        let national_part = owned_from_cow_or!(
            self.format_nsn(
                &national_significant_number,
                metadata,
                PhoneNumberFormat::National,
                carrier_code,
            )?,
            national_significant_number
        );
        Ok(join_formatted_parts(
            country_calling_code,
            PhoneNumberFormat::National,
            &national_part,
            extension_parts(phone_number, metadata, PhoneNumberFormat::National),
        ))
    }

    /// Same as [`Self::format_national_number_with_carrier_code`] with the
    /// number's own preferred domestic carrier code, or `fallback_carrier_code`
    /// when it has none.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> Result<String> {
        let preferred = phone_number.preferred_domestic_carrier_code();
        let carrier_code = if preferred.is_empty() { fallback_carrier_code } else { preferred };
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Metadata holding the formats of a calling code. Regions sharing a code
    /// are all formatted by the main one (US for NANPA, RU for +7).
    fn formatting_metadata(&self, country_calling_code: i32) -> Option<&PhoneMetadata> {
        let region_code = self.metadata.region_code_for_calling_code(country_calling_code);
        self.metadata
            .metadata_for_region_or_calling_code(country_calling_code, region_code)
    }

    /// Groups a national significant number. Borrowed when no format matches.
    fn format_nsn<'b>(
        &self,
        national_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> std::result::Result<Cow<'b, str>, InvalidRegexError> {
        let available_formats = if number_format != PhoneNumberFormat::National
            && !metadata.intl_number_format.is_empty()
        {
            &metadata.intl_number_format
        } else {
            &metadata.number_format
        };
        match self.choose_formatting_pattern_for_number(available_formats, national_number)? {
            Some(formatting_pattern) => Ok(Cow::Owned(self.format_nsn_using_pattern(
                national_number,
                formatting_pattern,
                number_format,
                carrier_code,
            )?)),
            None => Ok(Cow::Borrowed(national_number)),
        }
    }

    fn choose_formatting_pattern_for_number<'f>(
        &self,
        available_formats: &'f [NumberFormat],
        national_number: &str,
    ) -> std::result::Result<Option<&'f NumberFormat>, InvalidRegexError> {
        let cache = &self.reg_exps.regexp_cache;
        for format in available_formats {
            // The last leading digits pattern is the most detailed one.
            let leading_digits_match = match format.leading_digits_pattern.last() {
                Some(leading_digits) => cache.get_regex(leading_digits)?.matches_start(national_number),
                None => true,
            };
            if leading_digits_match
                && cache.get_full_match_regex(format.pattern())?.is_match(national_number)
            {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    fn format_nsn_using_pattern(
        &self,
        national_number: &str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> std::result::Result<String, InvalidRegexError> {
        let format_rule = formatting_pattern.format();
        // The first "$N" of the format is wrapped by the prefix rule. Group
        // references inside the rule re-emit the matched "$N" text, so they
        // are still group references afterwards.
        let format_rule = match self.first_group_rule(formatting_pattern, number_format, carrier_code) {
            Some(first_group_rule) => self
                .reg_exps
                .first_group_capturing_pattern
                .replace(format_rule, &*first_group_rule),
            None => Cow::Borrowed(format_rule),
        };
        let formatted = self
            .reg_exps
            .regexp_cache
            .get_full_match_regex(formatting_pattern.pattern())?
            .replace(national_number, braced_group_refs(&format_rule))
            .into_owned();
        if number_format != PhoneNumberFormat::RFC3966 {
            return Ok(formatted);
        }
        // Leading punctuation is dropped, every other separator becomes "-".
        let separator_pattern = &self.reg_exps.separator_pattern;
        let trimmed = separator_pattern.consume_start(&formatted).unwrap_or(&formatted);
        Ok(separator_pattern.replace_all(trimmed, "-").into_owned())
    }

    /// Rule that replaces the first group in NATIONAL format: the carrier rule
    /// with `$CC` filled in when a carrier code is given and the format has
    /// one, otherwise the national prefix rule.
    fn first_group_rule<'f>(
        &self,
        formatting_pattern: &'f NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Option<Cow<'f, str>> {
        if number_format != PhoneNumberFormat::National {
            return None;
        }
        let carrier_rule = formatting_pattern.domestic_carrier_code_formatting_rule();
        if !carrier_code.is_empty() && !carrier_rule.is_empty() {
            return Some(
                self.reg_exps
                    .carrier_code_pattern
                    .replace(carrier_rule, NoExpand(carrier_code)),
            );
        }
        let national_prefix_rule = formatting_pattern.national_prefix_formatting_rule();
        (!national_prefix_rule.is_empty()).then_some(Cow::Borrowed(national_prefix_rule))
    }
}

/// Resolves `$NP` and `$FG` in the national prefix rule of a caller-supplied
/// format.
fn resolve_user_prefix_rule<'f>(user_format: &'f NumberFormat, national_prefix: &str) -> Cow<'f, NumberFormat> {
    let rule = user_format.national_prefix_formatting_rule();
    if rule.is_empty() {
        return Cow::Borrowed(user_format);
    }
    let mut resolved = user_format.clone();
    if national_prefix.is_empty() {
        resolved.clear_national_prefix_formatting_rule();
    } else {
        resolved.set_national_prefix_formatting_rule(
            rule.replace("$NP", national_prefix).replace("$FG", "$1"),
        );
    }
    Cow::Owned(resolved)
}

/// Extension label and digits for a format, or empty strings when the number
/// has no extension. RFC3966 always uses `;ext=`, the other formats the
/// region's preferred label or " ext. ".
fn extension_parts<'a>(
    phone_number: &'a PhoneNumber,
    metadata: &'a PhoneMetadata,
    number_format: PhoneNumberFormat,
) -> (&'a str, &'a str) {
    let extension = phone_number.extension();
    if extension.is_empty() {
        return ("", "");
    }
    let label = if number_format == PhoneNumberFormat::RFC3966 {
        RFC3966_EXTN_PREFIX
    } else if metadata.has_preferred_extn_prefix() {
        metadata.preferred_extn_prefix()
    } else {
        DEFAULT_EXTN_PREFIX
    };
    (label, extension)
}
