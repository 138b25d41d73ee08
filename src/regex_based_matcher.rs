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


use log::error;
use super::regex_util::RegexConsume;

use crate::{interfaces, phonemetadata::PhoneNumberDesc, regexp_cache::{InvalidRegexError, RegexCache}};

pub struct RegexBasedMatcher {
    cache: RegexCache,
}

impl RegexBasedMatcher {
    pub fn new() -> Self {
        Self { cache: RegexCache::with_capacity(128) }
    }

    fn match_number(
        &self, phone_number: &str,
        number_pattern: &str,
        allow_prefix_match: bool
    ) -> Result<bool, InvalidRegexError> {
        if allow_prefix_match {
            let regexp = self.cache.get_regex(number_pattern)?;
            Ok(regexp.matches_start(phone_number))
        } else {
            let regexp = self.cache.get_full_match_regex(number_pattern)?;
            Ok(regexp.is_match(phone_number))
        }
    }
}

impl interfaces::MatcherApi for RegexBasedMatcher {
    fn match_national_number(
        &self, number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool
    ) -> bool {
        let national_number_pattern = number_desc.national_number_pattern();
        // We don't want to consider it a prefix match when matching non-empty input
        // against an empty pattern.
        if national_number_pattern.is_empty() {
            return false;
        }
        match self.match_number(number, national_number_pattern, allow_prefix_match) {
            Ok(res) => res,
            Err(err) => {
                error!("Invalid regex! {}: {}", national_number_pattern, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{interfaces::MatcherApi, phonemetadata::PhoneNumberDesc};

    use super::RegexBasedMatcher;

    fn desc(pattern: &str) -> PhoneNumberDesc {
        let mut desc = PhoneNumberDesc::new();
        desc.set_national_number_pattern(pattern.to_owned());
        desc
    }

    #[test]
    fn full_and_prefix_matching() {
        let matcher = RegexBasedMatcher::new();
        let desc = desc("4\\d{8}|1\\d{5}");
        assert!(matcher.match_national_number("412345678", &desc, false));
        assert!(matcher.match_national_number("123456", &desc, false));
        assert!(!matcher.match_national_number("1234567", &desc, false));
        assert!(matcher.match_national_number("1234567", &desc, true));
    }

    #[test]
    fn empty_pattern_never_matches() {
        let matcher = RegexBasedMatcher::new();
        assert!(!matcher.match_national_number("", &PhoneNumberDesc::new(), true));
        assert!(!matcher.match_national_number("123", &PhoneNumberDesc::new(), false));
    }
}
