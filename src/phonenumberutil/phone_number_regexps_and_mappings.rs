// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
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


use std::collections::HashMap;

use regex::Regex;

use crate::{phonenumberutil::{helper_constants::{
    SECOND_NUMBER_START, DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS,
    PLUS_SIGN, RFC3966_VISUAL_SEPARATOR, STAR_SIGN, VALID_ALPHA, VALID_ALPHA_INCL_UPPERCASE,
    VALID_PUNCTUATION
}, helper_functions::create_extn_pattern}, regexp_cache::RegexCache};

/// Keypad letters, grouped by the digit they dial.
const KEYPAD_LETTERS: [(&str, char); 8] = [
    ("ABC", '2'), ("DEF", '3'), ("GHI", '4'), ("JKL", '5'),
    ("MNO", '6'), ("PQRS", '7'), ("TUV", '8'), ("WXYZ", '9'),
];

/// Compiled constant patterns and character tables shared by parsing and
/// formatting. Everything here is immutable after construction; patterns that
/// come from metadata go through `regexp_cache` instead.
pub(super) struct PhoneNumberRegExpsAndMappings {
    pub regexp_cache: RegexCache,

    /// Characters kept when a number is reduced to what can be dialled.
    pub diallable_char_mappings: HashMap<char, char>,
    /// Keypad letter to digit.
    pub alpha_mappings: HashMap<char, char>,
    /// `alpha_mappings` plus the ASCII digits, for vanity numbers.
    pub alpha_phone_mappings: HashMap<char, char>,

    pub capturing_digit_pattern: Regex,

    /// A plus sign or any digit. Text before the first such char is garbage.
    pub valid_start_char_pattern: Regex,

    /// Marker of a second number glued to the first one. Everything from the
    /// marker on is dropped.
    pub second_number_start_pattern: Regex,

    /// Trailing run of anything but letters, digits and `#`. The hash may
    /// close an extension so it stays.
    pub unwanted_end_char_pattern: Regex,

    pub separator_pattern: Regex,

    /// Extension at the end of the input, parsing flavour.
    pub extn_pattern: Regex,

    /// Shape of a viable number: optional plus signs, at least three digits
    /// mixed with punctuation, then letters or punctuation, optionally an
    /// extension. Two bare digits ("15") are viable too. `x` counts as
    /// punctuation since it stands in for carrier codes in some regions.
    pub valid_phone_number_pattern: Regex,

    /// Three letters or more mark a vanity number.
    pub valid_alpha_phone_pattern: Regex,

    /// First `$N` of a format rule. Not `$1`, since some formats skip the
    /// first group.
    pub first_group_capturing_pattern: Regex,

    pub carrier_code_pattern: Regex,

    pub plus_chars_pattern: Regex,

    /// RFC3966 global-number-digits of a phone-context.
    pub rfc3966_global_number_digits_pattern: Regex,

    /// RFC3966 domainname of a phone-context.
    pub rfc3966_domainname_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn initialize_regexp_mappings(&mut self) {
        let ascii_digit_mappings: HashMap<char, char> = ('0'..='9').map(|d| (d, d)).collect();

        // Uppercase only: input is uppercased before lookup
        self.alpha_mappings = KEYPAD_LETTERS
            .iter()
            .flat_map(|(letters, digit)| letters.chars().map(move |letter| (letter, *digit)))
            .collect();

        self.alpha_phone_mappings = self.alpha_mappings
            .iter()
            .chain(ascii_digit_mappings.iter())
            .map(|(k, v)| (*k, *v))
            .collect();

        self.diallable_char_mappings = ascii_digit_mappings;
        for c in ['+', '*', '#'] {
            self.diallable_char_mappings.insert(c, c);
        }
    }

    pub fn new() -> Self {
        let alphanum = fast_cat::concat_str!(VALID_ALPHA_INCL_UPPERCASE, DIGITS);
        let extn_patterns_for_parsing = create_extn_pattern(true);
        let valid_phone_number = format!(
                "[{}]*(?:[{}{}]*{}){{3,}}[{}{}{}{}]*|{}{{{}}}",
                PLUS_CHARS,
                VALID_PUNCTUATION, STAR_SIGN, DIGITS,
                VALID_PUNCTUATION, STAR_SIGN, DIGITS, VALID_ALPHA,
                DIGITS, MIN_LENGTH_FOR_NSN,
            );

        let rfc3966_phone_digit = format!("({}|{})", DIGITS, RFC3966_VISUAL_SEPARATOR);
        let rfc3966_domainlabel = format!("[{}]+((\\-)*[{}])*", alphanum, alphanum);
        let rfc3966_toplabel = format!("[{}]+((\\-)*[{}])*", VALID_ALPHA_INCL_UPPERCASE, alphanum);

        // All patterns below are constants of this module, a failure to compile
        // them is a programming error caught by `check_regexps_are_compiling`.
        let mut instance = Self {
            regexp_cache: RegexCache::with_capacity(128),
            diallable_char_mappings: Default::default(),
            alpha_mappings: Default::default(),
            alpha_phone_mappings: Default::default(),
            capturing_digit_pattern: Regex::new(&format!("([{}])", DIGITS)).unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            second_number_start_pattern: Regex::new(SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]+$").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!("(?i)^(?:{})(?:{})?$",
                &valid_phone_number,
                &extn_patterns_for_parsing
            )).unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}").unwrap(),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            carrier_code_pattern: Regex::new("\\$CC").unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", &PLUS_CHARS)).unwrap(),
            rfc3966_global_number_digits_pattern: Regex::new(
                &format!("^\\{}{}*{}{}*$", PLUS_SIGN, &rfc3966_phone_digit, DIGITS, rfc3966_phone_digit)
            ).unwrap(),
            rfc3966_domainname_pattern: Regex::new(
                &format!("^({}\\.)*{}\\.?$", rfc3966_domainlabel, rfc3966_toplabel)
            ).unwrap(),
        };
        instance.initialize_regexp_mappings();
        instance
    }
}

#[cfg(test)]
mod tests {
    use crate::regex_util::RegexConsume;

    use super::PhoneNumberRegExpsAndMappings;

    #[test]
    fn check_regexps_are_compiling() {
        PhoneNumberRegExpsAndMappings::new();
    }

    #[test]
    fn viable_number_shapes() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        let viable = |s: &str| reg_exps.valid_phone_number_pattern.is_match(s);
        assert!(viable("15"));
        assert!(viable("+1 (650) 253-0000"));
        assert!(viable("1-800-FLOWERS"));
        assert!(viable("[020] 8366 1177"));
        assert!(viable("2083661177 ext. 1234"));
        assert!(!viable("1"));
        assert!(!viable("+1"));
        assert!(!viable("1+2"));
        assert!(!viable(""));
    }

    #[test]
    fn keypad_mappings() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        assert_eq!(Some(&'7'), reg_exps.alpha_mappings.get(&'S'));
        assert_eq!(Some(&'9'), reg_exps.alpha_phone_mappings.get(&'Z'));
        assert_eq!(Some(&'0'), reg_exps.alpha_phone_mappings.get(&'0'));
        assert_eq!(None, reg_exps.alpha_mappings.get(&'s'));
        assert_eq!(26, reg_exps.alpha_mappings.len());
        assert_eq!(13, reg_exps.diallable_char_mappings.len());
    }

    #[test]
    fn plus_chars_are_consumed() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        assert_eq!(Some("44"), reg_exps.plus_chars_pattern.consume_start("\u{FF0B}+44"));
        assert_eq!(None, reg_exps.plus_chars_pattern.consume_start("44+"));
    }
}
