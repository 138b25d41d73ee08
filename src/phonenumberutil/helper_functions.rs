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

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use crate::{
    interfaces::MatcherApi,
    errors::ValidationError,
    phonemetadata::{PhoneMetadata, PhoneNumberDesc},
};

use super::{
    PhoneNumberFormat, PhoneNumberType, NumberLengthType,
    helper_constants::{
        OPTIONAL_EXT_SUFFIX, PLUS_SIGN, POSSIBLE_CHARS_AFTER_EXT_LABEL,
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
    },
};

/// Description of `phone_number_type` in `metadata`. FixedLineOrMobile reads
/// the fixed-line description and Unknown the general one.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        PhoneNumberType::Pager => &metadata.pager,
        PhoneNumberType::UAN => &metadata.uan,
        PhoneNumberType::VoiceMail => &metadata.voicemail,
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// Assembles the final formatted string from the calling code, the grouped
/// national part and the extension label and digits. E164 never carries an
/// extension and NATIONAL never carries the calling code.
pub(super) fn join_formatted_parts(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    national_part: &str,
    (extension_label, extension): (&str, &str),
) -> String {
    let mut buf = itoa::Buffer::new();
    let calling_code = buf.format(country_calling_code);
    match number_format {
        PhoneNumberFormat::E164 => fast_cat::concat_str!(PLUS_SIGN, calling_code, national_part),
        PhoneNumberFormat::International => fast_cat::concat_str!(
            PLUS_SIGN, calling_code, " ", national_part, extension_label, extension
        ),
        PhoneNumberFormat::National => {
            fast_cat::concat_str!(national_part, extension_label, extension)
        }
        PhoneNumberFormat::RFC3966 => fast_cat::concat_str!(
            RFC3966_PREFIX, PLUS_SIGN, calling_code, "-", national_part, extension_label, extension
        ),
    }
}

/// Capturing group of one to `max_length` digits.
pub(super) fn extn_digits(max_length: u32) -> String {
    let mut buf = itoa::Buffer::new();
    fast_cat::concat_str!("([", super::helper_constants::DIGITS, "]{1,", buf.format(max_length), "})")
}

/// Alternation matching an extension at the end of a number. Every capturing
/// group of the result holds extension digits and nothing else; parsing takes
/// the first group that matched.
///
/// With `for_parsing` two dialling forms are accepted as well: `,,` or `;`
/// followed by up to 15 digits, and a run of commas followed by up to 9.
pub(super) fn create_extn_pattern(for_parsing: bool) -> String {
    // Digit caps shrink as the label gets less certain.
    const AFTER_EXPLICIT_LABEL: u32 = 20;
    const AFTER_LIKELY_LABEL: u32 = 15;
    const AFTER_AMBIGUOUS_CHAR: u32 = 9;
    const WITHOUT_LABEL: u32 = 6;

    // "ext", "extension" (precomposed or combining accent), fullwidth "ext",
    // Russian "доб" and Spanish "anexo".
    let explicit_labels = "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|\u{0434}\u{043E}\u{0431}|anexo)";
    let ambiguous_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54})";

    let rfc_extn = fast_cat::concat_str!(RFC3966_EXTN_PREFIX, &extn_digits(AFTER_EXPLICIT_LABEL));
    let explicit_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        explicit_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(AFTER_EXPLICIT_LABEL),
        OPTIONAL_EXT_SUFFIX
    );
    let ambiguous_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        ambiguous_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(AFTER_AMBIGUOUS_CHAR),
        OPTIONAL_EXT_SUFFIX
    );
    // "555-1234 - 503#"
    let hash_terminated_extn = fast_cat::concat_str!("[- ]+", &extn_digits(WITHOUT_LABEL), "#");

    let matching_pattern = fast_cat::concat_str!(
        &rfc_extn, "|", &explicit_extn, "|", &ambiguous_extn, "|", &hash_terminated_extn
    );
    if !for_parsing {
        return matching_pattern;
    }

    // No comma here: commas are labels in the dialling forms.
    let separators_without_comma = "[ \u{00A0}\t]*";
    let auto_dialling_extn = fast_cat::concat_str!(
        separators_without_comma,
        "(?:,{2}|;)",
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(AFTER_LIKELY_LABEL),
        OPTIONAL_EXT_SUFFIX
    );
    let only_commas_extn = fast_cat::concat_str!(
        separators_without_comma,
        "(?:,)+",
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(AFTER_AMBIGUOUS_CHAR),
        OPTIONAL_EXT_SUFFIX
    );
    fast_cat::concat_str!(&matching_pattern, "|", &auto_dialling_extn, "|", &only_commas_extn)
}

/// Maps every char of `phone_number` through `normalization_replacements`,
/// looking chars up in upper case. Unmapped chars are dropped when
/// `remove_non_matches` is set and copied as they are otherwise.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &str,
) -> String {
    phone_number
        .chars()
        .filter_map(|phone_char| {
            match normalization_replacements.get(&phone_char.to_ascii_uppercase()) {
                Some(replacement) => Some(*replacement),
                None if remove_non_matches => None,
                None => Some(phone_char),
            }
        })
        .collect()
}

/// Returns `true` if there is any possible number data set for a particular
/// PhoneNumberDesc.
pub(super) fn desc_has_possible_number_data(desc: &PhoneNumberDesc) -> bool {
    // An empty list means numbers of this type inherit their lengths from the
    // general desc, so a pattern is what tells us the type exists at all.
    !desc.possible_length.is_empty() || desc.has_national_number_pattern()
}

/// Returns `true` if there is any data set for a particular PhoneNumberDesc.
pub(super) fn desc_has_data(desc: &PhoneNumberDesc) -> bool {
    desc.has_example_number()
        || desc_has_possible_number_data(desc)
        || desc.has_national_number_pattern()
}

/// Returns the types we have metadata for based on the PhoneMetadata object
/// passed in.
pub(super) fn get_supported_types_for_metadata(
    metadata: &PhoneMetadata,
) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        // Neither is a type of its own.
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| desc_has_data(get_number_desc_by_type(metadata, *number_type)))
        .collect()
}

/// Possible lengths of a desc, falling back to the general desc when the desc
/// inherits them. Local-only lengths are inherited together with the lengths.
fn lengths_for_desc<'a>(
    desc: &'a PhoneNumberDesc,
    general_desc: &'a PhoneNumberDesc,
) -> (&'a [i32], &'a [i32]) {
    if desc.possible_length.is_empty() {
        (&general_desc.possible_length, &general_desc.possible_length_local_only)
    } else {
        (&desc.possible_length, &desc.possible_length_local_only)
    }
}

/// Helper method to check a number against possible lengths for this number
/// type, and determine whether it matches, or is too short or too long.
pub(super) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<NumberLengthType, ValidationError> {
    let desc_for_type = get_number_desc_by_type(phone_metadata, phone_number_type);
    let general_desc = &phone_metadata.general_desc;

    // Some non-geographical entities have mobile data only.
    if phone_number_type == PhoneNumberType::FixedLineOrMobile
        && !desc_has_possible_number_data(&phone_metadata.fixed_line)
    {
        return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
    }

    if phone_number_type != PhoneNumberType::Unknown && !desc_has_possible_number_data(desc_for_type) {
        // The type is not supported at all in this region.
        return Err(ValidationError::InvalidLength);
    }

    let (lengths, local) = lengths_for_desc(desc_for_type, general_desc);
    let mut possible_lengths = lengths.to_vec();
    let mut local_lengths = local.to_vec();

    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        let mobile_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::Mobile);
        if desc_has_possible_number_data(mobile_desc) {
            let (mobile_lengths, mobile_local) = lengths_for_desc(mobile_desc, general_desc);
            possible_lengths.extend_from_slice(mobile_lengths);
            local_lengths.extend_from_slice(mobile_local);
        }
    }
    possible_lengths.sort();
    possible_lengths.dedup();

    let (Some(&minimum_length), Some(&maximum_length)) =
        (possible_lengths.first(), possible_lengths.last())
    else {
        return Err(ValidationError::InvalidLength);
    };

    let actual_length = phone_number.len() as i32;
    // There is never an overlap between the possible lengths and the
    // local-only lengths.
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }

    if minimum_length == actual_length {
        Ok(NumberLengthType::IsPossible)
    } else if minimum_length > actual_length {
        Err(ValidationError::TooShort)
    } else if maximum_length < actual_length {
        Err(ValidationError::TooLong)
    } else if possible_lengths[1..].contains(&actual_length) {
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(ValidationError::InvalidLength)
    }
}

/// Helper method to check a number against possible lengths for this region,
/// based on the metadata being passed in, and determine whether it matches, or
/// is too short or too long.
pub(super) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<NumberLengthType, ValidationError> {
    test_number_length(phone_number, phone_metadata, PhoneNumberType::Unknown)
}

/// Determines whether the given number is a national number match for the given
/// PhoneNumberDesc. Does not check against possible lengths!
pub(super) fn is_match(
    matcher_api: &dyn MatcherApi,
    number: &str,
    number_desc: &PhoneNumberDesc,
) -> bool {
    matcher_api.match_national_number(number, number_desc, false)
}

#[cfg(test)]
mod tests {
    use protobuf::MessageField;

    use crate::{
        errors::ValidationError,
        phonemetadata::{PhoneMetadata, PhoneNumberDesc},
        PhoneNumberFormat, PhoneNumberType, NumberLengthType,
    };

    use super::{create_extn_pattern, join_formatted_parts, test_number_length};

    fn desc(pattern: &str, lengths: &[i32], local: &[i32]) -> PhoneNumberDesc {
        let mut desc = PhoneNumberDesc::new();
        desc.set_national_number_pattern(pattern.to_owned());
        desc.possible_length = lengths.to_vec();
        desc.possible_length_local_only = local.to_vec();
        desc
    }

    fn metadata() -> PhoneMetadata {
        let mut metadata = PhoneMetadata::new();
        metadata.set_id("XX".to_owned());
        metadata.general_desc = MessageField::some(desc("\\d{6,10}", &[8, 10], &[6]));
        metadata.fixed_line = MessageField::some(desc("2\\d{7}", &[8], &[6]));
        metadata.mobile = MessageField::some(desc("7\\d{9}", &[10], &[]));
        metadata.toll_free = MessageField::some(desc("800\\d{7}", &[], &[]));
        metadata
    }

    #[test]
    fn lengths_against_general_desc() {
        let metadata = metadata();
        let check = |n: &str| test_number_length(n, &metadata, PhoneNumberType::Unknown);
        assert_eq!(Ok(NumberLengthType::IsPossible), check("12345678"));
        assert_eq!(Ok(NumberLengthType::IsPossible), check("1234567890"));
        assert_eq!(Ok(NumberLengthType::IsPossibleLocalOnly), check("123456"));
        assert_eq!(Err(ValidationError::TooShort), check("12345"));
        assert_eq!(Err(ValidationError::InvalidLength), check("123456789"));
        assert_eq!(Err(ValidationError::TooLong), check("12345678901"));
    }

    #[test]
    fn lengths_for_types() {
        let metadata = metadata();
        let check = |n: &str, t| test_number_length(n, &metadata, t);
        assert_eq!(Err(ValidationError::TooLong), check("1234567890", PhoneNumberType::FixedLine));
        assert_eq!(Ok(NumberLengthType::IsPossible), check("1234567890", PhoneNumberType::FixedLineOrMobile));
        assert_eq!(Ok(NumberLengthType::IsPossible), check("12345678", PhoneNumberType::FixedLineOrMobile));
        // toll free inherits the general lengths
        assert_eq!(Ok(NumberLengthType::IsPossible), check("1234567890", PhoneNumberType::TollFree));
        // no pager data at all
        assert_eq!(Err(ValidationError::InvalidLength), check("12345678", PhoneNumberType::Pager));
    }

    #[test]
    fn fixed_line_or_mobile_without_fixed_line_data() {
        let mut metadata = metadata();
        metadata.fixed_line.clear();
        let check = |n: &str, t| test_number_length(n, &metadata, t);
        assert_eq!(Ok(NumberLengthType::IsPossible), check("7234567890", PhoneNumberType::FixedLineOrMobile));
        assert_eq!(Err(ValidationError::TooShort), check("72345678", PhoneNumberType::FixedLineOrMobile));
        assert_eq!(Err(ValidationError::InvalidLength), check("72345678", PhoneNumberType::FixedLine));
    }

    #[test]
    fn extension_patterns_compile() {
        regex::Regex::new(&create_extn_pattern(true)).unwrap();
        regex::Regex::new(&create_extn_pattern(false)).unwrap();
    }

    #[test]
    fn formatted_parts_per_format() {
        let join = |format| join_formatted_parts(44, format, "20 8366 1177", (" x", "12"));
        assert_eq!("+442083661177", join_formatted_parts(44, PhoneNumberFormat::E164, "2083661177", (" x", "12")));
        assert_eq!("+44 20 8366 1177 x12", join(PhoneNumberFormat::International));
        assert_eq!("20 8366 1177 x12", join(PhoneNumberFormat::National));
        assert_eq!(
            "tel:+44-20-8366-1177;ext=12",
            join_formatted_parts(44, PhoneNumberFormat::RFC3966, "20-8366-1177", (";ext=", "12"))
        );
    }
}
