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

use strum::{EnumIter, IntoStaticStr};

/// Output formats for [`crate::PhoneNumberUtil::format`].
///
/// `International` and `National` follow ITU-T E.123 in spirit, but keep the
/// separators each region uses locally. A London number is written as:
/// - **International**: `+44 20 8366 1177`
/// - **National**: `020 8366 1177`
/// - **E164**: `+442083661177`
/// - **RFC3966**: `tel:+44-20-8366-1177`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// `+` and the country calling code followed by the digits, with no
    /// separators. Extensions are dropped.
    E164,
    /// Country calling code and the national number grouped for display.
    International,
    /// The form dialled inside the region, national prefix included where the
    /// region uses one.
    National,
    /// A `tel:` URI with hyphens as the only separators and `;ext=` for
    /// extensions.
    RFC3966,
}

/// Kind of line a number belongs to, as told by the per-type patterns of its
/// region.
///
/// Converts into the metadata field name of the type (`"fixed_line"`,
/// `"toll_free"`, `"voip"`, ...).
#[derive(Debug, EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// The number matches both the fixed-line and the mobile patterns, as in
    /// NANPA regions where the two can't be told apart.
    FixedLineOrMobile,
    /// Free for the caller.
    TollFree,
    PremiumRate,
    /// The cost is split between the caller and the recipient.
    SharedCost,
    #[strum(serialize = "voip")]
    VoIP,
    /// Routed to a person rather than to a line or a device.
    PersonalNumber,
    Pager,
    /// Universal Access Number: a single number routed to several offices of
    /// a company.
    UAN,
    #[strum(serialize = "voicemail")]
    VoiceMail,
    /// Matches no type pattern of the region.
    Unknown,
}

/// Successful outcome of a length check.
///
/// Converts into its reason tag (`"IS_POSSIBLE"`, `"IS_POSSIBLE_LOCAL_ONLY"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberLengthType {
    /// The length fits a full national number of the region.
    IsPossible,
    /// The length only fits a number dialled locally, without the area code.
    IsPossibleLocalOnly,
}
