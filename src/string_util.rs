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

/// Rewrites metadata group references (`$1`) into the braced form (`${1}`)
/// understood by `regex::Captures::expand`.
///
/// Without braces `$1abc` would be read as a reference to a group named
/// `1abc`. Returns the input untouched if it holds no references.
pub fn braced_group_refs(rule: &str) -> Cow<'_, str> {
    if !rule.contains('$') {
        return Cow::Borrowed(rule);
    }
    let mut braced = String::with_capacity(rule.len() + 8);
    let mut chars = rule.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('$', Some(d)) if d.is_ascii_digit() => {
                braced.push_str("${");
                while let Some(d) = chars.next_if(|d| d.is_ascii_digit()) {
                    braced.push(d);
                }
                braced.push('}');
            }
            _ => braced.push(c),
        }
    }
    Cow::Owned(braced)
}
