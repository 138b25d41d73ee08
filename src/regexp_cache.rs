use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Thread-safe cache of compiled patterns.
///
/// Patterns live in two maps: `get_regex` compiles the pattern as is
/// (use it for searching and prefix consumption), `get_full_match_regex`
/// compiles it wrapped in `^(?:...)$`. Rust regexes are leftmost-first, so a
/// search hit spanning the whole input is not proof that some alternative
/// spans it; full matches must go through the anchored variant.
pub struct RegexCache {
    cache: DashMap<String, Arc<regex::Regex>>,
    anchored_cache: DashMap<String, Arc<regex::Regex>>,
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
            anchored_cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        Self::get_or_compile(&self.cache, pattern, || regex::Regex::new(pattern))
    }

    pub fn get_full_match_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        Self::get_or_compile(&self.anchored_cache, pattern, || {
            regex::Regex::new(&crate::regex_util::anchored(pattern))
        })
    }

    fn get_or_compile(
        map: &DashMap<String, Arc<regex::Regex>>,
        pattern: &str,
        compile: impl FnOnce() -> Result<regex::Regex, regex::Error>,
    ) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if let Some(regex) = map.get(pattern) {
            Ok(regex.value().clone())
        } else {
            let entry = map.entry(pattern.to_string()).or_try_insert_with(|| {
                compile().map(Arc::new)
            })?;
            Ok(entry.value().clone())
        }
    }
}
