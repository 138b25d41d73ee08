use crate::phonemetadata::PhoneNumberDesc;

/// Matches national numbers against the pattern of a number description.
/// The util holds it as a trait object, shared between threads.
pub(crate) trait MatcherApi: Send + Sync {
    /// `number` holds ASCII digits only. With `allow_prefix_match` a match of
    /// the pattern at the start of the number is enough; otherwise the whole
    /// number must match. An empty pattern never matches.
    fn match_national_number(&self, number: &str, number_desc: &PhoneNumberDesc, allow_prefix_match: bool) -> bool;
}
