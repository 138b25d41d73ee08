/// Takes the value out of a `Cow::Owned`, or evaluates `$default` when the
/// cow is borrowed. Used where `Cow::Borrowed` means "input left untouched"
/// and the caller already owns that input.
macro_rules! owned_from_cow_or {
    ($getcow:expr, $default:expr) => {{
        match $getcow {
            std::borrow::Cow::Owned(owned) => owned,
            std::borrow::Cow::Borrowed(_) => $default,
        }
    }};
}

pub(crate) use owned_from_cow_or;
