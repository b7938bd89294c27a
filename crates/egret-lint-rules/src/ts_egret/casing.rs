//! Casing and prefix predicates on identifier strings.
//!
//! Letter classes are ASCII: a non-ASCII letter is neither upper nor lower
//! case here.

/// No `_`, and the first character is not a lowercase letter.
#[must_use]
pub fn is_pascal_case(name: &str) -> bool {
    !name.contains('_') && !name.starts_with(|c: char| c.is_ascii_lowercase())
}

/// No `_`, and the first character is not an uppercase letter.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    !name.contains('_') && !name.starts_with(|c: char| c.is_ascii_uppercase())
}

/// No uppercase letters. Underscores and digits are fine.
#[must_use]
pub fn is_lower_snake(name: &str) -> bool {
    !name.chars().any(|c| c.is_ascii_uppercase())
}

/// No lowercase letters.
#[must_use]
pub fn is_upper_snake(name: &str) -> bool {
    !name.chars().any(|c| c.is_ascii_lowercase())
}

/// `marker` followed by an uppercase letter, as in `IWatch` or `EGameType`.
#[must_use]
pub fn has_type_prefix(name: &str, marker: char) -> bool {
    name.strip_prefix(marker)
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
}
