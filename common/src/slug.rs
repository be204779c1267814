//! Slug normalization.
//!
//! Facet labels and product records come from different export passes with
//! inconsistent casing and spacing, so both sides are compared through
//! [`slugify`] rather than by display name.

pub const UNKNOWN_SLUG: &str = "unknown";

/// Normalize a display string into a URL-safe slug.
///
/// Lowercases, turns whitespace runs into `-`, drops every character that is
/// not a letter, digit, `_` or `-`, collapses repeated `-` and trims them from
/// both ends. Absent input, and input with nothing left after normalization,
/// maps to [`UNKNOWN_SLUG`].
pub fn slugify<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return UNKNOWN_SLUG.to_string();
    };

    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_missing_input_is_unknown() {
        assert_eq!(slugify(""), "unknown");
        assert_eq!(slugify(None), "unknown");
        assert_eq!(slugify("   "), "unknown");
    }

    #[test]
    fn collapses_separators_and_strips_symbols() {
        assert_eq!(slugify("Brake System"), "brake-system");
        assert_eq!(slugify("  Nissan "), "nissan");
        assert_eq!(slugify("DAISEN-HY"), "daisen-hy");
        assert_eq!(slugify("Oil & Filters / Misc."), "oil-filters-misc");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--Land  Rover--"), "land-rover");
    }

    #[test]
    fn keeps_non_latin_letters() {
        assert_eq!(slugify("Motor Oil - زيوت المحرك"), "motor-oil-زيوت-المحرك");
        assert_eq!(slugify("TOYOTA - تويوتا"), "toyota-تويوتا");
    }

    #[test]
    fn repeated_calls_agree() {
        assert_eq!(slugify("Car Care - العناية"), slugify("Car Care - العناية"));
    }

    proptest! {
        #[test]
        fn slugify_is_idempotent(input in "\\PC{0,40}") {
            let once = slugify(input.as_str());
            prop_assert_eq!(slugify(once.as_str()), once);
        }

        #[test]
        fn slug_has_no_edge_or_double_dashes(input in "[ a-zA-Z0-9_&/-]{0,40}") {
            let slug = slugify(input.as_str());
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(!slug.is_empty());
        }
    }
}
