//! URL-safe slugs from display names.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Turn display text into a URL-safe slug.
///
/// Diacritics are removed by NFD-decomposing the input and dropping the
/// combining marks, so `"Café Déjà vu"` becomes `"cafe-deja-vu"`. Every run
/// of characters that are not ASCII letters or digits collapses into a
/// single `-`, and separators never lead or trail.
///
/// Slugifying an existing slug returns it unchanged.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.nfd().filter(|c| !is_combining_mark(*c)) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Whether `value` is already in slug form.
pub fn is_slug(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}
