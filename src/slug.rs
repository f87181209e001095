//! URL-safe slug derivation.
//!
//! Pages without an explicit `alias` get one derived from their title. Since
//! aliases end up in URLs and emitted file names, the derivation is strict:
//! lower-cased ASCII alphanumerics with single dashes between words, capped
//! at a length that keeps file names manageable.

const MAX_SLUG_LEN: usize = 80;

/// Derive a slug from a title string.
///
/// - Lower-cases ASCII letters
/// - Replaces every other character (including `-`) runs with a single dash
/// - Strips leading and trailing dashes
/// - Truncates to `MAX_SLUG_LEN` characters (breaks at last dash before limit)
///
/// `"Async Rust, Part 2"` → `"async-rust-part-2"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    let trimmed = slug.trim_matches('-');

    if trimmed.len() <= MAX_SLUG_LEN {
        return trimmed.to_string();
    }

    // Truncate at word boundary: last dash before the limit
    let cut = trimmed[..MAX_SLUG_LEN]
        .rfind('-')
        .unwrap_or(MAX_SLUG_LEN);
    trimmed[..cut].trim_matches('-').to_string()
}
