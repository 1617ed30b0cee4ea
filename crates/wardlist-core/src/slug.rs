//! Slug derivation and name validation.
//!
//! Slugs identify lists and groups in URLs and registry lookups. A slug is
//! built from components matching `[a-z0-9_]+`; the hyphen is reserved as
//! the tag/subtag separator and is therefore forbidden inside a component.

use crate::error::{CoreError, Result};

/// The resolved identifier of a list or group within a registry.
pub type Slug = String;

fn is_valid_component(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Validate a single name component (a tag, a subtag, a column name).
///
/// `kind` names the offending field in the error message.
pub fn validate_component(kind: &str, value: &str) -> Result<()> {
    if is_valid_component(value) {
        Ok(())
    } else {
        Err(CoreError::invalid_name(kind, value))
    }
}

/// Validate a resolved slug.
///
/// Every hyphen-separated component must individually satisfy the component
/// pattern, so `eater-herbivore` is valid while `eater--x`, `-eater` and
/// `Eater` are not.
pub fn validate_slug(kind: &str, slug: &str) -> Result<()> {
    if slug.split('-').all(is_valid_component) {
        Ok(())
    } else {
        Err(CoreError::invalid_name(kind, slug))
    }
}

/// Derive a slug-shaped name from a declared name.
///
/// Lowercases and word-separates: `"MyWinterList"` becomes
/// `"my_winter_list"`, `"ICU Round"` becomes `"icu_round"`. The result is
/// not guaranteed valid; callers validate it before registration so that a
/// bad declared name fails fast instead of being silently mangled.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => chars
                    .get(i + 1)
                    .is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Human display words for a slug: `"eater-shh"` becomes `"Eater Shh"`.
pub fn title_words(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut cs = word.chars();
            match cs.next() {
                Some(first) => first.to_uppercase().collect::<String>() + cs.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
