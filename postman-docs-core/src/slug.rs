//! Page slugs.
//!
//! A slug is the lowercased, alphabetic-only form of a display name with every other
//! character run collapsed to a single `-`. Page slugs carry their full ancestry: a
//! top-level slug starts with the configured prefix, a sub-page slug with its parent's slug.

use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]+").expect("static regex is valid"));

/// Normalises a display name into a slug fragment.
pub fn generate_slug(name: &str) -> String {
    NON_ALPHA_RE
        .replace_all(name, "-")
        .to_lowercase()
        .trim_matches(|c| c == '-' || c == '_' || c == ' ')
        .to_owned()
}

/// Slug of a top-level page: `<prefix>-<name>`.
pub fn root_slug(prefix: &str, name: &str) -> String {
    format!("{prefix}-{}", generate_slug(name))
}

/// Slug of a sub-page: `<parent slug>-<name>`.
///
/// Siblings whose names normalise to the same fragment share a slug.
pub fn child_slug(parent: &str, name: &str) -> String {
    format!("{parent}-{}", generate_slug(name))
}
