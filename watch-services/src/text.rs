//! Text canonicalization used by every comparison in the filtering core

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Replace every `<...>` tag with a single space. Entities are left as-is.
pub fn strip_html(s: &str) -> String {
    TAG_RE.replace_all(s, " ").into_owned()
}

/// Trim, collapse whitespace runs to one space, lower-case.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Decompose (NFD) and drop combining marks: "Hòa Phát" -> "Hoa Phat".
///
/// Letters without a decomposition (e.g. "Đ") are unchanged.
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
