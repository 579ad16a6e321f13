//! Content fingerprints and run-scoped deduplication
//!
//! Two items are duplicates exactly when their fingerprints are equal. There
//! is no fuzzy matching: reworded coverage of the same story is kept.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::text::{normalize, strip_html};

/// Everything outside ASCII lowercase letters, digits, the Latin-1 to
/// Vietnamese accented range, and space
static NON_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9\x{00C0}-\x{1EF9} ]+").expect("content pattern is valid")
});

/// 128-bit content digest of an item, hex-encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fingerprint of an item's visible content
///
/// Title and summary are normalized separately, joined with a space, reduced
/// to content characters, whitespace-collapsed and MD5-hashed. Markup in the
/// summary is stripped first and the link is not part of the input, so
/// tracking parameters do not matter.
pub fn fingerprint(title: &str, summary: &str) -> Fingerprint {
    let joined = format!("{} {}", normalize(title), normalize(&strip_html(summary)));
    let content = NON_CONTENT_RE.replace_all(&joined, " ");
    let base = content.split_whitespace().collect::<Vec<_>>().join(" ");
    Fingerprint(format!("{:x}", md5::compute(base.as_bytes())))
}

/// Fingerprints already emitted in the current run
///
/// Created empty for each run and dropped with it; never persisted.
#[derive(Debug, Default)]
pub struct SeenFingerprintSet {
    seen: HashSet<Fingerprint>,
}

impl SeenFingerprintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_duplicate(&self, fp: &Fingerprint) -> bool {
        self.seen.contains(fp)
    }

    /// Returns `false` if the fingerprint was already present
    pub fn record(&mut self, fp: Fingerprint) -> bool {
        self.seen.insert(fp)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
