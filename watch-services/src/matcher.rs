//! Entity relevance matching
//!
//! An item is relevant to a tracked entity when any of three tiers hits, in
//! order:
//! 1. the ticker code appears as a whole word,
//! 2. the company name appears as a normalized substring,
//! 3. an alias hits, using the code rule for code-like aliases and the
//!    substring rule for phrases.
//!
//! Every tier is case-insensitive and is tried on both the original text and
//! its accent-stripped form.

use regex::Regex;
use tracing::warn;

use watch_core::{AliasRule, NewsItem, TrackedEntity};

use crate::text::{normalize, strip_accents, strip_html};

/// The forms of an item's text each tier looks at
#[derive(Debug, Clone)]
pub struct MatchText {
    /// `strip_html(title + " " + summary)`
    raw: String,
    raw_folded: String,
    /// `normalize(raw)`
    text: String,
    text_folded: String,
}

impl MatchText {
    pub fn new(title: &str, summary: &str) -> Self {
        let raw = strip_html(&format!("{} {}", title, summary));
        let raw_folded = strip_accents(&raw);
        Self {
            text: normalize(&raw),
            text_folded: normalize(&raw_folded),
            raw,
            raw_folded,
        }
    }
}

/// Whole-word, case-insensitive matcher for a ticker-like token
#[derive(Debug, Clone)]
struct CodePattern {
    patterns: Vec<Regex>,
}

impl CodePattern {
    fn new(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        let mut forms = vec![code.to_uppercase()];
        let folded = strip_accents(&forms[0]);
        if folded != forms[0] {
            forms.push(folded);
        }

        let patterns: Vec<Regex> = forms
            .iter()
            .filter_map(|form| match word_pattern(form) {
                Some(re) => Some(re),
                None => {
                    warn!("Could not build word pattern for '{}'", form);
                    None
                }
            })
            .collect();

        if patterns.is_empty() {
            None
        } else {
            Some(Self { patterns })
        }
    }

    fn is_match(&self, text: &MatchText) -> bool {
        self.patterns
            .iter()
            .any(|re| re.is_match(&text.raw) || re.is_match(&text.raw_folded))
    }
}

/// Normalized substring matcher for names and phrase aliases
#[derive(Debug, Clone)]
struct PhrasePattern {
    plain: String,
    folded: String,
}

impl PhrasePattern {
    fn new(phrase: &str) -> Option<Self> {
        let plain = normalize(phrase);
        if plain.is_empty() {
            return None;
        }
        Some(Self {
            folded: normalize(&strip_accents(phrase)),
            plain,
        })
    }

    fn is_match(&self, text: &MatchText) -> bool {
        text.text.contains(&self.plain) || text.text_folded.contains(&self.folded)
    }
}

#[derive(Debug, Clone)]
enum AliasPattern {
    Code(CodePattern),
    Phrase(PhrasePattern),
}

impl AliasPattern {
    fn new(rule: &AliasRule) -> Option<Self> {
        match rule {
            AliasRule::Code(code) => CodePattern::new(code).map(AliasPattern::Code),
            AliasRule::Phrase(phrase) => PhrasePattern::new(phrase).map(AliasPattern::Phrase),
        }
    }

    fn is_match(&self, text: &MatchText) -> bool {
        match self {
            AliasPattern::Code(p) => p.is_match(text),
            AliasPattern::Phrase(p) => p.is_match(text),
        }
    }
}

/// Precompiled relevance matcher for one tracked entity
#[derive(Debug, Clone)]
pub struct EntityMatcher {
    code: Option<CodePattern>,
    name: Option<PhrasePattern>,
    aliases: Vec<AliasPattern>,
}

impl EntityMatcher {
    pub fn new(entity: &TrackedEntity) -> Self {
        Self {
            code: CodePattern::new(&entity.code),
            name: PhrasePattern::new(&entity.display_name),
            aliases: entity.aliases.iter().filter_map(AliasPattern::new).collect(),
        }
    }

    pub fn code_matches(&self, text: &MatchText) -> bool {
        self.code.as_ref().is_some_and(|p| p.is_match(text))
    }

    pub fn name_matches(&self, text: &MatchText) -> bool {
        self.name.as_ref().is_some_and(|p| p.is_match(text))
    }

    /// First matching alias wins
    pub fn alias_matches(&self, text: &MatchText) -> bool {
        self.aliases.iter().any(|p| p.is_match(text))
    }

    pub fn matches(&self, title: &str, summary: &str) -> bool {
        let text = MatchText::new(title, summary);
        self.code_matches(&text) || self.name_matches(&text) || self.alias_matches(&text)
    }

    pub fn matches_item(&self, item: &NewsItem) -> bool {
        self.matches(&item.title, &item.summary)
    }
}

/// Whether `item` refers to `entity`
pub fn is_relevant(item: &NewsItem, entity: &TrackedEntity) -> bool {
    EntityMatcher::new(entity).matches_item(item)
}

/// Whole-word, case-insensitive search for `code` in `text`
///
/// A blank code never matches, and a code never matches inside a longer
/// alphanumeric token (`HPG` does not match `HPGX`).
pub fn contains_code(text: &str, code: &str) -> bool {
    let code = code.trim();
    if code.is_empty() {
        return false;
    }
    word_pattern(&code.to_uppercase()).is_some_and(|re| re.is_match(text))
}

fn word_pattern(token: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hpg() -> TrackedEntity {
        TrackedEntity::new(
            "HPG",
            "Hòa Phát",
            [
                "HPA",
                "Nông nghiệp Hòa Phát",
                "Hoa Phat Agriculture",
                "Trần Đình Long",
                "Dung Quất",
            ],
        )
    }

    #[test]
    fn test_contains_code_word_boundary() {
        assert!(contains_code("HPG tăng giá", "HPG"));
        assert!(contains_code("cổ phiếu hpg, tăng", "HPG"));
        assert!(contains_code("(HPG)", "hpg"));
        assert!(!contains_code("HPGX tăng", "HPG"));
        assert!(!contains_code("CHPG1234 đáo hạn", "HPG"));
        assert!(!contains_code("HPG tăng", ""));
    }

    #[test]
    fn test_code_tier() {
        let matcher = EntityMatcher::new(&TrackedEntity::new("HPG", "", Vec::<String>::new()));
        assert!(matcher.code_matches(&MatchText::new("HPG tăng giá", "")));
        assert!(matcher.code_matches(&MatchText::new("Tin mới", "<p>mã HPG</p>")));
        assert!(!matcher.code_matches(&MatchText::new("HPGX", "")));
        assert!(!matcher.code_matches(&MatchText::new("CHPG1234", "")));
    }

    #[test]
    fn test_code_tier_not_fooled_by_tags() {
        let matcher = EntityMatcher::new(&TrackedEntity::new("HPG", "", Vec::<String>::new()));
        // tags become spaces: a code split by a tag is two tokens,
        // and a tag right after the code acts as a boundary
        assert!(!matcher.code_matches(&MatchText::new("", "H<b>PG</b>")));
        assert!(matcher.code_matches(&MatchText::new("", "<b>HPG</b>X")));
    }

    #[test]
    fn test_empty_code_never_matches() {
        let matcher = EntityMatcher::new(&TrackedEntity::new("", "", Vec::<String>::new()));
        assert!(!matcher.matches("HPG tăng giá", "anything"));
    }

    #[test]
    fn test_name_tier_accent_insensitive() {
        let matcher = EntityMatcher::new(&TrackedEntity::new("", "Hòa Phát", Vec::<String>::new()));
        assert!(matcher.name_matches(&MatchText::new("Tập đoàn Hòa Phát báo lãi", "")));
        assert!(matcher.name_matches(&MatchText::new("Tap doan HOA PHAT bao lai", "")));
        assert!(matcher.name_matches(&MatchText::new("HÒA   PHÁT", "")));
        assert!(!matcher.name_matches(&MatchText::new("Hòa Bình", "")));
    }

    #[test]
    fn test_markup_in_title_is_stripped() {
        let entity = TrackedEntity::new("", "Hòa Phát", ["Dung Quất"]);
        assert!(is_relevant(&NewsItem::new("<b>Hòa</b> Phát báo lãi", "l", ""), &entity));
        assert!(is_relevant(&NewsItem::new("Mở rộng <i>Dung</i> Quat", "l", ""), &entity));

        let code_only = TrackedEntity::new("HPG", "", Vec::<String>::new());
        assert!(is_relevant(&NewsItem::new("<a href=\"x\">HPG</a> tăng giá", "l", ""), &code_only));
    }

    #[test]
    fn test_phrase_alias_accent_and_case_insensitive() {
        let entity = TrackedEntity::new("", "", ["Dung Quất"]);
        let matcher = EntityMatcher::new(&entity);
        assert!(matcher.alias_matches(&MatchText::new("Khu liên hợp Dung Quat", "")));
        assert!(matcher.alias_matches(&MatchText::new("DUNG QUẤT mở rộng", "")));
        assert!(matcher.alias_matches(&MatchText::new("", "<i>dung quất</i> giai đoạn 2")));
        assert!(!matcher.alias_matches(&MatchText::new("Dung Quang", "")));
    }

    #[test]
    fn test_code_alias_uses_word_boundary() {
        let matcher = EntityMatcher::new(&TrackedEntity::new("", "", ["HPA"]));
        assert!(matcher.alias_matches(&MatchText::new("HPA lên sàn", "")));
        assert!(!matcher.alias_matches(&MatchText::new("HPAX lên sàn", "")));
    }

    #[test]
    fn test_accented_code_alias_matches_folded_text() {
        let matcher = EntityMatcher::new(&TrackedEntity::new("", "", ["Đạm"]));
        assert!(matcher.alias_matches(&MatchText::new("Giá ĐẠM tăng", "")));
        assert!(matcher.alias_matches(&MatchText::new("Gia Đam tang", "")));
    }

    #[test]
    fn test_is_relevant_tiers() {
        let entity = hpg();
        assert!(is_relevant(&NewsItem::new("HPG tăng giá", "l", ""), &entity));
        assert!(is_relevant(&NewsItem::new("Ông Trần Đình Long mua thêm", "l", ""), &entity));
        assert!(is_relevant(&NewsItem::new("Tin ngành", "l", "Hoa Phat Agriculture IPO"), &entity));
        assert!(!is_relevant(&NewsItem::new("HSG tăng giá", "l", "Thép Nam Kim"), &entity));
    }
}
