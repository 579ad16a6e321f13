//! Tracked equities and their alias rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest alias (in characters) still treated as a ticker-like code
pub const CODE_ALIAS_MAX_CHARS: usize = 5;

/// An alias with the matching mode implied by its shape
///
/// Short alphanumeric aliases (e.g. "HPA") are matched like ticker codes, on
/// word boundaries. Everything else (e.g. "Trần Đình Long") is matched as a
/// normalized phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AliasRule {
    Code(String),
    Phrase(String),
}

impl AliasRule {
    /// Classify a raw alias. Blank aliases produce `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let alias = raw.trim();
        if alias.is_empty() {
            return None;
        }

        let is_code_like = alias.chars().count() <= CODE_ALIAS_MAX_CHARS
            && alias.chars().all(char::is_alphanumeric);

        if is_code_like {
            Some(AliasRule::Code(alias.to_string()))
        } else {
            Some(AliasRule::Phrase(alias.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AliasRule::Code(s) | AliasRule::Phrase(s) => s,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, AliasRule::Code(_))
    }
}

impl fmt::Display for AliasRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An equity being watched, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTrackedEntity", into = "RawTrackedEntity")]
pub struct TrackedEntity {
    /// Ticker code, stored upper-cased; empty means "no code"
    pub code: String,
    /// Company display name, may be empty
    pub display_name: String,
    /// Aliases in configured order, blanks removed
    pub aliases: Vec<AliasRule>,
}

impl TrackedEntity {
    pub fn new<I, S>(code: &str, display_name: &str, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            code: code.trim().to_uppercase(),
            display_name: display_name.trim().to_string(),
            aliases: aliases
                .into_iter()
                .filter_map(|a| AliasRule::parse(a.as_ref()))
                .collect(),
        }
    }

    /// Label used in logs and messages: the code, or the name when there is no code
    pub fn label(&self) -> &str {
        if self.code.is_empty() {
            &self.display_name
        } else {
            &self.code
        }
    }
}

/// Configuration shape of a tracked entity
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTrackedEntity {
    #[serde(default, alias = "symbol")]
    code: String,
    #[serde(default, alias = "company")]
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
}

impl From<RawTrackedEntity> for TrackedEntity {
    fn from(raw: RawTrackedEntity) -> Self {
        TrackedEntity::new(&raw.code, &raw.name, raw.aliases)
    }
}

impl From<TrackedEntity> for RawTrackedEntity {
    fn from(entity: TrackedEntity) -> Self {
        RawTrackedEntity {
            code: entity.code,
            name: entity.display_name,
            aliases: entity.aliases.iter().map(|a| a.as_str().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_classification() {
        assert_eq!(AliasRule::parse("HPA"), Some(AliasRule::Code("HPA".to_string())));
        assert_eq!(
            AliasRule::parse("Dung Quất"),
            Some(AliasRule::Phrase("Dung Quất".to_string()))
        );
        // six characters is too long for a code
        assert!(!AliasRule::parse("HOAPHA").unwrap().is_code());
        // accented letters are still alphanumeric
        assert!(AliasRule::parse("Đạm").unwrap().is_code());
        assert_eq!(AliasRule::parse("   "), None);
    }

    #[test]
    fn test_entity_normalizes_fields() {
        let entity = TrackedEntity::new(" hpg ", " Hòa Phát ", ["HPA", "", "  Dung Quất "]);
        assert_eq!(entity.code, "HPG");
        assert_eq!(entity.display_name, "Hòa Phát");
        assert_eq!(entity.aliases.len(), 2);
        assert_eq!(entity.aliases[1].as_str(), "Dung Quất");
        assert_eq!(entity.label(), "HPG");
    }

    #[test]
    fn test_parse_entity_config() {
        let json = r#"
        [
            {"code": "HPG", "name": "Hòa Phát", "aliases": ["HPA", "Trần Đình Long"]},
            {"symbol": "FPT", "company": "FPT"}
        ]
        "#;

        let entities: Vec<TrackedEntity> = serde_json::from_str(json).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].aliases.len(), 2);
        assert!(entities[0].aliases[0].is_code());
        assert_eq!(entities[1].code, "FPT");
        assert!(entities[1].aliases.is_empty());
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let entity = TrackedEntity::new("", "Nông nghiệp Hòa Phát", Vec::<String>::new());
        assert_eq!(entity.label(), "Nông nghiệp Hòa Phát");
    }
}
