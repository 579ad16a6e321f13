//! Derivative-instrument noise suppression
//!
//! Covered-warrant coverage mentions the underlying ticker constantly, so it
//! is dropped before relevance matching ever runs.

use crate::text::{normalize, strip_html};

/// Keyword-based derivative noise filter
#[derive(Debug, Clone)]
pub struct NoiseClassifier {
    keywords: Vec<String>,
}

impl NoiseClassifier {
    /// Keywords are normalized; blank ones are dropped
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| normalize(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether the item text contains any noise keyword
    pub fn is_noise(&self, title: &str, summary: &str) -> bool {
        let text = normalize(&format!("{} {}", title, strip_html(summary)));
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }
}

/// One-shot form of [`NoiseClassifier::is_noise`]
pub fn is_derivative_noise<S: AsRef<str>>(title: &str, summary: &str, keywords: &[S]) -> bool {
    NoiseClassifier::new(keywords.iter().map(AsRef::as_ref)).is_noise(title, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_noise_keywords;

    fn classifier() -> NoiseClassifier {
        NoiseClassifier::new(default_noise_keywords())
    }

    #[test]
    fn test_flags_covered_warrants() {
        let c = classifier();
        assert!(c.is_noise("Chứng quyền HPG tăng mạnh", ""));
        assert!(c.is_noise("Phát hành CHPG2405", ""));
        assert!(c.is_noise("Tin thị trường", "<p>Covered Warrant   on HPG</p>"));
        assert!(c.is_noise("Thị trường PHÁI SINH", ""));
    }

    #[test]
    fn test_passes_regular_news() {
        let c = classifier();
        assert!(!c.is_noise("HPG công bố lợi nhuận quý 3", "Doanh thu tăng 10%"));
        assert!(!c.is_noise("", ""));
    }

    #[test]
    fn test_keywords_are_normalized() {
        let c = NoiseClassifier::new(["  Chứng   Quyền ", "", "  "]);
        assert_eq!(c.keywords(), &["chứng quyền".to_string()]);
    }

    #[test]
    fn test_one_shot_helper() {
        assert!(is_derivative_noise("cw.HPG.SSI.01", "", &["cw."]));
        assert!(!is_derivative_noise("HPG", "", &["cw."]));
        assert!(!is_derivative_noise::<&str>("HPG", "", &[]));
    }
}
