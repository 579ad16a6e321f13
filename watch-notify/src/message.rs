//! Alert message layout

/// Longest snippet carried in a message, in characters
pub const SNIPPET_MAX_CHARS: usize = 280;

/// Render the alert for one analysed item
///
/// `snippet` is expected to be HTML-free already. The outlet line is only
/// present when the feed named one.
pub fn format_message(
    label: &str,
    title: &str,
    snippet: &str,
    analysis: &str,
    link: &str,
    outlet: Option<&str>,
) -> String {
    let snippet: String = snippet.trim().chars().take(SNIPPET_MAX_CHARS).collect();
    let outlet = match outlet.map(str::trim).filter(|o| !o.is_empty()) {
        Some(name) => format!("Nguồn: {}\n", name),
        None => String::new(),
    };
    format!(
        "🔔 TIN CỔ PHIẾU {}\n\n{}\n\nSnippet: {}\n\n{}\n\n{}Xem gốc: {}",
        label, title, snippet, analysis, outlet, link
    )
}
