use golddigger_common::{format_thousands, Statistics};

use crate::keywords::KeywordSet;

/// How many filtered comments make it into the fallback summary.
const FALLBACK_THEMES: usize = 3;
/// Per-comment character cap in the fallback summary.
const THEME_MAX_CHARS: usize = 80;

/// Result of the local keyword pass over a comment batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicScore {
    pub total: usize,
    pub high_value_count: usize,
    /// One-decimal percentage, or "0" when `total` is zero.
    pub ratio: String,
    /// Matching comments in their original order.
    pub filtered: Vec<String>,
}

/// Classify every comment against the active keyword set. Never fails.
pub fn score<S: AsRef<str>>(comments: &[S], keywords: &KeywordSet) -> HeuristicScore {
    let filtered: Vec<String> = comments
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| keywords.matches(c))
        .map(str::to_string)
        .collect();

    let total = comments.len();
    let high_value_count = filtered.len();

    HeuristicScore {
        total,
        high_value_count,
        ratio: format_ratio(high_value_count, total),
        filtered,
    }
}

/// `count / total` as a percentage with one decimal place; "0" for an empty total.
///
/// Rounded in integer tenths of a percent, with exact ties going up
/// (1 of 16 is "6.3", not the half-to-even "6.2").
pub fn format_ratio(count: usize, total: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }
    let scaled = count as u64 * 1000;
    let total = total as u64;
    let mut tenths = scaled / total;
    if 2 * (scaled % total) >= total {
        tenths += 1;
    }
    format!("{}.{}", tenths / 10, tenths % 10)
}

impl HeuristicScore {
    pub fn statistics(&self, view_count: u64) -> Statistics {
        Statistics {
            total_views: format_thousands(view_count),
            total_comments: self.total,
            high_value_count: self.high_value_count,
            high_value_ratio: self.ratio.clone(),
        }
    }

    /// Plain-text summary built only from the keyword pass, used whenever the
    /// model summary is unavailable.
    pub fn fallback_summary(&self) -> String {
        let themes = self
            .filtered
            .iter()
            .take(FALLBACK_THEMES)
            .map(|c| format!("• \"{}\"", truncate_with_ellipsis(c, THEME_MAX_CHARS)))
            .collect::<Vec<_>>()
            .join("\n");

        let themes = if themes.is_empty() {
            "No strong signals detected.".to_string()
        } else {
            themes
        };

        format!(
            "Found {} high-value comments out of {} total.\n\nTop themes:\n{}\n\nSignal: {}% of comments contain praise, gratitude, or actionable feedback.",
            self.high_value_count, self.total, themes, self.ratio
        )
    }
}

/// Keep the first `max_chars` characters, appending "..." if anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
