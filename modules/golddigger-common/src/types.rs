use serde::{Deserialize, Serialize};

/// Upper bound on ranked comments returned to the caller.
pub const MAX_TOP_COMMENTS: usize = 20;

// --- Provider-side types ---

/// Video metadata as reported by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub view_count: u64,
    pub comment_count: u64,
}

/// One top-level comment from the comment source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl CommentRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
        }
    }
}

// --- Model-extracted types ---

/// A comment the extraction model picked out, scored 0-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedComment {
    pub text: String,
    pub sentiment: u8,
}

/// A personal remedy/outcome story, rated 1-5 stars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anecdote {
    pub story: String,
    pub stars: u8,
}

// --- Response types ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    /// Comment count reported by the provider; the scored sample may be smaller.
    pub comment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// View count with thousands separators, e.g. "1,234,567".
    pub total_views: String,
    pub total_comments: usize,
    pub high_value_count: usize,
    /// Percentage with one decimal place ("66.7"), or "0" for an empty sample.
    pub high_value_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub video: VideoSummary,
    pub stats: Statistics,
    pub top_comments: Vec<RankedComment>,
    pub anecdotes: Vec<Anecdote>,
    pub summary: String,
}

/// Format a count with comma thousands separators.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
