//! Best-effort comment extraction through a language model.
//!
//! The model is asked for one JSON object with ranked comments, anecdotes and
//! a summary. Anything that goes wrong (transport error, timeout, cancellation,
//! empty or malformed output) collapses into [`Extraction::Absent`]; the
//! failure is logged and never reaches the caller.

use std::sync::Arc;
use std::time::Duration;

use ai_client::{strip_code_blocks, truncate_to_char_boundary};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use golddigger_common::{Anecdote, RankedComment, MAX_TOP_COMMENTS};

use crate::traits::TextCompletion;

/// Byte budget for the serialized comment batch.
const MAX_PROMPT_BYTES: usize = 30_000;

pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You analyze YouTube comments and pick out the ones worth reading.

You will receive a numbered list of top-level comments from one video.

Return ONE JSON object and nothing else: no prose, no markdown, no code fences.

Shape:
{
  "summary": "2-4 sentences on what viewers are saying",
  "topComments": [{"text": "verbatim comment", "sentiment": 0-5}],
  "anecdotes": [{"story": "one-sentence retelling of a personal outcome", "stars": 1-5}]
}

## topComments
- At most 20 entries, best first.
- Copy comment text verbatim.
- sentiment is an integer: 0 = hostile or useless, 5 = glowing praise or highly actionable feedback.

## anecdotes
- Personal stories of a remedy, fix or outcome ("my knee pain went away after...", "this fixed my build").
- stars is an integer: 1 = vague, 5 = specific, first-hand and detailed.
- Leave the list empty if there are none. Do not invent stories.

## Priority
Comments and stories that mention family or close relationships (mom, dad, grandma, sister, wife, friend, neighbor...) matter most. Rank them first."#;

// =============================================================================
// Result types
// =============================================================================

/// Outcome of the extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Parsed {
        top_comments: Vec<RankedComment>,
        anecdotes: Vec<Anecdote>,
        summary: String,
    },
    /// The model was unavailable or its output unusable.
    Absent,
}

impl Extraction {
    pub fn is_absent(&self) -> bool {
        matches!(self, Extraction::Absent)
    }
}

/// Why an extraction attempt produced nothing. Logged, never surfaced.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("model returned an empty response")]
    Empty,

    #[error("model returned malformed output: {0}")]
    Malformed(String),

    #[error("model call failed: {0:#}")]
    Upstream(anyhow::Error),

    #[error("model call timed out after {0:?}")]
    TimedOut(Duration),

    #[error("model call cancelled")]
    Cancelled,
}

// =============================================================================
// Wire parsing
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireExtraction {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default, alias = "top_comments")]
    top_comments: Option<Vec<Value>>,
    #[serde(default)]
    anecdotes: Option<Vec<Value>>,
}

/// Parse raw model output. Code fences are stripped first.
pub fn parse_response(raw: &str) -> Result<Extraction, ExtractionFailure> {
    let body = strip_code_blocks(raw);
    if body.is_empty() {
        return Err(ExtractionFailure::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ExtractionFailure::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ExtractionFailure::Malformed("expected a JSON object".into()));
    }

    let wire: WireExtraction =
        serde_json::from_value(value).map_err(|e| ExtractionFailure::Malformed(e.to_string()))?;
    if wire.summary.is_none() && wire.top_comments.is_none() && wire.anecdotes.is_none() {
        return Err(ExtractionFailure::Malformed(
            "none of summary, topComments, anecdotes present".into(),
        ));
    }

    let mut top_comments: Vec<RankedComment> = wire
        .top_comments
        .unwrap_or_default()
        .iter()
        .filter_map(|item| {
            let text = item_text(item, &["text", "comment"])?;
            let sentiment = item_score(item, "sentiment", 0, 5);
            Some(RankedComment { text, sentiment })
        })
        .collect();
    top_comments.truncate(MAX_TOP_COMMENTS);

    let anecdotes: Vec<Anecdote> = wire
        .anecdotes
        .unwrap_or_default()
        .iter()
        .filter_map(|item| {
            let story = item_text(item, &["story", "text"])?;
            let stars = item_score(item, "stars", 1, 5);
            Some(Anecdote { story, stars })
        })
        .collect();

    Ok(Extraction::Parsed {
        top_comments,
        anecdotes,
        summary: wire.summary.unwrap_or_default().trim().to_string(),
    })
}

/// Text of a list entry: a bare string, or the first non-empty string field
/// among `keys`.
fn item_text(item: &Value, keys: &[&str]) -> Option<String> {
    let text = match item {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => keys.iter().find_map(|k| map.get(*k).and_then(Value::as_str)),
        _ => None,
    }?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Numeric score of a list entry, clamped to `[min, max]`. Accepts integers,
/// floats (rounded) and numeric strings; anything else scores `min`.
fn item_score(item: &Value, key: &str, min: u8, max: u8) -> u8 {
    let raw = match item.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() => v.round().clamp(min as f64, max as f64) as u8,
        _ => min,
    }
}

/// Numbered, newline-joined comment list, capped at [`MAX_PROMPT_BYTES`].
pub fn serialize_batch<S: AsRef<str>>(comments: &[S]) -> String {
    let joined = comments
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let flat = c.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{}. {}", i + 1, flat)
        })
        .collect::<Vec<_>>()
        .join("\n");
    truncate_to_char_boundary(&joined, MAX_PROMPT_BYTES).to_string()
}

// =============================================================================
// CommentExtractor
// =============================================================================

/// Wraps an optional completion backend with timeout, cancellation and
/// fail-soft parsing.
#[derive(Clone)]
pub struct CommentExtractor {
    completion: Option<Arc<dyn TextCompletion>>,
    timeout: Duration,
}

impl CommentExtractor {
    pub fn new(completion: Arc<dyn TextCompletion>, timeout: Duration) -> Self {
        Self {
            completion: Some(completion),
            timeout,
        }
    }

    /// An extractor that always yields [`Extraction::Absent`].
    pub fn disabled() -> Self {
        Self {
            completion: None,
            timeout: Duration::ZERO,
        }
    }

    /// Run the extraction. Never fails; see [`ExtractionFailure`] for what gets logged.
    pub async fn extract<S: AsRef<str>>(
        &self,
        comments: &[S],
        cancel: &CancellationToken,
    ) -> Extraction {
        let Some(completion) = self.completion.as_ref() else {
            debug!("Extraction disabled, using heuristic output only");
            return Extraction::Absent;
        };
        if comments.is_empty() {
            debug!("No comments to extract from");
            return Extraction::Absent;
        }

        match self.try_extract(completion.as_ref(), comments, cancel).await {
            Ok(extraction) => {
                if let Extraction::Parsed {
                    ref top_comments,
                    ref anecdotes,
                    ..
                } = extraction
                {
                    info!(
                        top_comments = top_comments.len(),
                        anecdotes = anecdotes.len(),
                        "Extraction parsed"
                    );
                }
                extraction
            }
            Err(ExtractionFailure::Cancelled) => {
                info!("Extraction cancelled, returning heuristic output");
                Extraction::Absent
            }
            Err(failure) => {
                warn!(error = %failure, "Extraction unavailable, returning heuristic output");
                Extraction::Absent
            }
        }
    }

    async fn try_extract<S: AsRef<str>>(
        &self,
        completion: &dyn TextCompletion,
        comments: &[S],
        cancel: &CancellationToken,
    ) -> Result<Extraction, ExtractionFailure> {
        let user_prompt = format!(
            "Comments ({} total):\n\n{}",
            comments.len(),
            serialize_batch(comments)
        );

        let call = tokio::time::timeout(
            self.timeout,
            completion.complete(EXTRACTION_SYSTEM_PROMPT, &user_prompt),
        );

        let raw = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ExtractionFailure::Cancelled),
            result = call => match result {
                Err(_) => return Err(ExtractionFailure::TimedOut(self.timeout)),
                Ok(Err(e)) => return Err(ExtractionFailure::Upstream(e)),
                Ok(Ok(raw)) => raw,
            },
        };

        debug!(bytes = raw.len(), "Extraction response received");
        parse_response(&raw)
    }
}
