use std::cmp::Reverse;
use std::collections::HashSet;

use golddigger_common::{
    Anecdote, RankedComment, SummaryResult, VideoMetadata, VideoSummary, MAX_TOP_COMMENTS,
};

use crate::extraction::Extraction;
use crate::heuristic::HeuristicScore;
use crate::keywords::mentions_family;

/// Sort key: family mentions first, then higher score. Ties keep input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey(Reverse<bool>, Reverse<u8>);

impl RankKey {
    fn new(text: &str, score: u8) -> Self {
        RankKey(Reverse(mentions_family(text)), Reverse(score))
    }
}

/// Rank a copy of `items`: pair each with its key, stable-sort the pairs,
/// drop repeated texts (first occurrence in ranked order wins).
fn rank<T: Clone>(items: &[T], text: impl Fn(&T) -> &str, score: impl Fn(&T) -> u8) -> Vec<T> {
    let mut keyed: Vec<(RankKey, &T)> = items
        .iter()
        .map(|item| (RankKey::new(text(item), score(item)), item))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    let mut seen = HashSet::new();
    keyed
        .into_iter()
        .filter(|(_, item)| seen.insert(normalize(text(*item))))
        .map(|(_, item)| item.clone())
        .collect()
}

/// Case- and whitespace-insensitive identity used for deduplication.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Family-first, then by descending sentiment; at most [`MAX_TOP_COMMENTS`].
pub fn prioritize_comments(comments: &[RankedComment]) -> Vec<RankedComment> {
    let mut ranked = rank(comments, |c| c.text.as_str(), |c| c.sentiment);
    ranked.truncate(MAX_TOP_COMMENTS);
    ranked
}

/// Family-first, then by descending stars.
pub fn prioritize_anecdotes(anecdotes: &[Anecdote]) -> Vec<Anecdote> {
    rank(anecdotes, |a| a.story.as_str(), |a| a.stars)
}

/// Combine the keyword pass with whatever the model produced.
///
/// With [`Extraction::Absent`] the ranked lists are empty and the summary
/// comes from the keyword pass. Inputs are never mutated.
pub fn merge(
    video: &VideoMetadata,
    heuristic: &HeuristicScore,
    extraction: &Extraction,
) -> SummaryResult {
    let (top_comments, anecdotes, summary) = match extraction {
        Extraction::Parsed {
            top_comments,
            anecdotes,
            summary,
        } => {
            let summary = if summary.trim().is_empty() {
                heuristic.fallback_summary()
            } else {
                summary.clone()
            };
            (
                prioritize_comments(top_comments),
                prioritize_anecdotes(anecdotes),
                summary,
            )
        }
        Extraction::Absent => (Vec::new(), Vec::new(), heuristic.fallback_summary()),
    };

    SummaryResult {
        video: VideoSummary {
            id: video.id.clone(),
            title: video.title.clone(),
            comment_count: video.comment_count,
        },
        stats: heuristic.statistics(video.view_count),
        top_comments,
        anecdotes,
        summary,
    }
}
