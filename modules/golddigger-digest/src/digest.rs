use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use golddigger_common::{Config, DigestError, ScoringVariant, SummaryResult};

use crate::extraction::CommentExtractor;
use crate::heuristic;
use crate::keywords::KeywordSet;
use crate::prioritize::merge;
use crate::traits::VideoSource;
use crate::video_id;

/// One-endpoint summarization pipeline: fetch, score, extract, merge.
///
/// Stateless across calls; each `summarize` owns its own batch and results.
#[derive(Clone)]
pub struct Digest {
    source: Arc<dyn VideoSource>,
    extractor: CommentExtractor,
    keywords: KeywordSet,
    max_comments: u32,
}

impl Digest {
    pub fn new(
        source: Arc<dyn VideoSource>,
        extractor: CommentExtractor,
        variant: ScoringVariant,
        max_comments: u32,
    ) -> Self {
        Self {
            source,
            extractor,
            keywords: KeywordSet::for_variant(variant),
            max_comments,
        }
    }

    /// Wire the real YouTube and Claude clients from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source = Arc::new(
            youtube_client::YouTubeClient::new(config.youtube_api_key.clone())
                .context("failed to build YouTube client")?,
        );

        let extractor = match config.anthropic_api_key {
            Some(ref key) => {
                let claude = ai_client::Claude::new(key.clone(), config.anthropic_model.clone())
                    .with_timeout(config.extraction_timeout)
                    .context("failed to build Claude client")?;
                CommentExtractor::new(Arc::new(claude), config.extraction_timeout)
            }
            None => {
                warn!("ANTHROPIC_API_KEY not set, extraction disabled");
                CommentExtractor::disabled()
            }
        };

        Ok(Self::new(
            source,
            extractor,
            config.scoring_variant,
            config.max_comments,
        ))
    }

    /// Summarize the comments of the video referenced by `url`.
    ///
    /// Cancelling `cancel` only aborts the model call; the keyword statistics
    /// are still returned.
    pub async fn summarize(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<SummaryResult, DigestError> {
        let video_id =
            video_id::parse(url).ok_or_else(|| DigestError::InvalidInput(url.to_string()))?;

        let (video, comments) = tokio::join!(
            self.source.video(&video_id),
            self.source.comments(&video_id, self.max_comments),
        );

        let video = video
            .with_context(|| format!("fetching metadata for {video_id}"))
            .map_err(|e| {
                warn!(
                    video_id = video_id.as_str(),
                    error = %format!("{e:#}"),
                    "Video metadata fetch failed"
                );
                DigestError::DependencyFailure(e)
            })?
            .ok_or_else(|| DigestError::NotFound(video_id.clone()))?;

        let comments = comments
            .with_context(|| format!("fetching comments for {video_id}"))
            .map_err(|e| {
                warn!(
                    video_id = video_id.as_str(),
                    error = %format!("{e:#}"),
                    "Comment fetch failed"
                );
                DigestError::DependencyFailure(e)
            })?;

        let texts: Vec<String> = comments.into_iter().map(|c| c.text).collect();
        let score = heuristic::score(&texts, &self.keywords);
        info!(
            video_id = video_id.as_str(),
            keyword_set = self.keywords.name,
            total = score.total,
            high_value = score.high_value_count,
            ratio = score.ratio.as_str(),
            "Heuristic scoring complete"
        );

        let extraction = self.extractor.extract(&texts, cancel).await;
        let result = merge(&video, &score, &extraction);

        info!(
            video_id = video_id.as_str(),
            top_comments = result.top_comments.len(),
            anecdotes = result.anecdotes.len(),
            extracted = !extraction.is_absent(),
            "Summary built"
        );

        Ok(result)
    }
}
