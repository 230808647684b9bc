// Trait seams for the summarization pipeline.
//
// VideoSource: video metadata plus the first page of top-level comments.
// TextCompletion: one system prompt + one user message in, free-form text out.
//
// Real implementations wrap youtube_client::YouTubeClient and ai_client::Claude;
// testing.rs has in-memory mocks so the pipeline runs with no network.

use anyhow::Result;
use async_trait::async_trait;

use golddigger_common::{CommentRecord, VideoMetadata};

// ---------------------------------------------------------------------------
// VideoSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Metadata for one video. `Ok(None)` means the video does not exist.
    async fn video(&self, video_id: &str) -> Result<Option<VideoMetadata>>;

    /// Up to `max` top-level comments, in provider order.
    async fn comments(&self, video_id: &str, max: u32) -> Result<Vec<CommentRecord>>;
}

#[async_trait]
impl VideoSource for youtube_client::YouTubeClient {
    async fn video(&self, video_id: &str) -> Result<Option<VideoMetadata>> {
        let video = self.video(video_id).await?;
        Ok(video.map(|v| VideoMetadata {
            id: v.id,
            title: v.title,
            view_count: v.view_count,
            comment_count: v.comment_count,
        }))
    }

    async fn comments(&self, video_id: &str, max: u32) -> Result<Vec<CommentRecord>> {
        let comments = self.comment_threads(video_id, max).await?;
        Ok(comments
            .into_iter()
            .map(|c| CommentRecord {
                text: c.text,
                author: c.author,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// TextCompletion
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl TextCompletion for ai_client::Claude {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        Ok(self.chat_completion(system, user).await?)
    }
}
