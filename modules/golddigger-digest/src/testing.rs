// Test mocks for the summarization pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockVideoSource (VideoSource): HashMap-based id to video/comments, counts calls
// - MockCompletion (TextCompletion): scripted reply, error or hang
//
// Plus helpers for building videos and comment batches.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use golddigger_common::{CommentRecord, ScoringVariant, VideoMetadata};

use crate::digest::Digest;
use crate::extraction::CommentExtractor;
use crate::traits::{TextCompletion, VideoSource};

// ---------------------------------------------------------------------------
// MockVideoSource
// ---------------------------------------------------------------------------

/// In-memory video source. Unregistered ids are "not found"; the
/// `failing_*` switches turn the matching call into a transport error.
#[derive(Default)]
pub struct MockVideoSource {
    videos: HashMap<String, VideoMetadata>,
    comments: HashMap<String, Vec<CommentRecord>>,
    failing_metadata: bool,
    failing_comments: bool,
    calls: AtomicUsize,
}

impl MockVideoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_video(mut self, video: VideoMetadata, comments: Vec<CommentRecord>) -> Self {
        self.comments.insert(video.id.clone(), comments);
        self.videos.insert(video.id.clone(), video);
        self
    }

    pub fn failing_metadata(mut self) -> Self {
        self.failing_metadata = true;
        self
    }

    pub fn failing_comments(mut self) -> Self {
        self.failing_comments = true;
        self
    }

    /// Total number of provider calls made (metadata + comments).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for MockVideoSource {
    async fn video(&self, video_id: &str) -> Result<Option<VideoMetadata>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_metadata {
            return Err(anyhow!("MockVideoSource: metadata transport error"));
        }
        Ok(self.videos.get(video_id).cloned())
    }

    async fn comments(&self, video_id: &str, max: u32) -> Result<Vec<CommentRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_comments {
            return Err(anyhow!("MockVideoSource: comments transport error"));
        }
        Ok(self
            .comments
            .get(video_id)
            .map(|c| c.iter().take(max as usize).cloned().collect())
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockCompletion
// ---------------------------------------------------------------------------

enum Script {
    Reply(String),
    Fail(String),
    Hang,
}

/// Scripted completion backend. Records every user prompt it receives.
pub struct MockCompletion {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn replying(raw: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(raw.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    /// Never answers. Use with a short timeout or a cancellation token.
    pub fn hanging() -> Self {
        Self::with_script(Script::Hang)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(user.to_string());
        match &self.script {
            Script::Reply(raw) => Ok(raw.clone()),
            Script::Fail(message) => Err(anyhow!("MockCompletion: {message}")),
            Script::Hang => std::future::pending().await,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub const TEST_VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const TEST_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub fn test_video() -> VideoMetadata {
    VideoMetadata {
        id: TEST_VIDEO_ID.to_string(),
        title: "Test video".to_string(),
        view_count: 1_234_567,
        comment_count: 4_321,
    }
}

pub fn comments(texts: &[&str]) -> Vec<CommentRecord> {
    texts.iter().map(|t| CommentRecord::new(*t)).collect()
}

/// A `Digest` over the given mocks with the high-value keyword set.
pub fn digest_with(
    source: Arc<MockVideoSource>,
    completion: Option<Arc<MockCompletion>>,
) -> Digest {
    let extractor = match completion {
        Some(c) => CommentExtractor::new(c, Duration::from_secs(5)),
        None => CommentExtractor::disabled(),
    };
    Digest::new(source, extractor, ScoringVariant::HighValue, 100)
}
