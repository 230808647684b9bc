use serde::Deserialize;

// --- videos.list ---

/// Response envelope for `GET /videos?part=snippet,statistics`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
}

/// The API encodes counters as decimal strings. `commentCount` is omitted
/// when comments are disabled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub comment_count: Option<String>,
}

/// A video with its counters parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub view_count: u64,
    pub comment_count: u64,
}

impl VideoItem {
    pub fn into_video(self) -> Video {
        Video {
            id: self.id,
            title: self.snippet.title,
            view_count: parse_count(self.statistics.view_count.as_deref()),
            comment_count: parse_count(self.statistics.comment_count.as_deref()),
        }
    }
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

// --- commentThreads.list ---

/// Response envelope for `GET /commentThreads?part=snippet`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    pub text_original: Option<String>,
    pub author_display_name: Option<String>,
}

/// A top-level comment, flattened out of its thread envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub author: Option<String>,
}

impl CommentThread {
    /// Prefer `textOriginal` (the author's raw text) over the rendered display text.
    pub fn into_comment(self) -> Comment {
        let snippet = self.snippet.top_level_comment.snippet;
        let text = snippet
            .text_original
            .filter(|t| !t.is_empty())
            .unwrap_or(snippet.text_display);
        Comment {
            text,
            author: snippet.author_display_name,
        }
    }
}

// --- errors ---

/// Google API error envelope: `{"error": {"code", "message", "errors": [{"reason"}]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub reason: String,
}

impl ErrorEnvelope {
    pub fn reason(&self) -> &str {
        self.error
            .errors
            .first()
            .map(|e| e.reason.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_counts_parse_from_strings() {
        let raw = r#"{
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {"title": "Never Gonna Give You Up", "channelTitle": "Rick Astley"},
                "statistics": {"viewCount": "1234567", "likeCount": "10", "commentCount": "2300"}
            }]
        }"#;
        let resp: VideoListResponse = serde_json::from_str(raw).unwrap();
        let video = resp.items.into_iter().next().unwrap().into_video();
        assert_eq!(video.title, "Never Gonna Give You Up");
        assert_eq!(video.view_count, 1_234_567);
        assert_eq!(video.comment_count, 2300);
    }

    #[test]
    fn missing_comment_count_is_zero() {
        let raw = r#"{"items": [{"id": "abc", "snippet": {"title": "t"}, "statistics": {"viewCount": "5"}}]}"#;
        let resp: VideoListResponse = serde_json::from_str(raw).unwrap();
        let video = resp.items.into_iter().next().unwrap().into_video();
        assert_eq!(video.comment_count, 0);
        assert_eq!(video.view_count, 5);
    }

    #[test]
    fn empty_video_list_has_no_items() {
        let resp: VideoListResponse =
            serde_json::from_str(r#"{"kind": "youtube#videoListResponse"}"#).unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn comment_prefers_original_text() {
        let raw = r#"{
            "snippet": {"topLevelComment": {"snippet": {
                "textDisplay": "Tom &amp; Jerry",
                "textOriginal": "Tom & Jerry",
                "authorDisplayName": "@viewer"
            }}}
        }"#;
        let thread: CommentThread = serde_json::from_str(raw).unwrap();
        let comment = thread.into_comment();
        assert_eq!(comment.text, "Tom & Jerry");
        assert_eq!(comment.author.as_deref(), Some("@viewer"));
    }

    #[test]
    fn error_envelope_reason() {
        let raw = r#"{"error": {"code": 403, "message": "disabled", "errors": [{"reason": "commentsDisabled"}]}}"#;
        let env: ErrorEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(env.reason(), "commentsDisabled");
    }
}
