pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{Comment, Video};

use std::time::Duration;

use serde::de::DeserializeOwned;
use types::{CommentThreadListResponse, ErrorEnvelope, VideoListResponse};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The API caps `maxResults` for commentThreads at 100.
pub const MAX_COMMENT_RESULTS: u32 = 100;

/// Error reason returned when the uploader has turned comments off.
const COMMENTS_DISABLED: &str = "commentsDisabled";

pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch title and counters for one video. `Ok(None)` when no video has this id.
    pub async fn video(&self, video_id: &str) -> Result<Option<Video>> {
        let url = format!("{}/videos", self.base_url);
        let resp: VideoListResponse = self
            .get(&url, &[("part", "snippet,statistics"), ("id", video_id)])
            .await?;

        let video = resp.items.into_iter().next().map(|item| item.into_video());
        tracing::debug!(video_id, found = video.is_some(), "Fetched video metadata");
        Ok(video)
    }

    /// Fetch the first page of top-level comments, most relevant first.
    ///
    /// Returns an empty list when comments are disabled on the video.
    pub async fn comment_threads(&self, video_id: &str, max_results: u32) -> Result<Vec<Comment>> {
        let max_results = max_results.clamp(1, MAX_COMMENT_RESULTS).to_string();
        let url = format!("{}/commentThreads", self.base_url);
        let result: Result<CommentThreadListResponse> = self
            .get(
                &url,
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", max_results.as_str()),
                    ("textFormat", "plainText"),
                ],
            )
            .await;

        match result {
            Ok(resp) => {
                let comments: Vec<Comment> =
                    resp.items.into_iter().map(|t| t.into_comment()).collect();
                tracing::debug!(
                    video_id,
                    count = comments.len(),
                    has_more = resp.next_page_token.is_some(),
                    "Fetched comment threads"
                );
                Ok(comments)
            }
            Err(YouTubeError::Api { ref reason, .. }) if reason == COMMENTS_DISABLED => {
                tracing::info!(video_id, "Comments are disabled for this video");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let (reason, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.reason().to_string(), envelope.error.message),
                Err(_) => (String::new(), body),
            };
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                reason,
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> YouTubeClient {
        YouTubeClient::new("test-key".to_string())
            .unwrap()
            .with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn video_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "dQw4w9WgXcQ"))
            .and(query_param("key", "test-key"))
            .and(query_param("part", "snippet,statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "dQw4w9WgXcQ",
                    "snippet": {"title": "A video"},
                    "statistics": {"viewCount": "42", "commentCount": "7"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let video = client_for(&server).await.video("dQw4w9WgXcQ").await.unwrap();
        assert_eq!(
            video,
            Some(Video {
                id: "dQw4w9WgXcQ".into(),
                title: "A video".into(),
                view_count: 42,
                comment_count: 7,
            })
        );
    }

    #[tokio::test]
    async fn video_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})),
            )
            .mount(&server)
            .await;

        let video = client_for(&server).await.video("aaaaaaaaaaa").await.unwrap();
        assert!(video.is_none());
    }

    #[tokio::test]
    async fn comment_threads_flattened_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("videoId", "dQw4w9WgXcQ"))
            .and(query_param("maxResults", "100"))
            .and(query_param("textFormat", "plainText"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "first", "authorDisplayName": "@a"}}}},
                    {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "second"}}}}
                ],
                "nextPageToken": "abc"
            })))
            .mount(&server)
            .await;

        let comments = client_for(&server)
            .await
            .comment_threads("dQw4w9WgXcQ", 500)
            .await
            .unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[0].author.as_deref(), Some("@a"));
        assert_eq!(comments[1].text, "second");
        assert!(comments[1].author.is_none());
    }

    #[tokio::test]
    async fn comments_disabled_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {
                    "code": 403,
                    "message": "The video has disabled comments.",
                    "errors": [{"reason": "commentsDisabled"}]
                }
            })))
            .mount(&server)
            .await;

        let comments = client_for(&server)
            .await
            .comment_threads("dQw4w9WgXcQ", 100)
            .await
            .unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn quota_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {
                    "code": 403,
                    "message": "quota",
                    "errors": [{"reason": "quotaExceeded"}]
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.video("dQw4w9WgXcQ").await.unwrap_err();
        match err {
            YouTubeError::Api { status, reason, .. } => {
                assert_eq!(status, 403);
                assert_eq!(reason, "quotaExceeded");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_kept_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.video("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(
            err,
            YouTubeError::Api { status: 502, ref message, .. } if message == "bad gateway"
        ));
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_api_key() {
        let client = YouTubeClient::new("SECRET-KEY-123".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:1");

        let err = client.video("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, YouTubeError::Network(_)));
        let text = err.to_string();
        assert!(!text.contains("SECRET-KEY-123"), "key leaked: {text}");
        assert!(!text.contains("key="), "query leaked: {text}");
    }
}
