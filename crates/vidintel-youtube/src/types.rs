//! Wire types for the YouTube Data API v3 responses this client consumes.

use serde::Deserialize;

/// `search.list` response body (`part=snippet`).
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: Snippet,
}

/// The API nests the video ID; `videoId` can be absent for non-video hits
/// even with `type=video` requested, so it stays optional and normalization
/// drops such items.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// `videos.list` response body (`part=statistics`).
#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub items: Vec<VideoStatsItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoStatsItem {
    pub id: String,
    #[serde(default)]
    pub statistics: Statistics,
}

/// Statistics arrive as JSON strings, and channels can hide individual
/// counts entirely; missing counts normalize to 0 rather than dropping the
/// record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// Error envelope the API wraps non-2xx responses in.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub reason: String,
}
