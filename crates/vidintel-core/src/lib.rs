//! Shared domain types and application configuration for vidintel.
//!
//! The only entity that crosses crate boundaries is [`VideoRecord`]: a raw
//! video with its statistics already merged in, as produced by the upstream
//! retrieval crate and consumed by the analysis engine. Nothing here is
//! persisted; every record lives for one request.

pub mod app_config;
pub mod config;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// A raw video record with statistics merged in.
///
/// `published_at` stays in its RFC 3339 wire form; the engine parses it and
/// rejects malformed values, so the record itself never fails to deserialize
/// over a bad timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_record_uses_camel_case_wire_keys() {
        let json = serde_json::json!({
            "id": "abc123",
            "title": "10 Secrets to Fix Your Sourdough",
            "channelTitle": "Bread Lab",
            "thumbnailUrl": "https://i.ytimg.com/vi/abc123/mqdefault.jpg",
            "publishedAt": "2026-08-27T12:00:00Z",
            "viewCount": 100_000,
            "likeCount": 5_000,
            "commentCount": 200
        });
        let record: VideoRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(record.channel_title, "Bread Lab");
        assert_eq!(record.view_count, 100_000);

        let back = serde_json::to_value(&record).expect("serialize");
        assert!(back.get("channelTitle").is_some(), "camelCase on the wire");
        assert!(back.get("channel_title").is_none());
    }
}
