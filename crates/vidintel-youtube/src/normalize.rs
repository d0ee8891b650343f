//! Normalization of YouTube API responses into the shared domain record.

use std::collections::HashMap;

use vidintel_core::VideoRecord;

use crate::types::{SearchItem, Statistics};

/// Parses a statistics count the API renders as a JSON string.
///
/// Missing or unparseable counts (hidden statistics) become 0.
#[must_use]
pub fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0)
}

/// Merges search results with their statistics into domain records.
///
/// Output follows the search-result (relevance) order. Items without a
/// video ID are dropped; items without a statistics entry keep zeroed
/// counts so the batch stays aligned with the search order.
#[must_use]
pub fn merge_batch(
    items: Vec<SearchItem>,
    stats: &HashMap<String, Statistics>,
) -> Vec<VideoRecord> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            let snippet = item.snippet;
            let thumbnail_url = snippet
                .thumbnails
                .medium
                .or(snippet.thumbnails.high)
                .or(snippet.thumbnails.default)
                .map(|t| t.url)
                .unwrap_or_default();
            let counts = stats.get(&id);

            Some(VideoRecord {
                id,
                title: snippet.title,
                channel_title: snippet.channel_title,
                thumbnail_url,
                published_at: snippet.published_at,
                view_count: parse_count(counts.and_then(|s| s.view_count.as_deref())),
                like_count: parse_count(counts.and_then(|s| s.like_count.as_deref())),
                comment_count: parse_count(counts.and_then(|s| s.comment_count.as_deref())),
            })
        })
        .collect()
}
