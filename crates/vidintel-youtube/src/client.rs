//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with YouTube-specific error handling, API key management,
//! and typed response deserialization. Non-2xx responses are parsed for the
//! API's error envelope and surfaced as [`YoutubeError::Api`], or
//! [`YoutubeError::QuotaExceeded`] when the reason points at quota limits.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode, Url};
use vidintel_core::VideoRecord;

use crate::error::YoutubeError;
use crate::normalize;
use crate::retry::retry_with_backoff;
use crate::types::{
    ErrorEnvelope, SearchItem, SearchResponse, Statistics, VideosResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// `videos.list` accepts at most 50 IDs per call.
const STATS_SHARD_SIZE: usize = 50;
/// Concurrent statistics shards in flight.
const MAX_CONCURRENT_SHARDS: usize = 4;

/// Client for the YouTube Data API v3.
///
/// Manages the HTTP client, API key, base URL, and retry policy. Use
/// [`YoutubeClient::new`] for production or [`YoutubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vidintel/0.1 (title-intelligence)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the resource instead of replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy (attempts beyond the first, back-off base).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Searches for recently published videos matching a topic.
    ///
    /// Calls `search.list` with `part=snippet`, `type=video`,
    /// `order=relevance`. `max_results` is capped at the API's per-page
    /// limit of 50.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] on quota/rate-limit rejections.
    /// - [`YoutubeError::Api`] for other API-level errors.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_videos(
        &self,
        topic: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<SearchItem>, YoutubeError> {
        let after = published_after.to_rfc3339_opts(SecondsFormat::Secs, true);
        let capped = max_results.min(50).to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("order", "relevance"),
                ("q", topic),
                ("publishedAfter", &after),
                ("maxResults", &capped),
            ],
        )?;

        let body = self.request_json(&url).await?;
        let parsed: SearchResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={topic})"),
                source: e,
            })?;
        Ok(parsed.items)
    }

    /// Fetches statistics for a set of video IDs via `videos.list`.
    ///
    /// IDs are sharded into chunks of at most 50 and the shard requests run
    /// concurrently (bounded fan-out), merged into a map keyed by video ID.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_videos`]; the first failing
    /// shard aborts the whole lookup.
    pub async fn fetch_statistics(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Statistics>, YoutubeError> {
        let shard_futures: Vec<_> = ids
            .chunks(STATS_SHARD_SIZE)
            .map(|chunk| self.fetch_statistics_shard(chunk))
            .collect();
        let shards: Vec<Result<Vec<_>, YoutubeError>> = stream::iter(shard_futures)
            .buffer_unordered(MAX_CONCURRENT_SHARDS)
            .collect()
            .await;

        let mut merged = HashMap::with_capacity(ids.len());
        for shard in shards {
            for item in shard? {
                merged.insert(item.id, item.statistics);
            }
        }
        Ok(merged)
    }

    /// Retrieves the full merged batch for a topic: search, then statistics,
    /// merged into [`VideoRecord`]s in search-result order.
    ///
    /// Both external calls are wrapped in the retry policy. The engine must
    /// not start deriving metrics until this returns, since the batch
    /// average is computed over the complete merged list.
    ///
    /// # Errors
    ///
    /// Surfaces the client error taxonomy as-is; a partial batch is never
    /// returned.
    pub async fn fetch_topic_batch(
        &self,
        topic: &str,
        window_days: u32,
        max_results: u32,
    ) -> Result<Vec<VideoRecord>, YoutubeError> {
        let published_after = Utc::now() - chrono::Duration::days(i64::from(window_days));

        let items = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.search_videos(topic, published_after, max_results)
        })
        .await?;

        let ids: Vec<String> = items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect();
        if ids.is_empty() {
            tracing::info!(topic, "search returned no video hits");
            return Ok(Vec::new());
        }

        let stats = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_statistics(&ids)
        })
        .await?;

        let records = normalize::merge_batch(items, &stats);
        tracing::debug!(topic, count = records.len(), "merged topic batch ready");
        Ok(records)
    }

    async fn fetch_statistics_shard(
        &self,
        ids: &[String],
    ) -> Result<Vec<crate::types::VideoStatsItem>, YoutubeError> {
        let joined = ids.join(",");
        let url = self.build_url("videos", &[("part", "statistics"), ("id", &joined)])?;
        let body = self.request_json(&url).await?;
        let parsed: VideosResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos(ids={})", ids.len()),
                source: e,
            })?;
        Ok(parsed.items)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters. The API key is appended last.
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(resource)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and parses the response body as JSON, mapping
    /// non-2xx statuses through the API's error envelope.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        // Context uses the path only; the full URL carries the API key.
        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: format!("GET {}", url.path()),
            source: e,
        })
    }

    /// Maps a non-2xx response to the error taxonomy.
    ///
    /// Quota and rate-limit reasons on a 403 become
    /// [`YoutubeError::QuotaExceeded`]; everything else keeps the status,
    /// first reason, and message.
    fn api_error(status: StatusCode, body: &str) -> YoutubeError {
        let (reason, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let reason = envelope
                    .error
                    .errors
                    .first()
                    .map(|d| d.reason.clone())
                    .unwrap_or_default();
                (reason, envelope.error.message)
            }
            Err(_) => (String::new(), body.chars().take(200).collect()),
        };

        if status == StatusCode::FORBIDDEN
            && (reason.contains("quota") || reason.contains("rateLimit"))
        {
            return YoutubeError::QuotaExceeded(message);
        }

        YoutubeError::Api {
            status: status.as_u16(),
            reason,
            message,
        }
    }
}
