//! Per-record metric derivation and the batch velocity average.

use chrono::{DateTime, Utc};
use vidintel_core::VideoRecord;

use crate::config::{AnalysisConfig, TopicTokens};
use crate::error::EngineError;
use crate::types::DerivedVideo;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Round to two decimal places.
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive metrics for every record in the batch, order preserved.
///
/// Output length always equals input length; nothing is filtered here.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimestamp`] if a record carries a
/// `publishedAt` value that is not valid RFC 3339.
pub fn derive_batch(
    batch: &[VideoRecord],
    tokens: &TopicTokens,
    config: &AnalysisConfig,
    now: DateTime<Utc>,
) -> Result<Vec<DerivedVideo>, EngineError> {
    batch
        .iter()
        .map(|record| derive_one(record, tokens, config, now))
        .collect()
}

fn derive_one(
    record: &VideoRecord,
    tokens: &TopicTokens,
    config: &AnalysisConfig,
    now: DateTime<Utc>,
) -> Result<DerivedVideo, EngineError> {
    let published = DateTime::parse_from_rfc3339(&record.published_at).map_err(|e| {
        EngineError::InvalidTimestamp {
            id: record.id.clone(),
            reason: e.to_string(),
        }
    })?;

    #[allow(clippy::cast_precision_loss)]
    let raw_age = (now - published.with_timezone(&Utc)).num_seconds() as f64 / SECONDS_PER_DAY;
    let age_days = raw_age.max(config.min_age_days);

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let velocity = (record.view_count as f64 / age_days).round() as u64;

    let engagement_rate = if record.view_count == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let rate = (record.like_count + record.comment_count) as f64
            / record.view_count as f64
            * 100.0;
        round2(rate)
    };

    let is_relevant = tokens.matches_title(&record.title.to_lowercase());

    Ok(DerivedVideo {
        record: record.clone(),
        age_days,
        velocity,
        engagement_rate,
        is_fresh: age_days < config.fresh_window_days,
        is_relevant,
    })
}

/// Mean velocity over the **full** derived list, before any filtering.
///
/// This is the baseline every Trending/Viral Velocity comparison uses; it
/// must represent the whole fetched batch, not just the survivors. Returns
/// `0.0` for an empty list.
#[must_use]
pub fn avg_velocity(derived: &[DerivedVideo]) -> f64 {
    if derived.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = derived.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let sum: f64 = derived.iter().map(|v| v.velocity as f64).sum();
    sum / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str, title: &str, published_at: String, views: u64) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: title.to_string(),
            channel_title: "Test Channel".to_string(),
            thumbnail_url: String::new(),
            published_at,
            view_count: views,
            like_count: 0,
            comment_count: 0,
        }
    }

    fn derive(record: &VideoRecord, topic: &str, now: DateTime<Utc>) -> DerivedVideo {
        let config = AnalysisConfig::default();
        let tokens = TopicTokens::new(topic, config.min_token_len);
        derive_batch(std::slice::from_ref(record), &tokens, &config, now)
            .expect("derive")
            .remove(0)
    }

    #[test]
    fn age_is_floored_for_just_published_videos() {
        let now = Utc::now();
        let r = record("a", "sourdough", now.to_rfc3339(), 1_000);
        let d = derive(&r, "sourdough", now);
        assert!(d.age_days >= 0.5, "age must never drop below the floor");
        assert_eq!(d.velocity, 2_000, "1000 views / 0.5 days");
    }

    #[test]
    fn one_hour_old_video_velocity_uses_floor() {
        let now = Utc::now();
        let r = record("a", "sourdough", (now - Duration::hours(1)).to_rfc3339(), 1_000);
        let d = derive(&r, "sourdough", now);
        assert!((d.age_days - 0.5).abs() < f64::EPSILON);
        assert_eq!(d.velocity, 2_000);
    }

    #[test]
    fn zero_views_yield_zero_engagement() {
        let now = Utc::now();
        let mut r = record("a", "sourdough", (now - Duration::days(3)).to_rfc3339(), 0);
        r.like_count = 10;
        r.comment_count = 5;
        let d = derive(&r, "sourdough", now);
        assert!((d.engagement_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn engagement_rate_is_rounded_to_two_decimals() {
        let now = Utc::now();
        let mut r = record("a", "sourdough", (now - Duration::days(3)).to_rfc3339(), 100_000);
        r.like_count = 5_000;
        r.comment_count = 200;
        let d = derive(&r, "sourdough", now);
        assert!((d.engagement_rate - 5.2).abs() < f64::EPSILON);
        assert_eq!(d.velocity, 33_333);
        assert!((d.age_days - 3.0).abs() < 1e-9);
        assert!(d.is_fresh);
    }

    #[test]
    fn relevance_is_permissive_substring_match() {
        let now = Utc::now();
        let r = record("a", "Best CATEGORY tricks", (now - Duration::days(1)).to_rfc3339(), 100);
        let d = derive(&r, "cat", now);
        assert!(d.is_relevant, "token 'cat' should match inside 'category'");
    }

    #[test]
    fn eight_day_old_video_is_not_fresh() {
        let now = Utc::now();
        let r = record("a", "sourdough", (now - Duration::days(8)).to_rfc3339(), 100);
        let d = derive(&r, "sourdough", now);
        assert!(!d.is_fresh);
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let config = AnalysisConfig::default();
        let tokens = TopicTokens::new("sourdough", config.min_token_len);
        let r = record("bad", "sourdough", "yesterday-ish".to_string(), 100);
        let result = derive_batch(&[r], &tokens, &config, Utc::now());
        assert!(
            matches!(result, Err(EngineError::InvalidTimestamp { ref id, .. }) if id == "bad"),
            "expected InvalidTimestamp, got: {result:?}"
        );
    }

    #[test]
    fn avg_velocity_of_empty_list_is_zero() {
        assert!((avg_velocity(&[]) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn derive_batch_preserves_order_and_length() {
        let now = Utc::now();
        let batch: Vec<VideoRecord> = (0..4)
            .map(|i| {
                record(
                    &format!("id-{i}"),
                    "sourdough tips",
                    (now - Duration::days(i64::from(i) + 1)).to_rfc3339(),
                    1_000,
                )
            })
            .collect();
        let config = AnalysisConfig::default();
        let tokens = TopicTokens::new("sourdough", config.min_token_len);
        let derived = derive_batch(&batch, &tokens, &config, now).expect("derive");
        assert_eq!(derived.len(), 4);
        for (i, d) in derived.iter().enumerate() {
            assert_eq!(d.record.id, format!("id-{i}"));
        }
    }
}
