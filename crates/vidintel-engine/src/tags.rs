//! Qualitative tagging relative to the batch average.

use crate::config::AnalysisConfig;
use crate::types::{DerivedVideo, Tag, TaggedVideo};

/// Attach tags to each ranked video.
///
/// `avg_velocity` is the mean over the full derived batch (pre-filter,
/// pre-rank). The three tags are evaluated independently, so a video can
/// carry any subset of them; nothing else on the video is touched and the
/// ranking order is preserved.
#[must_use]
pub fn tag_batch(
    ranked: Vec<DerivedVideo>,
    avg_velocity: f64,
    config: &AnalysisConfig,
) -> Vec<TaggedVideo> {
    ranked
        .into_iter()
        .map(|video| {
            let tags = tags_for(&video, avg_velocity, config);
            TaggedVideo { video, tags }
        })
        .collect()
}

fn tags_for(video: &DerivedVideo, avg_velocity: f64, config: &AnalysisConfig) -> Vec<Tag> {
    #[allow(clippy::cast_precision_loss)]
    let velocity = video.velocity as f64;
    let mut tags = Vec::new();

    if video.is_fresh && velocity > avg_velocity {
        tags.push(Tag::Trending);
    }
    if video.engagement_rate > config.engagement_tag_threshold {
        tags.push(Tag::HighEngagement);
    }
    if velocity > avg_velocity * config.viral_multiplier {
        tags.push(Tag::ViralVelocity);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidintel_core::VideoRecord;

    fn derived(velocity: u64, engagement_rate: f64, is_fresh: bool) -> DerivedVideo {
        DerivedVideo {
            record: VideoRecord {
                id: "v".to_string(),
                title: "t".to_string(),
                channel_title: String::new(),
                thumbnail_url: String::new(),
                published_at: "2026-08-01T00:00:00Z".to_string(),
                view_count: 0,
                like_count: 0,
                comment_count: 0,
            },
            age_days: 1.0,
            velocity,
            engagement_rate,
            is_fresh,
            is_relevant: true,
        }
    }

    #[test]
    fn trending_requires_freshness_and_above_average_velocity() {
        let config = AnalysisConfig::default();
        let tagged = tag_batch(vec![derived(150, 0.0, true)], 100.0, &config);
        assert!(tagged[0].tags.contains(&Tag::Trending));

        let stale = tag_batch(vec![derived(150, 0.0, false)], 100.0, &config);
        assert!(!stale[0].tags.contains(&Tag::Trending));

        let slow = tag_batch(vec![derived(90, 0.0, true)], 100.0, &config);
        assert!(!slow[0].tags.contains(&Tag::Trending));
    }

    #[test]
    fn high_engagement_is_independent_of_velocity() {
        let config = AnalysisConfig::default();
        let tagged = tag_batch(vec![derived(1, 5.2, false)], 1_000.0, &config);
        assert_eq!(tagged[0].tags, vec![Tag::HighEngagement]);
    }

    #[test]
    fn viral_velocity_needs_double_the_average() {
        let config = AnalysisConfig::default();
        let viral = tag_batch(vec![derived(201, 0.0, false)], 100.0, &config);
        assert!(viral[0].tags.contains(&Tag::ViralVelocity));

        let exactly_double = tag_batch(vec![derived(200, 0.0, false)], 100.0, &config);
        assert!(
            !exactly_double[0].tags.contains(&Tag::ViralVelocity),
            "threshold is strictly greater than avg * 2"
        );
    }

    #[test]
    fn all_three_tags_can_stack() {
        let config = AnalysisConfig::default();
        let tagged = tag_batch(vec![derived(500, 8.0, true)], 100.0, &config);
        assert_eq!(
            tagged[0].tags,
            vec![Tag::Trending, Tag::HighEngagement, Tag::ViralVelocity]
        );
    }

    #[test]
    fn tagging_preserves_order_and_metrics() {
        let config = AnalysisConfig::default();
        let input = vec![derived(300, 1.0, true), derived(200, 2.0, true)];
        let tagged = tag_batch(input, 100.0, &config);
        assert_eq!(tagged[0].video.velocity, 300);
        assert_eq!(tagged[1].video.velocity, 200);
        assert!((tagged[1].video.engagement_rate - 2.0).abs() < f64::EPSILON);
    }
}
