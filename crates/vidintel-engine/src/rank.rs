//! Relevance/noise filter and the bounded stable ranking.

use crate::config::AnalysisConfig;
use crate::types::DerivedVideo;

/// Keep only records relevant to the topic and above the velocity floor.
///
/// Relaxing the floor can only ever add records back; the filtered set is
/// always a subsequence of the derived set.
#[must_use]
pub fn filter_relevant(derived: Vec<DerivedVideo>, config: &AnalysisConfig) -> Vec<DerivedVideo> {
    derived
        .into_iter()
        .filter(|v| v.is_relevant && v.velocity > config.velocity_floor)
        .collect()
}

/// Sort by velocity descending and truncate to the working-set bound.
///
/// The sort is stable: equal velocities retain their filtered order. This
/// bounded set is the only input the tagger, keyword weigher, and structure
/// classifier ever see.
#[must_use]
pub fn rank(mut filtered: Vec<DerivedVideo>, config: &AnalysisConfig) -> Vec<DerivedVideo> {
    filtered.sort_by(|a, b| b.velocity.cmp(&a.velocity));
    filtered.truncate(config.max_ranked);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidintel_core::VideoRecord;

    fn derived(id: &str, velocity: u64, is_relevant: bool) -> DerivedVideo {
        DerivedVideo {
            record: VideoRecord {
                id: id.to_string(),
                title: format!("video {id}"),
                channel_title: String::new(),
                thumbnail_url: String::new(),
                published_at: "2026-08-01T00:00:00Z".to_string(),
                view_count: velocity,
                like_count: 0,
                comment_count: 0,
            },
            age_days: 1.0,
            velocity,
            engagement_rate: 0.0,
            is_fresh: true,
            is_relevant,
        }
    }

    #[test]
    fn filter_drops_irrelevant_and_slow_videos() {
        let config = AnalysisConfig::default();
        let input = vec![
            derived("keep", 100, true),
            derived("irrelevant", 100, false),
            derived("too-slow", 5, true),
            derived("dead", 0, true),
        ];
        let kept = filter_relevant(input, &config);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].record.id, "keep");
    }

    #[test]
    fn relaxing_the_floor_is_monotone() {
        let loose = AnalysisConfig {
            velocity_floor: 0,
            ..AnalysisConfig::default()
        };
        let strict = AnalysisConfig::default();

        let input = vec![
            derived("a", 100, true),
            derived("b", 3, true),
            derived("c", 6, true),
        ];
        let strict_ids: Vec<String> = filter_relevant(input.clone(), &strict)
            .into_iter()
            .map(|v| v.record.id)
            .collect();
        let loose_ids: Vec<String> = filter_relevant(input, &loose)
            .into_iter()
            .map(|v| v.record.id)
            .collect();
        for id in &strict_ids {
            assert!(loose_ids.contains(id), "floor=0 must retain {id}");
        }
        assert!(loose_ids.len() >= strict_ids.len());
    }

    #[test]
    fn rank_is_stable_for_equal_velocities() {
        let config = AnalysisConfig::default();
        let input = vec![
            derived("first", 50, true),
            derived("second", 50, true),
            derived("fast", 200, true),
        ];
        let ranked = rank(input, &config);
        let ids: Vec<&str> = ranked.iter().map(|v| v.record.id.as_str()).collect();
        assert_eq!(ids, vec!["fast", "first", "second"]);
    }

    #[test]
    fn rank_truncates_to_the_bound() {
        let config = AnalysisConfig::default();
        let input: Vec<DerivedVideo> = (0..30).map(|i| derived(&format!("v{i}"), 100 + i, true)).collect();
        let ranked = rank(input, &config);
        assert_eq!(ranked.len(), config.max_ranked);
        assert_eq!(ranked[0].record.id, "v29", "highest velocity first");
    }
}
