//! Final report assembly and presentation re-orderings.

use serde::Serialize;

use crate::types::{ArchetypeTally, Tag, TaggedVideo};

/// One ranked, tagged video as it appears in `marketData`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketVideo {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    pub views: u64,
    pub likes: u64,
    pub velocity: u64,
    pub engagement_rate: f64,
    pub is_relevant: bool,
    pub days_old: f64,
    pub is_fresh: bool,
    pub published_at: String,
    pub tags: Vec<Tag>,
}

impl From<TaggedVideo> for MarketVideo {
    fn from(item: TaggedVideo) -> Self {
        let TaggedVideo { video, tags } = item;
        Self {
            id: video.record.id,
            title: video.record.title,
            channel: video.record.channel_title,
            thumbnail: video.record.thumbnail_url,
            views: video.record.view_count,
            likes: video.record.like_count,
            velocity: video.velocity,
            engagement_rate: video.engagement_rate,
            is_relevant: video.is_relevant,
            days_old: video.age_days,
            is_fresh: video.is_fresh,
            published_at: video.record.published_at,
            tags,
        }
    }
}

/// The winning title archetype, rendered with its label, match count, and
/// best example title.
#[derive(Debug, Clone, Serialize)]
pub struct DominantPattern {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: usize,
    pub example: String,
}

impl DominantPattern {
    #[must_use]
    pub fn from_tally(tally: &ArchetypeTally) -> Self {
        Self {
            kind: tally.kind.label(),
            count: tally.match_count,
            example: tally.best_example_title.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intelligence {
    pub top_keywords: Vec<String>,
    pub dominant_pattern: Option<DominantPattern>,
    pub avg_title_length: u64,
}

/// The assembled market report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    pub market_data: Vec<MarketVideo>,
    pub intelligence: Intelligence,
}

/// Mean character length of the ranked titles, rounded to the nearest
/// integer; `0` for an empty set. Measured in `char`s, not bytes.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn avg_title_length(market: &[MarketVideo]) -> u64 {
    if market.is_empty() {
        return 0;
    }
    let sum: usize = market.iter().map(|v| v.title.chars().count()).sum();
    (sum as f64 / market.len() as f64).round() as u64
}

/// Presentation orderings for `marketData`.
///
/// Pure re-sorts over the already-tagged set; they never recompute velocity,
/// engagement rate, or tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Velocity descending — the report's default ordering.
    #[default]
    Velocity,
    /// Engagement rate descending.
    Engagement,
    /// Fresh videos first, velocity descending within each group.
    Trending,
}

impl SortOrder {
    /// Parses the wire value (`velocity`, `engagement`, `trending`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "velocity" => Some(SortOrder::Velocity),
            "engagement" => Some(SortOrder::Engagement),
            "trending" => Some(SortOrder::Trending),
            _ => None,
        }
    }
}

/// Stable in-place re-sort of `marketData` for presentation.
pub fn reorder(market: &mut [MarketVideo], order: SortOrder) {
    match order {
        SortOrder::Velocity => market.sort_by(|a, b| b.velocity.cmp(&a.velocity)),
        SortOrder::Engagement => {
            market.sort_by(|a, b| b.engagement_rate.total_cmp(&a.engagement_rate));
        }
        SortOrder::Trending => market.sort_by(|a, b| {
            (b.is_fresh, b.velocity).cmp(&(a.is_fresh, a.velocity))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, velocity: u64, engagement_rate: f64, is_fresh: bool) -> MarketVideo {
        MarketVideo {
            id: id.to_string(),
            title: id.to_string(),
            channel: String::new(),
            thumbnail: String::new(),
            views: 0,
            likes: 0,
            velocity,
            engagement_rate,
            is_relevant: true,
            days_old: 1.0,
            is_fresh,
            published_at: "2026-08-01T00:00:00Z".to_string(),
            tags: vec![Tag::Trending],
        }
    }

    fn ids(market: &[MarketVideo]) -> Vec<&str> {
        market.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn market_video_serializes_with_wire_keys() {
        let json = serde_json::to_value(video("a", 10, 5.2, true)).expect("serialize");
        for key in [
            "id",
            "title",
            "channel",
            "thumbnail",
            "views",
            "likes",
            "velocity",
            "engagementRate",
            "isRelevant",
            "daysOld",
            "isFresh",
            "publishedAt",
            "tags",
        ] {
            assert!(json.get(key).is_some(), "missing wire key {key}");
        }
        assert_eq!(json["tags"][0], "Trending");
    }

    #[test]
    fn dominant_pattern_renders_type_count_example() {
        use crate::types::{ArchetypeKind, ArchetypeTally};
        let tally = ArchetypeTally {
            kind: ArchetypeKind::NegativeWarning,
            match_count: 3,
            best_example_title: Some("STOP doing this".to_string()),
            best_example_velocity: 900,
        };
        let json = serde_json::to_value(DominantPattern::from_tally(&tally)).expect("serialize");
        assert_eq!(json["type"], "Negative/Warning");
        assert_eq!(json["count"], 3);
        assert_eq!(json["example"], "STOP doing this");
    }

    #[test]
    fn avg_title_length_counts_chars_and_rounds() {
        let mut a = video("a", 1, 0.0, true);
        a.title = "abcd".to_string(); // 4
        let mut b = video("b", 1, 0.0, true);
        b.title = "abcdefg".to_string(); // 7 → mean 5.5 → 6
        assert_eq!(avg_title_length(&[a, b]), 6);
        assert_eq!(avg_title_length(&[]), 0);
    }

    #[test]
    fn engagement_reorder_is_by_rate_descending() {
        let mut market = vec![
            video("low", 900, 1.0, true),
            video("high", 100, 9.0, false),
            video("mid", 500, 5.0, true),
        ];
        reorder(&mut market, SortOrder::Engagement);
        assert_eq!(ids(&market), vec!["high", "mid", "low"]);
    }

    #[test]
    fn trending_reorder_puts_fresh_first() {
        let mut market = vec![
            video("stale-fast", 900, 0.0, false),
            video("fresh-slow", 100, 0.0, true),
            video("fresh-fast", 500, 0.0, true),
        ];
        reorder(&mut market, SortOrder::Trending);
        assert_eq!(ids(&market), vec!["fresh-fast", "fresh-slow", "stale-fast"]);
    }

    #[test]
    fn sort_order_parse_rejects_unknown_values() {
        assert_eq!(SortOrder::parse("velocity"), Some(SortOrder::Velocity));
        assert_eq!(SortOrder::parse("engagement"), Some(SortOrder::Engagement));
        assert_eq!(SortOrder::parse("trending"), Some(SortOrder::Trending));
        assert_eq!(SortOrder::parse("likes"), None);
    }
}
