//! Weighted keyword extraction from ranked titles.

use std::collections::HashMap;

use crate::config::{AnalysisConfig, TopicTokens};
use crate::types::TaggedVideo;

/// Extract the top keywords from the tagged, ranked subset.
///
/// Each title is stripped of punctuation, lower-cased, and split on
/// whitespace. Words long enough and neither stop-words nor topic tokens
/// accumulate `velocity * (1 + engagement_rate / 100)`. Words are returned
/// by accumulated weight descending; equal weights resolve in first-seen
/// order (the accumulator is insertion-ordered and the sort is stable).
/// Weights are internal and never exposed.
#[must_use]
pub fn top_keywords(
    tagged: &[TaggedVideo],
    tokens: &TopicTokens,
    config: &AnalysisConfig,
) -> Vec<String> {
    // Insertion-ordered accumulator: the Vec keeps first-seen order, the map
    // is just an index into it.
    let mut weights: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in tagged {
        #[allow(clippy::cast_precision_loss)]
        let weight = item.video.velocity as f64 * (1.0 + item.video.engagement_rate / 100.0);

        for word in candidate_words(&item.video.record.title, tokens, config) {
            if let Some(&i) = index.get(&word) {
                weights[i].1 += weight;
            } else {
                index.insert(word.clone(), weights.len());
                weights.push((word, weight));
            }
        }
    }

    weights.sort_by(|a, b| b.1.total_cmp(&a.1));
    weights.truncate(config.max_keywords);
    weights.into_iter().map(|(word, _)| word).collect()
}

/// Lower-cased, punctuation-stripped words from one title that qualify as
/// keyword candidates.
fn candidate_words(
    title: &str,
    tokens: &TopicTokens,
    config: &AnalysisConfig,
) -> Vec<String> {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= config.min_keyword_len)
        .filter(|w| !config.is_stop_word(w))
        .filter(|w| !tokens.contains(w))
        .map(ToOwned::to_owned)
        .collect()
}
