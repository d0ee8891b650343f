//! Tunable knobs for the analysis pipeline.
//!
//! Everything the pipeline compares against lives here as an explicit,
//! immutable value rather than a literal buried in a function, so tests can
//! construct tuned variants and the thresholds are documented in one place.

use regex::Regex;

use crate::types::ArchetypeKind;

/// Words excluded from keyword extraction regardless of topic.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "that", "with", "this", "how", "video", "youtube", "review", "tutorial",
];

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Floor on derived age, in days. Keeps velocity finite for videos
    /// published within the last 12 hours.
    pub min_age_days: f64,
    /// Videos younger than this (days) are flagged fresh.
    pub fresh_window_days: f64,
    /// Minimum velocity to survive the noise filter. Drops dead and
    /// near-zero-growth videos that would pollute keyword and structure
    /// statistics; a fixed constant, not derived from the batch.
    pub velocity_floor: u64,
    /// Engagement rate above which a video earns the High Engagement tag.
    pub engagement_tag_threshold: f64,
    /// Velocity must exceed `avg * viral_multiplier` for Viral Velocity.
    pub viral_multiplier: f64,
    /// Working-set bound after ranking.
    pub max_ranked: usize,
    /// Keyword list bound.
    pub max_keywords: usize,
    /// Minimum character length for a keyword candidate.
    pub min_keyword_len: usize,
    /// Minimum character length for a topic token.
    pub min_token_len: usize,
    pub stop_words: Vec<String>,
    pub archetype_rules: ArchetypeRules,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_age_days: 0.5,
            fresh_window_days: 7.0,
            velocity_floor: 5,
            engagement_tag_threshold: 5.0,
            viral_multiplier: 2.0,
            max_ranked: 15,
            max_keywords: 6,
            min_keyword_len: 4,
            min_token_len: 3,
            stop_words: STOP_WORDS.iter().map(|s| (*s).to_string()).collect(),
            archetype_rules: ArchetypeRules::default(),
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.iter().any(|w| w == word)
    }
}

/// Compiled title matchers, one per archetype.
///
/// Matching is case-insensitive and archetypes are not mutually exclusive:
/// one title may match several.
#[derive(Debug, Clone)]
pub struct ArchetypeRules {
    listicle_lead: Regex,
    listicle_top_n: Regex,
    how_to: Regex,
    negative: Regex,
    versus: Regex,
    secret: Regex,
}

impl Default for ArchetypeRules {
    fn default() -> Self {
        Self {
            listicle_lead: Regex::new(r"^\d").expect("valid listicle lead regex"),
            listicle_top_n: Regex::new(r"(?i)top\s*\d").expect("valid top-n regex"),
            how_to: Regex::new(r"(?i)^how to").expect("valid how-to regex"),
            negative: Regex::new(r"(?i)stop|don't|never|mistake|worst")
                .expect("valid negative regex"),
            versus: Regex::new(r"(?i)\b(?:vs|versus)\b").expect("valid versus regex"),
            secret: Regex::new(r"(?i)secret|hidden|nobody|hacks").expect("valid secret regex"),
        }
    }
}

impl ArchetypeRules {
    #[must_use]
    pub fn matches(&self, kind: ArchetypeKind, title: &str) -> bool {
        match kind {
            ArchetypeKind::Listicle => {
                self.listicle_lead.is_match(title) || self.listicle_top_n.is_match(title)
            }
            ArchetypeKind::HowTo => self.how_to.is_match(title),
            ArchetypeKind::NegativeWarning => self.negative.is_match(title),
            ArchetypeKind::Versus => self.versus.is_match(title),
            ArchetypeKind::SecretHidden => self.secret.is_match(title),
            ArchetypeKind::Question => title.trim_end().ends_with('?'),
        }
    }
}

/// Topic tokens used for both relevance matching and keyword exclusion.
///
/// The topic is lower-cased and split on whitespace; tokens shorter than the
/// configured minimum are dropped. Relevance is a substring check, not a
/// word-boundary check — topic token "cat" matches "category" on purpose.
#[derive(Debug, Clone)]
pub struct TopicTokens {
    tokens: Vec<String>,
}

impl TopicTokens {
    #[must_use]
    pub fn new(topic: &str, min_token_len: usize) -> Self {
        let tokens = topic
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.chars().count() >= min_token_len)
            .map(ToOwned::to_owned)
            .collect();
        Self { tokens }
    }

    /// Substring containment of any token in an already lower-cased title.
    #[must_use]
    pub fn matches_title(&self, lower_title: &str) -> bool {
        self.tokens.iter().any(|t| lower_title.contains(t.as_str()))
    }

    /// Exact-token check, used to exclude the topic itself from keywords.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.tokens.iter().any(|t| t == word)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
