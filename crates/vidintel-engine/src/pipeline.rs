//! Pipeline orchestration.

use chrono::{DateTime, Utc};
use vidintel_core::VideoRecord;

use crate::config::{AnalysisConfig, TopicTokens};
use crate::error::EngineError;
use crate::report::{
    avg_title_length, DominantPattern, Intelligence, IntelligenceReport, MarketVideo,
};
use crate::types::ArchetypeTally;
use crate::{keywords, metrics, rank, structure, tags};

/// Everything one invocation of the engine produces.
///
/// The report carries the wire shape; the archetype tallies and batch
/// average are kept alongside it for callers that render a fuller breakdown
/// (the CLI's markdown report).
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: IntelligenceReport,
    /// All six tallies in declaration order, not just the winner.
    pub archetypes: Vec<ArchetypeTally>,
    /// Mean velocity over the full derived batch.
    pub avg_velocity: f64,
}

/// Run the full analysis for one topic against the current clock.
///
/// # Errors
///
/// Returns [`EngineError`] if a record carries a malformed timestamp.
pub fn analyze_topic(
    topic: &str,
    batch: &[VideoRecord],
    config: &AnalysisConfig,
) -> Result<Analysis, EngineError> {
    analyze_topic_at(topic, batch, config, Utc::now())
}

/// Run the full analysis with an explicit `now`, so the whole pipeline is
/// deterministic under test.
///
/// 1. Derive metrics for every record (order preserved).
/// 2. Compute the batch average velocity over the **full** derived list.
///    This happens before filtering on purpose: the trending baseline must
///    represent the whole fetched batch, not just the survivors.
/// 3. Filter to relevant, above-floor records.
/// 4. Stable-rank by velocity and truncate to the working set.
/// 5. Tag the ranked subset against the step-2 average.
/// 6. Weigh keywords and classify archetypes over the tagged subset.
/// 7. Assemble the report.
///
/// An empty batch is not an error: it yields a report with empty market
/// data, no keywords, no dominant pattern, and a zero title length.
///
/// # Errors
///
/// Returns [`EngineError`] if a record carries a malformed timestamp.
pub fn analyze_topic_at(
    topic: &str,
    batch: &[VideoRecord],
    config: &AnalysisConfig,
    now: DateTime<Utc>,
) -> Result<Analysis, EngineError> {
    let tokens = TopicTokens::new(topic, config.min_token_len);
    if tokens.is_empty() {
        tracing::debug!(topic, "no usable topic tokens; nothing will be relevant");
    }

    let derived = metrics::derive_batch(batch, &tokens, config, now)?;
    let avg_velocity = metrics::avg_velocity(&derived);

    let filtered = rank::filter_relevant(derived, config);
    let ranked = rank::rank(filtered, config);
    tracing::debug!(
        topic,
        batch = batch.len(),
        ranked = ranked.len(),
        avg_velocity,
        "ranked working set ready"
    );

    let tagged = tags::tag_batch(ranked, avg_velocity, config);
    let top_keywords = keywords::top_keywords(&tagged, &tokens, config);
    let archetypes = structure::classify(&tagged, &config.archetype_rules);
    let dominant_pattern = structure::dominant(&archetypes).map(DominantPattern::from_tally);

    let market_data: Vec<MarketVideo> = tagged.into_iter().map(MarketVideo::from).collect();
    let report = IntelligenceReport {
        intelligence: Intelligence {
            top_keywords,
            dominant_pattern,
            avg_title_length: avg_title_length(&market_data),
        },
        market_data,
    };

    Ok(Analysis {
        report,
        archetypes,
        avg_velocity,
    })
}
