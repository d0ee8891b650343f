//! Competitive title-intelligence engine.
//!
//! Turns a topic plus a batch of recently published videos into a ranked,
//! tagged market report: per-video velocity and engagement metrics, a
//! relevance/noise filter, a bounded stable ranking, qualitative tags
//! relative to the batch average, weighted title keywords, and
//! title-structure archetypes with a dominant pattern.
//!
//! The pipeline is pure and synchronous. It holds no state across
//! invocations, so concurrent calls for different topics are safe without
//! locking. Data retrieval belongs to the `vidintel-youtube` crate; the
//! engine only ever sees a fully merged batch.

pub mod config;
pub mod error;
pub mod keywords;
pub mod metrics;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod structure;
pub mod tags;
pub mod types;

pub use config::{AnalysisConfig, TopicTokens};
pub use error::EngineError;
pub use pipeline::{analyze_topic, analyze_topic_at, Analysis};
pub use report::{reorder, IntelligenceReport, MarketVideo, SortOrder};
pub use types::{ArchetypeKind, ArchetypeTally, DerivedVideo, Tag, TaggedVideo};
