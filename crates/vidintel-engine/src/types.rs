use serde::Serialize;
use vidintel_core::VideoRecord;

/// A video record with per-batch metrics attached.
#[derive(Debug, Clone)]
pub struct DerivedVideo {
    pub record: VideoRecord,
    /// Days since publication, floored at the configured minimum (0.5) so
    /// velocity never divides by zero for just-published videos.
    pub age_days: f64,
    /// Views accumulated per day since publication, rounded.
    pub velocity: u64,
    /// (likes + comments) as a percentage of views, two-decimal precision.
    /// `0.0` when the video has no views.
    pub engagement_rate: f64,
    /// Published within the freshness window (7 days).
    pub is_fresh: bool,
    /// Lower-cased title contains at least one topic token.
    pub is_relevant: bool,
}

/// Qualitative label assigned relative to the batch average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tag {
    #[serde(rename = "Trending")]
    Trending,
    #[serde(rename = "High Engagement")]
    HighEngagement,
    #[serde(rename = "Viral Velocity")]
    ViralVelocity,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Trending => write!(f, "Trending"),
            Tag::HighEngagement => write!(f, "High Engagement"),
            Tag::ViralVelocity => write!(f, "Viral Velocity"),
        }
    }
}

/// A ranked video with its tags. Tags are evaluated independently, so a
/// video carries zero to three of them, in declaration order.
#[derive(Debug, Clone)]
pub struct TaggedVideo {
    pub video: DerivedVideo,
    pub tags: Vec<Tag>,
}

/// Named title-structure categories, in tie-break order: when two archetypes
/// end up with the same match count, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchetypeKind {
    Listicle,
    HowTo,
    NegativeWarning,
    Versus,
    SecretHidden,
    Question,
}

impl ArchetypeKind {
    pub const ALL: [ArchetypeKind; 6] = [
        ArchetypeKind::Listicle,
        ArchetypeKind::HowTo,
        ArchetypeKind::NegativeWarning,
        ArchetypeKind::Versus,
        ArchetypeKind::SecretHidden,
        ArchetypeKind::Question,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ArchetypeKind::Listicle => "Listicle",
            ArchetypeKind::HowTo => "How-To",
            ArchetypeKind::NegativeWarning => "Negative/Warning",
            ArchetypeKind::Versus => "Versus",
            ArchetypeKind::SecretHidden => "Secret/Hidden",
            ArchetypeKind::Question => "Question",
        }
    }
}

impl std::fmt::Display for ArchetypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-archetype accumulator. The best example is tracked as plain fields
/// keyed by velocity, so two videos sharing an identical title cannot
/// corrupt the selection.
#[derive(Debug, Clone)]
pub struct ArchetypeTally {
    pub kind: ArchetypeKind,
    pub match_count: usize,
    pub best_example_title: Option<String>,
    pub best_example_velocity: u64,
}

impl ArchetypeTally {
    #[must_use]
    pub fn new(kind: ArchetypeKind) -> Self {
        Self {
            kind,
            match_count: 0,
            best_example_title: None,
            best_example_velocity: 0,
        }
    }
}
