use thiserror::Error;

/// Errors produced by the analysis engine.
///
/// All arithmetic inside the pipeline is guarded (age floor, zero-view
/// guard), so the only failure mode on well-formed input is a timestamp the
/// upstream crate let through in a shape chrono cannot parse.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid publishedAt timestamp for video {id}: {reason}")]
    InvalidTimestamp { id: String, reason: String },
}
