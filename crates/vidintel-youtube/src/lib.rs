//! YouTube Data API v3 client for vidintel.
//!
//! The engine never performs I/O; this crate is the data-retrieval
//! collaborator that produces the fully merged batch the engine consumes.
//! It runs `search.list` for a topic, fans the resulting IDs out over
//! sharded `videos.list` statistics lookups, and merges both responses into
//! [`vidintel_core::VideoRecord`]s in search-result order.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::YoutubeClient;
pub use error::YoutubeError;
