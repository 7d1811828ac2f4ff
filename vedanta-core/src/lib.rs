//! Vedanta Core - Claim credibility scoring primitives
//!
//! This crate provides the pure, synchronous parts of claim verification:
//! - Article and analysis result types
//! - Keyword extraction and red-flag detection
//! - The consolidated source credibility table
//! - Heuristic scoring policies (search credibility and fallback analysis)
//! - Crisis feed triage scoring

pub mod analysis;
pub mod article;
pub mod crisis;
pub mod error;
pub mod fallback;
pub mod keywords;
pub mod red_flags;
pub mod scoring;
pub mod search;
pub mod sources;

pub use analysis::*;
pub use article::*;
pub use crisis::*;
pub use error::*;
pub use fallback::*;
pub use keywords::*;
pub use red_flags::*;
pub use scoring::*;
pub use search::*;
pub use sources::*;

/// Baseline credibility for outlets missing from the table
pub const DEFAULT_SOURCE_CREDIBILITY: u8 = 60;

/// Reputation summary for outlets missing from the table
pub const DEFAULT_REPUTATION: &str = "News outlet";

/// Maximum number of articles summarized in a fallback analysis
pub const FALLBACK_TOP_SOURCES: usize = 5;
