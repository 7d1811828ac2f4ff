//! News outlet credibility table
//!
//! One authoritative table of known outlets with their baseline
//! credibility (0-100) and reputation summary, plus name-based outlet
//! categorization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CredibilityScore, DEFAULT_REPUTATION, DEFAULT_SOURCE_CREDIBILITY};

/// A known news outlet
#[derive(Debug, Clone, Serialize)]
pub struct OutletProfile {
    /// Outlet name as reported by news providers (exact match)
    pub name: &'static str,
    /// Baseline credibility (0-100)
    pub credibility: u8,
    /// Short reputation summary, if one is on record
    pub reputation: Option<&'static str>,
}

/// Known outlets
pub static KNOWN_OUTLETS: &[OutletProfile] = &[
    // Wire services
    OutletProfile {
        name: "Reuters",
        credibility: 93,
        reputation: Some("Global wire service, gold standard for accuracy"),
    },
    OutletProfile {
        name: "PTI",
        credibility: 92,
        reputation: Some("National wire service with 70+ years of journalistic excellence"),
    },
    OutletProfile {
        name: "PIB India",
        credibility: 92,
        reputation: Some("Official Press Information Bureau - Government press agency"),
    },
    OutletProfile {
        name: "Associated Press",
        credibility: 91,
        reputation: None,
    },
    OutletProfile {
        name: "ANI",
        credibility: 88,
        reputation: None,
    },
    // National broadcasters and newspapers
    OutletProfile {
        name: "BBC",
        credibility: 90,
        reputation: Some("British public broadcaster with global reputation"),
    },
    OutletProfile {
        name: "The Hindu",
        credibility: 88,
        reputation: Some("India's newspaper of record"),
    },
    OutletProfile {
        name: "Indian Express",
        credibility: 87,
        reputation: None,
    },
    OutletProfile {
        name: "The Guardian",
        credibility: 86,
        reputation: None,
    },
    OutletProfile {
        name: "NDTV",
        credibility: 85,
        reputation: Some("Established national TV news network"),
    },
    OutletProfile {
        name: "Hindustan Times",
        credibility: 82,
        reputation: None,
    },
    OutletProfile {
        name: "CNN",
        credibility: 82,
        reputation: None,
    },
    OutletProfile {
        name: "Times of India",
        credibility: 80,
        reputation: None,
    },
    OutletProfile {
        name: "Al Jazeera",
        credibility: 78,
        reputation: None,
    },
];

/// Outlets whose presence earns the search-credibility trust bonus (substring match)
pub const SEARCH_TRUSTED_OUTLETS: &[&str] = &[
    "PTI",
    "The Hindu",
    "Times of India",
    "NDTV",
    "Indian Express",
    "BBC",
    "Reuters",
];

/// Outlets whose articles earn the source-ranking trust bonus (substring match)
pub const RANKING_TRUSTED_OUTLETS: &[&str] = &[
    "PTI",
    "The Hindu",
    "Times of India",
    "NDTV",
    "Indian Express",
    "Hindustan Times",
];

/// Look up an outlet by exact name
pub fn outlet_profile(name: &str) -> Option<&'static OutletProfile> {
    KNOWN_OUTLETS.iter().find(|o| o.name == name)
}

/// Baseline credibility, 60 for unknown outlets
pub fn baseline_credibility(name: &str) -> CredibilityScore {
    let raw = outlet_profile(name)
        .map(|o| o.credibility)
        .unwrap_or(DEFAULT_SOURCE_CREDIBILITY);
    CredibilityScore::new(raw as i64)
}

/// Reputation summary, "News outlet" for unknown outlets
pub fn reputation_summary(name: &str) -> &'static str {
    outlet_profile(name)
        .and_then(|o| o.reputation)
        .unwrap_or(DEFAULT_REPUTATION)
}

/// Does the name contain any of the given outlet names
pub fn matches_outlet(name: &str, outlets: &[&str]) -> bool {
    outlets.iter().any(|trusted| name.contains(trusted))
}

/// Trusted for search-result scoring
pub fn is_trusted_outlet(name: &str) -> bool {
    matches_outlet(name, SEARCH_TRUSTED_OUTLETS)
}

/// Outlet category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "News Agency")]
    NewsAgency,
    #[serde(rename = "TV News")]
    TvNews,
    #[serde(rename = "Newspaper")]
    Newspaper,
    #[serde(rename = "Online Media")]
    OnlineMedia,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewsAgency => "News Agency",
            Self::TvNews => "TV News",
            Self::Newspaper => "Newspaper",
            Self::OnlineMedia => "Online Media",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorize an outlet from fragments of its name; first matching rule wins
pub fn source_type(name: &str) -> SourceType {
    if name.contains("PTI") || name.contains("ANI") {
        SourceType::NewsAgency
    } else if name.contains("TV") || name.contains("News") {
        SourceType::TvNews
    } else if name.contains("Times") || name.contains("Hindu") || name.contains("Express") {
        SourceType::Newspaper
    } else {
        SourceType::OnlineMedia
    }
}
