//! Credibility scores, verification statuses and analysis results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{RedFlag, SourceType};

/// Credibility score, always within [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "u8")]
pub struct CredibilityScore(u8);

impl CredibilityScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Clamp an intermediate additive result into [0, 100]
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Clamp into a narrower band, itself bounded by [0, 100]
    pub fn bounded(raw: i64, lo: u8, hi: u8) -> Self {
        Self::new(raw.clamp(lo as i64, hi as i64))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<f64> for CredibilityScore {
    fn from(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MIN;
        }
        Self::new(raw.round().clamp(0.0, 100.0) as i64)
    }
}

impl From<CredibilityScore> for u8 {
    fn from(score: CredibilityScore) -> Self {
        score.0
    }
}

impl fmt::Display for CredibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Score cut-offs for the three-tier status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    pub verified: u8,
    pub disputed: u8,
}

impl StatusThresholds {
    /// Local heuristic scale: >=70 verified, >=40 disputed
    pub const FALLBACK: Self = Self {
        verified: 70,
        disputed: 40,
    };

    /// Scale the remote model is instructed to use: >=75 verified, >=40 disputed
    pub const REMOTE: Self = Self {
        verified: 75,
        disputed: 40,
    };
}

/// Coarse verification status of a claim or sub-claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Disputed,
    Unverified,
}

impl VerificationStatus {
    pub fn from_score(score: CredibilityScore, thresholds: StatusThresholds) -> Self {
        if score.value() >= thresholds.verified {
            Self::Verified
        } else if score.value() >= thresholds.disputed {
            Self::Disputed
        } else {
            Self::Unverified
        }
    }

    /// Lenient parse of a status label returned by a model
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "VERIFIED" => Some(Self::Verified),
            "DISPUTED" => Some(Self::Disputed),
            "UNVERIFIED" => Some(Self::Unverified),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Disputed => "DISPUTED",
            Self::Unverified => "UNVERIFIED",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single factual assertion extracted from a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubClaim {
    pub claim_text: String,
    pub status: VerificationStatus,
    pub credibility: CredibilityScore,
    pub evidence: String,
    pub sources: Vec<String>,
}

/// Per-outlet assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAnalysis {
    pub name: String,
    pub baseline_credibility: CredibilityScore,
    pub category: SourceType,
    pub reputation: String,
    /// What this outlet reported about the claim
    pub evidence_summary: String,
}

/// Where an analysis result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOrigin {
    /// Local heuristic scoring
    Heuristic,
    /// Remote language model
    Remote,
}

/// Keyword overlap between a claim and a remote response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceReport {
    pub keywords: Vec<String>,
    pub matched: usize,
    pub ratio: f64,
    /// Ratio fell under the configured threshold
    pub low_overlap: bool,
}

/// Full credibility assessment of a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAnalysisResult {
    pub overall_score: CredibilityScore,
    pub overall_status: VerificationStatus,
    pub reasoning: String,
    pub sub_claims: Vec<SubClaim>,
    pub source_analyses: Vec<SourceAnalysis>,
    pub red_flags: Vec<RedFlag>,
    pub contextual_note: String,
    pub origin: AnalysisOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<RelevanceReport>,
}

impl ClaimAnalysisResult {
    pub fn is_fallback(&self) -> bool {
        self.origin == AnalysisOrigin::Heuristic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps() {
        assert_eq!(CredibilityScore::new(-40).value(), 0);
        assert_eq!(CredibilityScore::new(250).value(), 100);
        assert_eq!(CredibilityScore::bounded(0, 15, 85).value(), 15);
        assert_eq!(CredibilityScore::bounded(95, 15, 85).value(), 85);
        assert_eq!(CredibilityScore::from(67.6).value(), 68);
        assert_eq!(CredibilityScore::from(f64::NAN).value(), 0);
    }

    #[test]
    fn test_score_deserializes_clamped() {
        let score: CredibilityScore = serde_json::from_str("140").unwrap();
        assert_eq!(score, CredibilityScore::MAX);
        assert_eq!(serde_json::to_string(&score).unwrap(), "100");
    }

    #[test]
    fn test_status_scales_differ() {
        let score = CredibilityScore::new(72);
        assert_eq!(
            VerificationStatus::from_score(score, StatusThresholds::FALLBACK),
            VerificationStatus::Verified
        );
        assert_eq!(
            VerificationStatus::from_score(score, StatusThresholds::REMOTE),
            VerificationStatus::Disputed
        );
        assert_eq!(
            VerificationStatus::from_score(CredibilityScore::new(39), StatusThresholds::REMOTE),
            VerificationStatus::Unverified
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(VerificationStatus::parse(" verified "), Some(VerificationStatus::Verified));
        assert_eq!(VerificationStatus::parse("FALSE"), None);
    }
}
