//! Heuristic credibility scoring policies
//!
//! Two independent recipes, kept apart on purpose:
//! - [`search_credibility`] scores open-ended search results by counting
//!   debunking and verification language across the articles.
//! - [`fallback_credibility`] scores a single claim from article volume and
//!   red flags when remote analysis is unavailable.

use std::collections::HashSet;

use crate::{detect_red_flags, is_trusted_outlet, Article, CredibilityScore};

/// Language indicating the articles refute the claim
pub const DEBUNKING_KEYWORDS: &[&str] = &[
    "false",
    "fake",
    "hoax",
    "debunk",
    "myth",
    "misleading",
    "unverified",
    "no evidence",
    "not true",
    "misinformation",
    "fact check",
];

/// Language indicating the articles corroborate the claim
pub const VERIFICATION_KEYWORDS: &[&str] = &[
    "confirmed",
    "verified",
    "official",
    "announced",
    "statement",
    "reports confirm",
];

const DEBUNKING_WEIGHT: i64 = 15;
const VERIFICATION_WEIGHT: i64 = 8;

/// Score when a search finds nothing
pub const SEARCH_EMPTY_SCORE: u8 = 15;
/// Ceiling applied when debunking language dominates
const SEARCH_DEBUNKED_CEILING: i64 = 25;
const SEARCH_BASE: i64 = 20;
const SEARCH_MIN: u8 = 15;
const SEARCH_MAX: u8 = 85;

/// Score when a fallback analysis has no articles
pub const FALLBACK_EMPTY_SCORE: u8 = 25;
const FALLBACK_BASE: i64 = 40;
const FALLBACK_ARTICLE_BONUS_CAP: i64 = 30;
const FALLBACK_RED_FLAG_PENALTY: i64 = 10;
const FALLBACK_MIN: u8 = 15;
const FALLBACK_MAX: u8 = 85;

/// Keyword signal accumulated over a set of articles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageSignals {
    pub debunking: i64,
    pub verification: i64,
}

impl LanguageSignals {
    /// One hit per keyword present in each article's title and description
    pub fn measure(articles: &[Article]) -> Self {
        let mut signals = Self::default();

        for article in articles {
            let content = article.searchable_text();

            for keyword in DEBUNKING_KEYWORDS {
                if content.contains(keyword) {
                    signals.debunking += DEBUNKING_WEIGHT;
                }
            }

            for keyword in VERIFICATION_KEYWORDS {
                if content.contains(keyword) {
                    signals.verification += VERIFICATION_WEIGHT;
                }
            }
        }

        signals
    }

    /// Debunking outweighs verification more than two to one
    pub fn heavily_debunked(&self) -> bool {
        self.debunking > self.verification * 2
    }
}

/// Search-result credibility
pub fn search_credibility(articles: &[Article]) -> CredibilityScore {
    if articles.is_empty() {
        return CredibilityScore::new(SEARCH_EMPTY_SCORE as i64);
    }

    let signals = LanguageSignals::measure(articles);

    if signals.heavily_debunked() {
        return CredibilityScore::new(
            SEARCH_DEBUNKED_CEILING.min(SEARCH_EMPTY_SCORE as i64 + signals.verification),
        );
    }

    let distinct_sources = articles
        .iter()
        .map(|a| a.source.name.as_str())
        .collect::<HashSet<_>>()
        .len() as i64;
    let has_trusted = articles
        .iter()
        .any(|a| is_trusted_outlet(&a.source.name));

    let mut score = SEARCH_BASE;
    score += distinct_sources * 5;
    score += (articles.len() as i64 * 3).min(20);
    score += if has_trusted { 15 } else { 0 };
    score += signals.verification.min(25);
    score -= signals.debunking;

    CredibilityScore::bounded(score, SEARCH_MIN, SEARCH_MAX)
}

/// Single-claim fallback credibility
pub fn fallback_credibility(article_count: usize, red_flag_count: usize) -> CredibilityScore {
    if article_count == 0 {
        return CredibilityScore::new(FALLBACK_EMPTY_SCORE as i64);
    }

    let article_bonus = (article_count as i64)
        .saturating_mul(5)
        .min(FALLBACK_ARTICLE_BONUS_CAP);
    let penalty = (red_flag_count as i64).saturating_mul(FALLBACK_RED_FLAG_PENALTY);

    CredibilityScore::bounded(
        FALLBACK_BASE + article_bonus - penalty,
        FALLBACK_MIN,
        FALLBACK_MAX,
    )
}

/// Named scoring policy, picked by the calling surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// Open-ended search result credibility
    Search,
    /// Single-claim fallback when remote analysis is unavailable
    Fallback,
}

impl ScoringPolicy {
    pub fn score(&self, claim: &str, articles: &[Article]) -> CredibilityScore {
        match self {
            Self::Search => search_credibility(articles),
            Self::Fallback => fallback_credibility(articles.len(), detect_red_flags(claim).len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn article(title: &str, source: &str) -> Article {
        Article::new(title, source)
    }

    #[test]
    fn test_empty_boundaries() {
        assert_eq!(search_credibility(&[]).value(), 15);
        assert_eq!(fallback_credibility(0, 0).value(), 25);
        assert_eq!(ScoringPolicy::Search.score("anything", &[]).value(), 15);
        assert_eq!(ScoringPolicy::Fallback.score("anything", &[]).value(), 25);
    }

    #[test]
    fn test_search_trusted_sources() {
        let articles = vec![
            article("Officials confirmed flooding in Kerala", "Reuters"),
            article("Flood situation in Kerala", "NDTV"),
            article("Rain continues", "Local Daily"),
        ];
        // signals: "confirmed" + "official" in first title => verification 16
        // 20 + 3*5 + min(9,20) + 15 + 16 - 0 = 75
        assert_eq!(search_credibility(&articles).value(), 75);
    }

    #[test]
    fn test_search_heavily_debunked() {
        let articles = vec![
            article("Fact check: viral flood video is fake", "Alt News"),
            article("Claim about dam burst is false", "Boom Live"),
        ];
        // debunking: (fake, fact check) + (false) = 45, verification 0
        assert_eq!(search_credibility(&articles).value(), 15);
    }

    #[test]
    fn test_search_debunk_ceiling_counts_verification() {
        let articles = vec![
            article("Hoax and myth: official statement", "X")
                .with_description("misleading misinformation, no evidence"),
        ];
        // verification: official + statement = 16; debunking: hoax, myth, misleading,
        // misinformation, no evidence = 75 > 32 => min(25, 15 + 16) = 25
        assert_eq!(search_credibility(&articles).value(), 25);
    }

    #[test]
    fn test_search_clamped_to_band() {
        let articles: Vec<_> = (0..20)
            .map(|i| article("Government announced confirmed relief", &format!("Outlet {}", i)))
            .collect();
        assert_eq!(search_credibility(&articles).value(), 85);
    }

    #[test]
    fn test_fallback_formula() {
        assert_eq!(fallback_credibility(1, 0).value(), 45);
        assert_eq!(fallback_credibility(6, 0).value(), 70);
        assert_eq!(fallback_credibility(10, 0).value(), 70);
        assert_eq!(fallback_credibility(3, 1).value(), 45);
        assert_eq!(fallback_credibility(1, 4).value(), 15);
    }

    proptest! {
        #[test]
        fn fallback_score_in_range(articles in 0usize..10_000, flags in 0usize..10_000) {
            let score = fallback_credibility(articles, flags).value();
            prop_assert!(score <= 100);
            if articles > 0 {
                prop_assert!((15..=85).contains(&score));
            }
        }

        #[test]
        fn fallback_monotone_in_articles(articles in 1usize..100, flags in 0usize..4) {
            prop_assert!(fallback_credibility(articles + 1, flags) >= fallback_credibility(articles, flags));
        }

        #[test]
        fn fallback_antitone_in_flags(articles in 1usize..50, flags in 0usize..20) {
            prop_assert!(fallback_credibility(articles, flags + 1) <= fallback_credibility(articles, flags));
        }

        #[test]
        fn search_score_in_range(
            titles in prop::collection::vec(("[a-z ]{0,40}", "[A-Za-z]{1,12}"), 0..30)
        ) {
            let articles: Vec<Article> = titles
                .iter()
                .map(|(title, source)| Article::new(title, source))
                .collect();
            let score = search_credibility(&articles).value();
            prop_assert!((15..=85).contains(&score));
        }
    }

    #[test]
    fn test_fallback_monotone_zero_to_five() {
        let scores: Vec<u8> = (0..=5).map(|n| fallback_credibility(n, 0).value()).collect();
        assert!(scores.windows(2).all(|w| w[1] >= w[0]), "{:?}", scores);
    }
}
