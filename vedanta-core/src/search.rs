//! Search-result credibility report
//!
//! Scores a claim directly from the articles an evidence search returned,
//! ranks the outlets involved and derives the short sub-claim breakdown
//! shown next to search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    matches_outlet, search_credibility, source_type, Article, CredibilityScore, SourceType,
    RANKING_TRUSTED_OUTLETS,
};

/// Articles kept in a search report
const REPORT_TOP_ARTICLES: usize = 5;
/// Outlets named on a sub-claim
const SUB_CLAIM_SOURCES: usize = 3;

/// Debunking language checked when labelling search sub-claims
const SUB_CLAIM_DEBUNKING_KEYWORDS: &[&str] = &[
    "false",
    "fake",
    "hoax",
    "debunk",
    "not true",
    "misleading",
    "misinformation",
];

/// Verdict tier of a search-result score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchVerdict {
    Verified,
    Disputed,
    False,
}

impl SearchVerdict {
    /// >=70 verified, >=40 disputed, below that false
    pub fn from_score(score: CredibilityScore) -> Self {
        match score.value() {
            70.. => Self::Verified,
            40..=69 => Self::Disputed,
            _ => Self::False,
        }
    }
}

/// An outlet ranked by how much and how credibly it covered a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRanking {
    pub name: String,
    pub score: CredibilityScore,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub article_count: usize,
}

/// Group articles by outlet and rank the outlets, best first
pub fn rank_sources(articles: &[Article]) -> Vec<SourceRanking> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for article in articles {
        let name = article.source_name();
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    let mut rankings: Vec<SourceRanking> = order
        .into_iter()
        .map(|name| {
            let count = counts[name];
            let trusted = matches_outlet(name, RANKING_TRUSTED_OUTLETS);
            let raw = 50 + count as i64 * 10 + if trusted { 25 } else { 0 };

            SourceRanking {
                name: name.to_string(),
                score: CredibilityScore::new(raw.min(100)),
                source_type: source_type(name),
                article_count: count,
            }
        })
        .collect();

    // stable: ties keep first-appearance order
    rankings.sort_by(|a, b| b.score.cmp(&a.score));
    rankings
}

/// One row of the search sub-claim breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSubClaim {
    pub id: usize,
    pub text: String,
    pub status: SearchVerdict,
    pub score: CredibilityScore,
    pub sources: Vec<String>,
}

/// Derive the sub-claim breakdown from the articles and their overall score
pub fn search_sub_claims(articles: &[Article], overall: CredibilityScore) -> Vec<SearchSubClaim> {
    if articles.is_empty() {
        return vec![SearchSubClaim {
            id: 1,
            text: "No recent articles found for this claim".to_string(),
            status: SearchVerdict::Disputed,
            score: CredibilityScore::new(20),
            sources: vec!["Limited coverage in news sources".to_string()],
        }];
    }

    let source_names: Vec<String> = articles
        .iter()
        .take(SUB_CLAIM_SOURCES)
        .map(|a| a.source_name().to_string())
        .collect();

    let has_debunking = articles.iter().any(|a| {
        let text = a.searchable_text();
        SUB_CLAIM_DEBUNKING_KEYWORDS.iter().any(|k| text.contains(k))
    });

    let headline = |text: &str, status| SearchSubClaim {
        id: 1,
        text: text.to_string(),
        status,
        score: overall,
        sources: source_names.clone(),
    };

    let score = overall.value();
    if has_debunking && score < 40 {
        vec![
            headline("Claim appears to be FALSE or MISLEADING", SearchVerdict::False),
            SearchSubClaim {
                id: 2,
                text: "Multiple sources are debunking this claim".to_string(),
                status: SearchVerdict::False,
                score: CredibilityScore::new(15),
                sources: vec!["Fact-check articles found".to_string()],
            },
        ]
    } else if score >= 60 {
        vec![headline("Claim has credible verification", SearchVerdict::Verified)]
    } else if score >= 35 {
        vec![headline("Claim requires further verification", SearchVerdict::Disputed)]
    } else {
        vec![headline("Claim lacks credible evidence", SearchVerdict::False)]
    }
}

/// Search-result credibility report for a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVerification {
    pub claim: String,
    pub credibility_score: CredibilityScore,
    pub verdict: SearchVerdict,
    pub sources: Vec<SourceRanking>,
    pub sub_claims: Vec<SearchSubClaim>,
    pub articles: Vec<Article>,
    pub timestamp: DateTime<Utc>,
}

/// Build the search report for a claim and the articles found for it
pub fn verify_search(claim: &str, articles: &[Article], now: DateTime<Utc>) -> SearchVerification {
    let score = search_credibility(articles);

    SearchVerification {
        claim: claim.to_string(),
        credibility_score: score,
        verdict: SearchVerdict::from_score(score),
        sources: rank_sources(articles),
        sub_claims: search_sub_claims(articles, score),
        articles: articles.iter().take(REPORT_TOP_ARTICLES).cloned().collect(),
        timestamp: now,
    }
}
