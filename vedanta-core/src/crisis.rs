//! Crisis feed triage
//!
//! Ranks incoming crisis articles by urgency:
//! - categorize each article by crisis type
//! - score urgency from recency, alarm keywords and category
//! - tag each with a feed status from the publishing outlet's tier
//! - drop near-duplicate headlines and keep the most urgent

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::Article;

/// Articles shown by default after triage
pub const DEFAULT_TRIAGE_LIMIT: usize = 6;

/// Urgency above which an item counts as breaking
pub const BREAKING_URGENCY: u8 = 80;

/// Normalized title prefix length used for duplicate detection
const DEDUP_PREFIX_CHARS: usize = 50;

/// Crisis type of a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrisisCategory {
    Flood,
    Cyclone,
    Earthquake,
    Fire,
    Landslide,
    Election,
    Market,
    Accident,
    Security,
    Health,
    General,
}

impl CrisisCategory {
    /// Categories that add to an item's urgency
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::Earthquake | Self::Cyclone | Self::Flood | Self::Security | Self::Fire
        )
    }
}

static CATEGORY_RULES: LazyLock<Vec<(Regex, CrisisCategory)>> = LazyLock::new(|| {
    [
        (r"flood|deluge|inundation|waterlogging", CrisisCategory::Flood),
        (r"cyclone|hurricane|storm|typhoon", CrisisCategory::Cyclone),
        (r"earthquake|tremor|seismic|quake", CrisisCategory::Earthquake),
        (r"fire|blaze|inferno", CrisisCategory::Fire),
        (r"landslide|mudslide", CrisisCategory::Landslide),
        (r"election|vote|poll", CrisisCategory::Election),
        (r"stock|market|trading|sensex", CrisisCategory::Market),
        (r"accident|crash|collision", CrisisCategory::Accident),
        (r"terror|attack|shooting|blast", CrisisCategory::Security),
        (r"covid|pandemic|epidemic|health", CrisisCategory::Health),
    ]
    .into_iter()
    .map(|(pattern, category)| (Regex::new(pattern).unwrap(), category))
    .collect()
});

/// Alarm keyword patterns and the urgency each adds
static URGENCY_RULES: LazyLock<Vec<(Regex, u32)>> = LazyLock::new(|| {
    [
        (r"breaking|alert|urgent|emergency", 30),
        (r"death|casualt|kill|injur", 25),
        (r"disaster|catastrophe|crisis", 20),
        (r"warning|danger|threat", 15),
    ]
    .into_iter()
    .map(|(pattern, boost)| (Regex::new(pattern).unwrap(), boost))
    .collect()
});

/// First matching category rule wins
pub fn categorize(text: &str) -> CrisisCategory {
    let lower = text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(regex, _)| regex.is_match(&lower))
        .map(|(_, category)| *category)
        .unwrap_or(CrisisCategory::General)
}

/// Urgency 0-100 from recency, alarm keywords and category
pub fn urgency_score(article: &Article, category: CrisisCategory, now: DateTime<Utc>) -> u8 {
    let mut score: u32 = 0;

    if let Some(published) = article.published_time() {
        let age_minutes = (now - published).num_minutes();
        score += match age_minutes {
            m if m < 30 => 50,
            m if m < 120 => 30,
            m if m < 360 => 10,
            _ => 0,
        };
    }

    let text = article.searchable_text();
    score += URGENCY_RULES
        .iter()
        .filter(|(regex, _)| regex.is_match(&text))
        .map(|(_, boost)| boost)
        .sum::<u32>();

    if category.is_critical() {
        score += 20;
    }

    score.min(100) as u8
}

pub fn is_breaking(urgency: u8) -> bool {
    urgency > BREAKING_URGENCY
}

/// Feed status of an item, from its outlet's tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedStatus {
    Verified,
    Monitoring,
    Developing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedConfidence {
    High,
    Medium,
    Low,
}

const TIER1_FRAGMENTS: &[&str] = &["pti", "reuters", "ani", "bbc", "pib", "ndtv", "thehindu"];
const TIER2_FRAGMENTS: &[&str] = &["times", "hindu", "express", "firstpost", "hindustantimes"];

/// Feed status and confidence for an outlet (case-insensitive fragment match)
pub fn feed_status(source_name: &str) -> (FeedStatus, FeedConfidence) {
    let source = source_name.to_lowercase();

    if TIER1_FRAGMENTS.iter().any(|f| source.contains(f)) {
        (FeedStatus::Verified, FeedConfidence::High)
    } else if TIER2_FRAGMENTS.iter().any(|f| source.contains(f)) {
        (FeedStatus::Monitoring, FeedConfidence::Medium)
    } else {
        (FeedStatus::Developing, FeedConfidence::Low)
    }
}

/// Normalized headline key: lower-cased, punctuation stripped, first 50 chars
fn dedup_key(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .take(DEDUP_PREFIX_CHARS)
        .collect()
}

/// Drop articles whose normalized headline was already seen
pub fn deduplicate(articles: &[Article]) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter(|a| seen.insert(dedup_key(&a.title)))
        .cloned()
        .collect()
}

/// A triaged crisis item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisItem {
    pub article: Article,
    pub category: CrisisCategory,
    pub urgency: u8,
    pub status: FeedStatus,
    pub confidence: FeedConfidence,
    pub location: String,
}

impl CrisisItem {
    pub fn assess(article: Article, now: DateTime<Utc>) -> Self {
        let category = categorize(&format!(
            "{} {}",
            article.title,
            article.description.as_deref().unwrap_or_default()
        ));
        let urgency = urgency_score(&article, category, now);
        let (status, confidence) = feed_status(&article.source.name);
        let location = extract_location(&format!(
            "{} {}",
            article.title,
            article.description.as_deref().unwrap_or_default()
        ))
        .to_string();

        Self {
            article,
            category,
            urgency,
            status,
            confidence,
            location,
        }
    }

    pub fn is_breaking(&self) -> bool {
        is_breaking(self.urgency)
    }
}

/// Deduplicate, score and keep the `limit` most urgent items
pub fn triage(articles: &[Article], now: DateTime<Utc>, limit: usize) -> Vec<CrisisItem> {
    let mut items: Vec<CrisisItem> = deduplicate(articles)
        .into_iter()
        .map(|article| CrisisItem::assess(article, now))
        .collect();

    items.sort_by(|a, b| b.urgency.cmp(&a.urgency));
    items.truncate(limit);
    items
}

const KNOWN_LOCATIONS: &[&str] = &[
    "Kerala",
    "Mumbai",
    "Delhi",
    "Kolkata",
    "Chennai",
    "Bangalore",
    "Hyderabad",
    "Pune",
    "Gujarat",
    "Tamil Nadu",
    "Karnataka",
    "Maharashtra",
    "West Bengal",
    "Uttar Pradesh",
    "Assam",
    "Odisha",
    "Bihar",
    "Rajasthan",
    "Madhya Pradesh",
];

/// Best-effort location mentioned in the text, "India" when none is found
pub fn extract_location(text: &str) -> &'static str {
    if let Some(location) = KNOWN_LOCATIONS.iter().copied().find(|l| text.contains(l)) {
        return location;
    }

    let lower = text.to_lowercase();
    if lower.contains("bay of bengal") {
        "Eastern Coast"
    } else if lower.contains("arabian sea") {
        "Western Coast"
    } else {
        "India"
    }
}

/// Relative age label ("Just now", "5m ago", "3h ago", "2d ago")
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(now: DateTime<Utc>, minutes_ago: i64) -> String {
        (now - Duration::minutes(minutes_ago)).to_rfc3339()
    }

    #[test]
    fn test_categorize_first_rule_wins() {
        assert_eq!(categorize("Flash FLOOD after storm"), CrisisCategory::Flood);
        assert_eq!(categorize("Cyclone makes landfall"), CrisisCategory::Cyclone);
        assert_eq!(categorize("Sensex tumbles"), CrisisCategory::Market);
        assert_eq!(categorize("Parliament session begins"), CrisisCategory::General);
    }

    #[test]
    fn test_urgency_score() {
        let now = Utc::now();
        let fresh = Article::new("Breaking: earthquake kills 12, disaster declared", "PTI")
            .with_published_at(&at(now, 5));
        let category = categorize(&fresh.title);
        assert_eq!(category, CrisisCategory::Earthquake);
        // 50 + 30 + 25 + 20 + 20 = 145, capped
        assert_eq!(urgency_score(&fresh, category, now), 100);

        let stale = Article::new("Warning issued for traders", "ET").with_published_at(&at(now, 200));
        // 10 + 15, general category adds nothing
        assert_eq!(urgency_score(&stale, categorize(&stale.title), now), 25);

        let undated = Article::new("Quiet day", "X");
        assert_eq!(urgency_score(&undated, CrisisCategory::General, now), 0);
    }

    #[test]
    fn test_feed_status_tiers() {
        assert_eq!(feed_status("NDTV").0, FeedStatus::Verified);
        assert_eq!(feed_status("Economic Times").0, FeedStatus::Monitoring);
        assert_eq!(feed_status("Some Blog").1, FeedConfidence::Low);
    }

    #[test]
    fn test_deduplicate() {
        let articles = vec![
            Article::new("Cyclone alert issued!", "PTI"),
            Article::new("Cyclone alert issued", "ANI"),
            Article::new("Fire in Mumbai", "TOI"),
        ];
        let unique = deduplicate(&articles);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].source.name, "PTI");
    }

    #[test]
    fn test_triage_orders_and_limits() {
        let now = Utc::now();
        let articles = vec![
            Article::new("Stock market update", "ET").with_published_at(&at(now, 400)),
            Article::new("Flood alert in Kerala", "NDTV").with_published_at(&at(now, 10)),
            Article::new("Fire in Mumbai high-rise", "Times of India").with_published_at(&at(now, 90)),
        ];

        let items = triage(&articles, now, 2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, CrisisCategory::Flood);
        assert_eq!(items[0].location, "Kerala");
        assert!(items[0].is_breaking());
        assert_eq!(items[1].category, CrisisCategory::Fire);
        assert_eq!(items[1].status, FeedStatus::Monitoring);
    }

    #[test]
    fn test_location_and_time_ago() {
        assert_eq!(extract_location("Depression over the Bay of Bengal"), "Eastern Coast");
        assert_eq!(extract_location("Nothing specific"), "India");

        let now = Utc::now();
        assert_eq!(time_ago(now, now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2d ago");
    }
}
