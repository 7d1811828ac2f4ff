//! Significant-term extraction from free text

/// Keywords used to build an evidence search query
pub const SEARCH_QUERY_KEYWORDS: usize = 4;

/// Keywords checked against a remote analysis for relevance
pub const RELEVANCE_KEYWORDS: usize = 5;

/// Articles, prepositions, auxiliary verbs and question words
const STOP_WORDS: &[&str] = &[
    // articles
    "the", "a", "an",
    // prepositions
    "in", "on", "at", "to", "for", "of", "with", "by", "from", "into", "onto", "about",
    "over", "under", "after", "before", "between", "through", "during", "against",
    "without", "within", "upon", "across", "towards",
    // auxiliary verbs
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had",
    "having", "does", "did", "done", "will", "would", "shall", "should", "could",
    "might", "must",
    // question words
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
];

/// Tokens this short carry no search signal
const MIN_KEYWORD_LEN: usize = 4;

/// Extract up to `max_count` significant terms, in original order
pub fn extract_keywords(text: &str, max_count: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(word))
        .take(max_count)
        .map(str::to_string)
        .collect()
}

/// Space-joined search query for the evidence collaborator
pub fn build_search_query(claim: &str) -> String {
    extract_keywords(claim, SEARCH_QUERY_KEYWORDS).join(" ")
}

/// First sentence of a claim, or the whole trimmed text if it has none
pub fn extract_main_claim(text: &str) -> String {
    let first = text
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim();

    if first.is_empty() {
        text.trim().to_string()
    } else {
        first.to_string()
    }
}
