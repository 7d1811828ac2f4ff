//! Linguistic red flags in claim text
//!
//! Each rule is evaluated independently; a claim collects one flag per
//! matching rule, in rule order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Detection rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagRule {
    /// "breaking", "urgent", "shocking"
    SensationalLanguage,
    /// "!!!", "share immediately", "must see"
    UrgencyManipulation,
    /// "cover-up", "hiding", "they don't want"
    ConspiracyLanguage,
    /// Three or more exclamation marks anywhere
    ExcessiveExclamation,
}

impl RedFlagRule {
    pub const ALL: [RedFlagRule; 4] = [
        Self::SensationalLanguage,
        Self::UrgencyManipulation,
        Self::ConspiracyLanguage,
        Self::ExcessiveExclamation,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::SensationalLanguage => {
                "Sensational language detected: 'BREAKING', 'URGENT', or 'SHOCKING'"
            }
            Self::UrgencyManipulation => "Urgency manipulation detected",
            Self::ConspiracyLanguage => "Conspiracy-style language detected",
            Self::ExcessiveExclamation => {
                "Multiple exclamation marks (emotional manipulation indicator)"
            }
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Self::SensationalLanguage => SENSATIONAL_REGEX.is_match(text),
            Self::UrgencyManipulation => URGENCY_REGEX.is_match(text),
            Self::ConspiracyLanguage => CONSPIRACY_REGEX.is_match(text),
            Self::ExcessiveExclamation => {
                text.chars().filter(|&c| c == '!').count() >= EXCLAMATION_THRESHOLD
            }
        }
    }
}

/// A red flag attached to an analysis; remote models may add free-form ones
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedFlag(String);

impl RedFlag {
    pub fn new(description: &str) -> Self {
        Self(description.to_string())
    }

    pub fn description(&self) -> &str {
        &self.0
    }

    /// The local rule that produced this flag, if any
    pub fn rule(&self) -> Option<RedFlagRule> {
        RedFlagRule::ALL
            .into_iter()
            .find(|rule| rule.description() == self.0)
    }
}

impl From<RedFlagRule> for RedFlag {
    fn from(rule: RedFlagRule) -> Self {
        Self::new(rule.description())
    }
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const EXCLAMATION_THRESHOLD: usize = 3;

static SENSATIONAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)breaking|urgent|shocking").unwrap());

static URGENCY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!!!|share immediately|must see").unwrap());

static CONSPIRACY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cover-up|hiding|they don't want").unwrap());

/// Rules matched by the claim, in evaluation order
pub fn detect_red_flag_rules(claim: &str) -> Vec<RedFlagRule> {
    RedFlagRule::ALL
        .into_iter()
        .filter(|rule| rule.matches(claim))
        .collect()
}

/// Red flags for the claim, in rule order
pub fn detect_red_flags(claim: &str) -> Vec<RedFlag> {
    detect_red_flag_rules(claim)
        .into_iter()
        .map(RedFlag::from)
        .collect()
}
