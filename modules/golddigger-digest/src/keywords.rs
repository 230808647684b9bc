//! Naive keyword matching over comment text.
//!
//! Matching is case-insensitive substring containment: no tokenization, no
//! stemming, no word boundaries. "help" matches inside "helpful", and that is
//! the intended behavior.

use golddigger_common::ScoringVariant;

/// Praise, gratitude and actionable-feedback terms.
pub const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "best",
    "love",
    "amazing",
    "help",
    "tutorial",
    "fixed",
    "worked",
    "thanks",
    "genius",
    "insane",
    "mind blown",
    "life changing",
];

/// Relationship terms. Used for ranking, never for the high-value count.
pub const FAMILY_KEYWORDS: &[&str] = &[
    "mom",
    "mother",
    "dad",
    "father",
    "grandma",
    "grandpa",
    "grandmother",
    "grandfather",
    "sister",
    "brother",
    "wife",
    "husband",
    "daughter",
    "uncle",
    "cousin",
    "friend",
    "neighbor",
    "neighbour",
    "family",
];

/// Remedy/medication terms plus close family. Wider than, and independent of,
/// [`HIGH_VALUE_KEYWORDS`].
pub const HEALTH_SIGNAL_PATTERN: &[&str] = &[
    "med", "pill", "dose", "stop", "reduce", "healed", "tea", "juice", "diet", "mom", "dad",
    "grandma", "grandpa", "wife", "husband",
];

/// True iff any keyword occurs as a substring of the lower-cased text.
///
/// Empty keywords are ignored so a stray `""` cannot match everything.
pub fn matches(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| !kw.is_empty())
        .any(|kw| lower.contains(&kw.to_lowercase()))
}

/// A named, fixed keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSet {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordSet {
    pub const HIGH_VALUE: KeywordSet = KeywordSet {
        name: "high_value",
        keywords: HIGH_VALUE_KEYWORDS,
    };

    pub const FAMILY: KeywordSet = KeywordSet {
        name: "family",
        keywords: FAMILY_KEYWORDS,
    };

    pub const HEALTH_SIGNAL: KeywordSet = KeywordSet {
        name: "health_signal",
        keywords: HEALTH_SIGNAL_PATTERN,
    };

    /// The set that decides high-value membership for a deployment variant.
    pub fn for_variant(variant: ScoringVariant) -> Self {
        match variant {
            ScoringVariant::HighValue => Self::HIGH_VALUE,
            ScoringVariant::HealthSignal => Self::HEALTH_SIGNAL,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        matches(text, self.keywords)
    }
}

/// Whether the text mentions a family member or close relationship.
pub fn mentions_family(text: &str) -> bool {
    KeywordSet::FAMILY.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive() {
        assert!(matches("THANKS so much", HIGH_VALUE_KEYWORDS));
        assert!(matches("Best video ever", HIGH_VALUE_KEYWORDS));
    }

    #[test]
    fn substring_not_word() {
        // "help" inside "helpful"
        assert!(matches("very helpful", &["help"]));
        // "med" inside "medication" and "comedy" alike
        assert!(matches("a comedy", &["med"]));
    }

    #[test]
    fn multi_word_keywords() {
        assert!(matches("honestly Mind Blown", HIGH_VALUE_KEYWORDS));
        assert!(!matches("mind is blown", HIGH_VALUE_KEYWORDS));
    }

    #[test]
    fn no_match() {
        assert!(!matches("meh", HIGH_VALUE_KEYWORDS));
        assert!(!matches("", HIGH_VALUE_KEYWORDS));
    }

    #[test]
    fn empty_keyword_is_ignored() {
        assert!(!matches("anything", &[""]));
        assert!(!matches("anything", &[]));
    }

    #[test]
    fn uppercase_keywords_still_match() {
        assert!(matches("my grandma", &["GRANDMA"]));
    }

    #[test]
    fn family_mentions() {
        assert!(mentions_family("My Mom tried this"));
        assert!(mentions_family("my neighbour swears by it"));
        assert!(!mentions_family("I tried this myself"));
    }

    #[test]
    fn variant_selects_set() {
        assert_eq!(KeywordSet::for_variant(ScoringVariant::HighValue), KeywordSet::HIGH_VALUE);
        assert_eq!(
            KeywordSet::for_variant(ScoringVariant::HealthSignal),
            KeywordSet::HEALTH_SIGNAL
        );
    }

    #[test]
    fn health_set_is_distinct_from_high_value() {
        let text = "my dad stopped his pills";
        assert!(KeywordSet::HEALTH_SIGNAL.matches(text));
        assert!(!KeywordSet::HIGH_VALUE.matches(text));
    }
}
