//! Faith-aware vocabulary substitution.
//!
//! Lesson scripts are written with Hindu greetings and religious terms.
//! Learners from Muslim or Christian families see their own household's
//! words instead. Matching is whole-word and case-insensitive; a capitalised
//! source word yields a capitalised replacement.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaithTradition {
    /// Base vocabulary of the lesson scripts
    #[default]
    Hindu,
    Muslim,
    Christian,
}

impl FaithTradition {
    pub const ALL: [FaithTradition; 3] = [
        FaithTradition::Hindu,
        FaithTradition::Muslim,
        FaithTradition::Christian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaithTradition::Hindu => "hindu",
            FaithTradition::Muslim => "muslim",
            FaithTradition::Christian => "christian",
        }
    }
}

impl fmt::Display for FaithTradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaithTradition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        FaithTradition::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownTradition(s.to_string()))
    }
}

/// (base term, Muslim equivalent, Christian equivalent), all lowercase.
const TERMS: &[(&str, &str, &str)] = &[
    ("ram ram", "salaam", "namaste"),
    ("bhagwan", "allah", "parmeshwar"),
    ("mandir", "masjid", "girja"),
    ("puja", "namaz", "prarthana"),
    ("diwali", "eid", "christmas"),
    ("pandit", "maulana", "padri"),
    ("bhajan", "naat", "bhajan"),
    ("prasad", "tabarruk", "prasad"),
];

static TERM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut bases: Vec<&str> = TERMS.iter().map(|(base, _, _)| *base).collect();
    // Longest first so multi-word terms win over their parts.
    bases.sort_by_key(|b| std::cmp::Reverse(b.len()));
    let alternation = bases
        .iter()
        .map(|b| regex::escape(b))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("term table builds a valid regex")
});

/// Replacement for `base` (lowercase) under `tradition`.
pub fn equivalent(base: &str, tradition: FaithTradition) -> Option<&'static str> {
    TERMS.iter().find(|(b, _, _)| *b == base).map(|(b, muslim, christian)| match tradition {
        FaithTradition::Hindu => *b,
        FaithTradition::Muslim => *muslim,
        FaithTradition::Christian => *christian,
    })
}

/// Rewrite `text` into the vocabulary of `tradition`.
pub fn substitute(text: &str, tradition: FaithTradition) -> String {
    if tradition == FaithTradition::Hindu {
        return text.to_string();
    }
    TERM_PATTERN
        .replace_all(text, |caps: &Captures| {
            let found = &caps[0];
            match equivalent(&found.to_lowercase(), tradition) {
                Some(replacement) => match_case(found, replacement),
                None => found.to_string(),
            }
        })
        .into_owned()
}

fn match_case(original: &str, replacement: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    replacement.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hindu_text_is_unchanged() {
        let text = "Ram Ram, Nani! Mandir jaye ke hai?";
        assert_eq!(substitute(text, FaithTradition::Hindu), text);
    }

    #[test]
    fn muslim_substitution_preserves_capitals() {
        assert_eq!(
            substitute("Ram Ram, Nani! Mandir jaye ke hai?", FaithTradition::Muslim),
            "Salaam, Nani! Masjid jaye ke hai?"
        );
    }

    #[test]
    fn christian_substitution() {
        assert_eq!(
            substitute("aaj puja hai, phir diwali", FaithTradition::Christian),
            "aaj prarthana hai, phir christmas"
        );
    }

    #[test]
    fn only_whole_words_match() {
        assert_eq!(
            substitute("pujari mandirwala", FaithTradition::Muslim),
            "pujari mandirwala"
        );
    }

    #[test]
    fn shouting_stays_upper_case() {
        assert_eq!(substitute("DIWALI!", FaithTradition::Muslim), "EID!");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Muslim".parse::<FaithTradition>().unwrap(), FaithTradition::Muslim);
        assert!("jedi".parse::<FaithTradition>().is_err());
    }

    #[test]
    fn every_term_has_equivalents() {
        for (base, _, _) in TERMS {
            for tradition in FaithTradition::ALL {
                assert!(equivalent(base, tradition).is_some());
            }
        }
    }
}
