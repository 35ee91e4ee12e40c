//! The consonantal-key lexicon and its two-tier lookup.

use crate::hebrew::{self, strip_niqqud};
use crate::models::{LexiconEntry, Translation, WordAnalysis};
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only mapping from consonantal key to dictionary entry.
///
/// Built once (by the dataset assembler or deserialized from the static
/// JSON) and never mutated afterwards; the loaded database shares it behind
/// an `Arc`, so concurrent lookups need no coordination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    pub fn new(entries: HashMap<String, LexiconEntry>) -> Self {
        Lexicon { entries }
    }

    pub fn get(&self, key: &str) -> Option<&LexiconEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LexiconEntry)> {
        self.entries.iter()
    }

    /// Picks a random `(key, entry)` pair, or `None` on an empty lexicon.
    pub fn random_entry(&self) -> Option<(&String, &LexiconEntry)> {
        self.entries.iter().choose(&mut rand::rng())
    }

    /// Resolves a raw (possibly voweled) word to its analysis.
    ///
    /// Ordered strategy list, first match wins:
    /// 1. the vowel-stripped consonantal key;
    /// 2. the raw input itself (covers entries keyed by a pre-normalized
    ///    form and words carrying no vowel points at all);
    /// 3. the synthetic "unknown" fallback with a heuristic root guess.
    ///
    /// Total: every input yields a well-formed result with at least one
    /// translation. A miss is normal control flow, not an error.
    pub fn lookup(&self, word: &str) -> WordAnalysis {
        let consonants = strip_niqqud(word);
        let candidate_keys = [consonants.as_str(), word];

        for key in candidate_keys {
            if let Some(entry) = self.entries.get(key) {
                return WordAnalysis {
                    hebrew: word.to_string(),
                    transliteration: hebrew::transliterate(word),
                    root: entry.root.clone(),
                    translations: entry.meanings.clone(),
                    occurrences: entry.frequency,
                    first_occurrence: entry.first_occurrence.clone(),
                };
            }
        }

        WordAnalysis {
            hebrew: word.to_string(),
            transliteration: hebrew::transliterate(word),
            root: hebrew::guess_root(&consonants),
            translations: vec![unknown_translation()],
            occurrences: 1,
            first_occurrence: None,
        }
    }
}

impl FromIterator<(String, LexiconEntry)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (String, LexiconEntry)>>(iter: I) -> Self {
        Lexicon {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The fixed fallback gloss substituted when both lookup tiers miss.
fn unknown_translation() -> Translation {
    Translation::new("неизвестно")
        .with_context("требует дополнительного анализа")
        .with_grammar("неопределено")
}

/// True when `analysis` carries the fallback gloss rather than a real
/// lexicon match.
pub fn is_fallback(analysis: &WordAnalysis) -> bool {
    analysis.translations.len() == 1 && analysis.translations[0] == unknown_translation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Occurrence;

    fn entry(root: &str, gloss: &str, frequency: u32) -> LexiconEntry {
        LexiconEntry {
            root: root.to_string(),
            meanings: vec![Translation::new(gloss)],
            frequency,
            related_words: Vec::new(),
            first_occurrence: Some(Occurrence {
                book: "Genesis".into(),
                chapter: 1,
                verse: 1,
            }),
            etymology: None,
        }
    }

    fn sample_lexicon() -> Lexicon {
        [
            ("ברא".to_string(), entry("ברא", "создавать", 48)),
            ("אלהים".to_string(), entry("אלה", "Бог", 2602)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn voweled_word_matches_via_normalized_key() {
        let lexicon = sample_lexicon();
        let analysis = lexicon.lookup("בָּרָא");
        assert_eq!(analysis.root, "ברא");
        assert_eq!(analysis.translations[0].meaning, "создавать");
        assert_eq!(analysis.occurrences, 48);
        assert!(!is_fallback(&analysis));
    }

    #[test]
    fn raw_key_tier_fires_when_normalized_tier_misses() {
        // Entry keyed by a voweled form: the normalized key "שם" is absent,
        // the raw input matches directly.
        let lexicon: Lexicon = [("שָׁם".to_string(), entry("שם", "там", 5))]
            .into_iter()
            .collect();
        let analysis = lexicon.lookup("שָׁם");
        assert_eq!(analysis.translations[0].meaning, "там");
        assert!(!is_fallback(&analysis));
    }

    #[test]
    fn normalized_tier_takes_precedence_over_raw() {
        let lexicon: Lexicon = [
            ("ברא".to_string(), entry("ברא", "создавать", 48)),
            ("בָּרָא".to_string(), entry("ברא", "raw-keyed", 1)),
        ]
        .into_iter()
        .collect();
        let analysis = lexicon.lookup("בָּרָא");
        assert_eq!(analysis.translations[0].meaning, "создавать");
    }

    #[test]
    fn miss_yields_fallback_with_heuristic_root() {
        let lexicon = sample_lexicon();
        let analysis = lexicon.lookup("וְהָאָרֶץ");
        assert!(is_fallback(&analysis));
        assert_eq!(analysis.translations.len(), 1);
        assert_eq!(analysis.translations[0].meaning, "неизвестно");
        // Prefix ו dropped, then first three consonants.
        assert_eq!(analysis.root, "האר");
        assert_eq!(analysis.occurrences, 1);
        assert!(analysis.first_occurrence.is_none());
    }

    #[test]
    fn empty_lexicon_still_returns_one_translation() {
        let lexicon = Lexicon::default();
        let analysis = lexicon.lookup("שלום");
        assert_eq!(analysis.translations.len(), 1);
        assert_eq!(analysis.translations[0].meaning, "неизвестно");
    }

    #[test]
    fn never_empty_translations_for_odd_inputs() {
        let lexicon = sample_lexicon();
        for word in ["", "latin", "123", "־"] {
            let analysis = lexicon.lookup(word);
            assert!(
                !analysis.translations.is_empty(),
                "empty translations for {word:?}"
            );
        }
    }

    #[test]
    fn serde_transparent_object_form() {
        let json = r#"{
            "ברא": { "root": "ברא", "meanings": [{ "meaning": "создавать" }] }
        }"#;
        let lexicon: Lexicon = serde_json::from_str(json).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert!(lexicon.get("ברא").is_some());
    }

    #[test]
    fn random_entry_none_on_empty() {
        assert!(Lexicon::default().random_entry().is_none());
        assert!(sample_lexicon().random_entry().is_some());
    }
}
