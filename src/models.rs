use serde::{Deserialize, Serialize};

// Field names follow the camelCase JSON schema published by the dataset
// export, so the same files can be served to the web front end unchanged.

// --- Lexicon ---

/// One candidate gloss for a word occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
}

impl Translation {
    pub fn new(meaning: impl Into<String>) -> Self {
        Translation {
            meaning: meaning.into(),
            context: None,
            grammar: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_grammar(mut self, grammar: impl Into<String>) -> Self {
        self.grammar = Some(grammar.into());
        self
    }
}

/// A `{book, chapter, verse}` reference tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

/// One consonantal root's dictionary record.
///
/// Constructed once at dataset-build time (or load time from the static
/// JSON) and immutable thereafter. `meanings` is ordered: the first entry is
/// the primary gloss. `related_words` tolerates duplicates; no uniqueness
/// invariant is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    pub root: String,
    pub meanings: Vec<Translation>,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub related_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_occurrence: Option<Occurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
}

// --- Text ---

/// A single analyzed word occurrence as it appears in a verse.
///
/// Invariant: `translations` is never empty. When no lexicon entry matched,
/// the list holds the synthetic "unknown" translation instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnalysis {
    pub hebrew: String,
    pub transliteration: String,
    pub root: String,
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub occurrences: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_occurrence: Option<Occurrence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub number: u32,
    pub hebrew: Vec<String>,
    pub russian: String,
    pub words: Vec<WordAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub english: String,
    pub hebrew: String,
    pub russian: String,
    pub transliteration: String,
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub unique_words: u32,
}

// --- Commentary ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub author: String,
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<Occurrence>,
    pub language: String,
}

// --- Database ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub total_words: u32,
    #[serde(default)]
    pub unique_words: u32,
    /// ISO-8601 build timestamp. Optional so that a dataset missing the
    /// field still parses; the freshness gate treats it as stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The complete static dataset: books, lexicon, commentaries, metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorahDatabase {
    pub books: Vec<Book>,
    pub lexicon: crate::lexicon::Lexicon,
    #[serde(default)]
    pub commentaries: Vec<Commentary>,
    pub metadata: Metadata,
}

impl TorahDatabase {
    pub fn book(&self, name: &str) -> Option<&Book> {
        self.books.iter().find(|b| {
            b.english.eq_ignore_ascii_case(name)
                || b.transliteration.eq_ignore_ascii_case(name)
                || b.hebrew == name
                || b.russian == name
        })
    }
}
