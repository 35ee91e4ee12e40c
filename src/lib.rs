// Declare modules
pub mod cache;
pub mod data;
pub mod error;
pub mod hebrew;
pub mod lexicon;
pub mod models;
pub mod progress;

// Re-export key types for easier use
pub use error::{Result, TorahError};
pub use lexicon::Lexicon;
pub use models::{
    Book, Chapter, Commentary, LexiconEntry, Metadata, Occurrence, TorahDatabase, Translation,
    Verse, WordAnalysis,
};

use cache::CACHE_TTL_DAYS;
use chrono::Utc;
use directories_next::ProjectDirs;
use log::{info, warn};
use progress::ProgressCallback;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const SNAPSHOT_FILENAME: &str = "torah-snapshot.json";

/// Options for loading the Torah dataset.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Optional directory for the persisted snapshot. If None, the default
    /// location based on ProjectDirs will be used.
    pub data_dir: Option<PathBuf>,
    /// Delete any persisted snapshot and refetch, ignoring its age.
    pub force_refresh: bool,
}

/// The main interface to the loaded dataset.
///
/// The database is immutable once loaded and shared behind an `Arc`, so
/// `Clone` is cheap and lookups from multiple tasks need no locking.
#[derive(Clone)]
pub struct TorahData {
    db: Arc<TorahDatabase>,
}

impl TorahData {
    /// Loads the dataset using default options (automatic snapshot path).
    pub async fn load() -> Result<Self> {
        Self::load_with_options(LoadOptions::default(), None).await
    }

    /// Loads the dataset with specific options.
    ///
    /// Runs the freshness gate over the persisted snapshot: a fresh snapshot
    /// is served as-is; an absent, corrupt, or expired one triggers a fetch
    /// (or seed assembly) and a wholesale snapshot overwrite.
    pub async fn load_with_options(
        options: LoadOptions,
        reporter: Option<ProgressCallback>,
    ) -> Result<Self> {
        let snapshot_path = Self::snapshot_path(options.data_dir)?;
        info!("Using snapshot path: {:?}", snapshot_path);

        if options.force_refresh {
            info!("Force refresh requested; discarding any persisted snapshot.");
            cache::clear_snapshot(&snapshot_path)?;
        }

        let snapshot = cache::load_snapshot(&snapshot_path);
        if !cache::is_stale(snapshot.as_ref(), Utc::now(), CACHE_TTL_DAYS) {
            info!("Snapshot is fresh; using cached dataset.");
            // is_stale returned false, so the snapshot is present.
            let snapshot = snapshot.ok_or_else(|| {
                TorahError::Internal("Fresh verdict without a snapshot".to_string())
            })?;
            return Ok(TorahData {
                db: Arc::new(snapshot.payload),
            });
        }

        info!("Snapshot absent or stale; fetching dataset.");
        let database = data::ensure_database(reporter).await?;
        if let Err(e) = cache::write_snapshot(&snapshot_path, &database) {
            warn!("Failed to persist dataset snapshot: {e}");
        }

        Ok(TorahData {
            db: Arc::new(database),
        })
    }

    /// Resolves the snapshot file path, creating the data directory.
    pub fn snapshot_path(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
        let dir = match data_dir_override {
            Some(dir) => dir,
            None => {
                let project_dirs = ProjectDirs::from("org", "TorahRs", data::TORAH_SUBDIR)
                    .ok_or(TorahError::DataDirNotFound)?;
                project_dirs.data_dir().to_path_buf()
            }
        };
        fs::create_dir_all(&dir)?;
        Ok(dir.join(SNAPSHOT_FILENAME))
    }

    /// Deletes the persisted snapshot.
    ///
    /// If `data_dir_override` is `Some`, the snapshot inside that directory
    /// is removed; otherwise the default location is used.
    pub fn clear_cache(data_dir_override: Option<PathBuf>) -> Result<()> {
        let path = Self::snapshot_path(data_dir_override)?;
        cache::clear_snapshot(&path)
    }

    // --- Query Methods ---

    pub fn database(&self) -> &TorahDatabase {
        &self.db
    }

    pub fn metadata(&self) -> &Metadata {
        &self.db.metadata
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.db.lexicon
    }

    /// Finds a book by any of its name forms (English, transliteration,
    /// Hebrew, Russian).
    pub fn book(&self, name: &str) -> Result<&Book> {
        self.db
            .book(name)
            .ok_or_else(|| TorahError::BookNotFound(name.to_string()))
    }

    /// Retrieves a specific verse.
    pub fn verse(&self, book: &str, chapter: u32, verse: u32) -> Result<&Verse> {
        let book_data = self.book(book)?;
        book_data
            .chapters
            .iter()
            .find(|c| c.number == chapter)
            .and_then(|c| c.verses.iter().find(|v| v.number == verse))
            .ok_or_else(|| TorahError::VerseNotFound {
                book: book_data.english.clone(),
                chapter,
                verse,
            })
    }

    /// Number of chapters in a book. An unknown book counts as 0 rather
    /// than an error, so navigation callers can size dropdowns without a
    /// failure path; use [`TorahData::book`] when absence must be surfaced.
    pub fn chapter_count(&self, book: &str) -> usize {
        self.db
            .book(book)
            .map(|b| b.chapters.len())
            .unwrap_or(0)
    }

    /// Number of verses in a chapter. Follows the same 0-for-missing
    /// convention as [`TorahData::chapter_count`].
    pub fn verse_count(&self, book: &str, chapter: u32) -> usize {
        self.db
            .book(book)
            .and_then(|b| b.chapters.iter().find(|c| c.number == chapter))
            .map(|c| c.verses.len())
            .unwrap_or(0)
    }

    /// Resolves a Hebrew word against the lexicon. Total: a miss yields the
    /// synthetic "unknown" analysis, never an error.
    pub fn analyze_word(&self, word: &str) -> WordAnalysis {
        self.db.lexicon.lookup(word)
    }

    /// Picks a random lexicon entry, or `None` on an empty lexicon.
    pub fn random_word(&self) -> Option<(String, LexiconEntry)> {
        self.db
            .lexicon
            .random_entry()
            .map(|(key, entry)| (key.clone(), entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn loaded_seed() -> TorahData {
        TorahData {
            db: Arc::new(data::seed_database()),
        }
    }

    #[test]
    fn verse_lookup_by_any_book_name() {
        let torah = loaded_seed();
        assert!(torah.verse("Genesis", 1, 1).is_ok());
        assert!(torah.verse("Берешит", 1, 1).is_ok());
        assert!(torah.verse("bereishit", 1, 2).is_ok());
    }

    #[test]
    fn missing_book_and_verse_are_distinct_errors() {
        let torah = loaded_seed();
        assert!(matches!(
            torah.verse("Psalms", 1, 1),
            Err(TorahError::BookNotFound(_))
        ));
        assert!(matches!(
            torah.verse("Genesis", 1, 99),
            Err(TorahError::VerseNotFound { .. })
        ));
    }

    #[test]
    fn counts_reflect_seed_shape() {
        let torah = loaded_seed();
        assert_eq!(torah.chapter_count("Genesis"), 1);
        assert_eq!(torah.verse_count("Genesis", 1), 3);
        assert_eq!(torah.verse_count("Genesis", 2), 0);
        // Unknown books count as zero instead of erroring; book() is the
        // accessor that reports absence.
        assert_eq!(torah.chapter_count("Psalms"), 0);
        assert_eq!(torah.verse_count("Psalms", 1), 0);
        assert!(torah.book("Psalms").is_err());
    }

    #[test]
    fn analyze_word_is_total() {
        let torah = loaded_seed();
        let hit = torah.analyze_word("בָּרָא");
        assert_eq!(hit.root, "ברא");
        let miss = torah.analyze_word("קדש");
        assert_eq!(miss.translations.len(), 1);
    }

    #[test]
    fn random_word_from_seed() {
        let torah = loaded_seed();
        let (key, entry) = torah.random_word().expect("seed lexicon is not empty");
        assert!(torah.lexicon().get(&key).is_some());
        assert!(!entry.meanings.is_empty());
    }

    #[tokio::test]
    async fn fresh_snapshot_is_served_without_fetching() {
        let dir = tempdir().unwrap();
        let snapshot_path = dir.path().join(SNAPSHOT_FILENAME);
        let seeded = data::seed_database();
        cache::write_snapshot(&snapshot_path, &seeded).unwrap();

        // A fresh snapshot short-circuits before any network access.
        let torah = TorahData::load_with_options(
            LoadOptions {
                data_dir: Some(dir.path().to_path_buf()),
                force_refresh: false,
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(torah.database().books.len(), seeded.books.len());
        assert_eq!(torah.metadata().total_words, seeded.metadata.total_words);
    }

    #[test]
    fn clear_cache_removes_snapshot() {
        let dir = tempdir().unwrap();
        let snapshot_path = dir.path().join(SNAPSHOT_FILENAME);
        cache::write_snapshot(&snapshot_path, &data::seed_database()).unwrap();
        assert!(snapshot_path.exists());
        TorahData::clear_cache(Some(dir.path().to_path_buf())).unwrap();
        assert!(!snapshot_path.exists());
    }
}
