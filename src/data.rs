//! Dataset assembly and download.
//!
//! This module is the Rust rendition of the offline data-build step: it
//! fetches the published gzipped JSON bundle when the network allows, and
//! otherwise assembles the built-in starter dataset (seed lexicon plus
//! sample verses). It also exports the static JSON file set consumed by the
//! web front end.

use crate::error::{Result, TorahError};
use crate::hebrew;
use crate::lexicon::Lexicon;
use crate::models::{
    Book, Chapter, LexiconEntry, Metadata, Occurrence, TorahDatabase, Translation, Verse,
};
use crate::progress::{ProgressCallback, ProgressUpdate, report};
use chrono::Utc;
use flate2::read::GzDecoder;
use futures::StreamExt;
use log::{info, warn};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Dataset schema/build version stamped into the metadata.
pub const DATASET_VERSION: &str = "1.0.0";
/// Subdirectory name within the user's data directory.
pub const TORAH_SUBDIR: &str = "torah-rs";
/// Published dataset bundle (gzipped JSON).
const DATASET_URL: &str =
    "https://github.com/torah-rs/torah-dataset/releases/download/v1.0.0/torah-complete.json.gz";

/// Upstream sources the dataset is assembled from, recorded in metadata.
const SOURCES: [&str; 3] = ["sefaria", "openscriptures", "mechon-mamre"];

const TORAH_BOOKS: [(&str, &str, &str, &str); 5] = [
    ("Genesis", "בראשית", "Берешит", "Bereishit"),
    ("Exodus", "שמות", "Шмот", "Shemot"),
    ("Leviticus", "ויקרא", "Вайикра", "Vayikra"),
    ("Numbers", "במדבר", "Бамидбар", "Bamidbar"),
    ("Deuteronomy", "דברים", "Дварим", "Devarim"),
];

/// Downloads the dataset bundle, streaming with progress reporting, then
/// decompresses and parses it off the async runtime.
pub async fn download_database(
    url: &str,
    mut reporter: Option<ProgressCallback>,
) -> Result<TorahDatabase> {
    let stage_desc = "Downloading Torah data".to_string();

    info!("Downloading dataset from {} (streaming)...", url);
    let response = reqwest::get(url).await?.error_for_status()?;
    let total_size = response.content_length();

    report(
        &mut reporter,
        ProgressUpdate::new_stage(stage_desc.clone(), total_size),
    );

    let mut compressed: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        compressed.extend_from_slice(&chunk);
        downloaded += chunk.len() as u64;

        report(
            &mut reporter,
            ProgressUpdate {
                stage_description: stage_desc.clone(),
                current_item: downloaded,
                total_items: total_size,
                message: None,
            },
        );
    }

    report(
        &mut reporter,
        ProgressUpdate {
            stage_description: stage_desc.clone(),
            current_item: total_size.unwrap_or(downloaded),
            total_items: total_size,
            message: Some("Download complete.".to_string()),
        },
    );
    info!("Download complete ({} bytes compressed).", downloaded);

    let database = tokio::task::spawn_blocking(move || -> Result<TorahDatabase> {
        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut json = String::new();
        decoder.read_to_string(&mut json)?;
        serde_json::from_str(&json).map_err(TorahError::from)
    })
    .await
    .map_err(|e| TorahError::Internal(format!("Decompression task panicked: {e}")))??;

    info!(
        "Parsed dataset: {} books, {} lexicon entries.",
        database.books.len(),
        database.lexicon.len()
    );
    Ok(database)
}

/// Produces a usable dataset: the published bundle when reachable, the
/// embedded seed otherwise.
pub async fn ensure_database(reporter: Option<ProgressCallback>) -> Result<TorahDatabase> {
    match download_database(DATASET_URL, reporter).await {
        Ok(database) => Ok(database),
        Err(e) => {
            warn!("Dataset download failed ({e}); assembling built-in seed dataset.");
            Ok(seed_database())
        }
    }
}

/// Assembles the built-in starter dataset: sample verses for each book,
/// analyzed word-by-word against the seed lexicon.
pub fn seed_database() -> TorahDatabase {
    let lexicon = seed_lexicon();

    let books: Vec<Book> = TORAH_BOOKS
        .iter()
        .map(|&(english, hebrew_name, russian, transliteration)| {
            let verses = sample_verses(english)
                .iter()
                .enumerate()
                .map(|(i, &(hebrew_text, russian_text))| {
                    analyze_verse(i as u32 + 1, hebrew_text, russian_text, &lexicon)
                })
                .collect();
            let chapters = vec![Chapter { number: 1, verses }];
            let word_count = count_words(&chapters);
            let unique_words = count_unique_words(&chapters);
            Book {
                english: english.to_string(),
                hebrew: hebrew_name.to_string(),
                russian: russian.to_string(),
                transliteration: transliteration.to_string(),
                chapters,
                word_count,
                unique_words,
            }
        })
        .collect();

    let total_words = books.iter().map(|b| b.word_count).sum();
    let unique_words = {
        let mut forms = std::collections::HashSet::new();
        for book in &books {
            collect_consonantal_forms(&book.chapters, &mut forms);
        }
        forms.len() as u32
    };

    TorahDatabase {
        books,
        lexicon,
        commentaries: Vec::new(),
        metadata: Metadata {
            total_words,
            unique_words,
            last_updated: Some(Utc::now().to_rfc3339()),
            sources: SOURCES.iter().map(|s| s.to_string()).collect(),
            version: Some(DATASET_VERSION.to_string()),
        },
    }
}

/// Splits a verse into words and analyzes each one against the lexicon.
pub fn analyze_verse(number: u32, hebrew_text: &str, russian: &str, lexicon: &Lexicon) -> Verse {
    let words = hebrew::split_words(hebrew_text);
    let analyses = words.iter().map(|w| lexicon.lookup(w)).collect();
    Verse {
        number,
        hebrew: words,
        russian: russian.to_string(),
        words: analyses,
    }
}

fn count_words(chapters: &[Chapter]) -> u32 {
    chapters
        .iter()
        .flat_map(|c| &c.verses)
        .map(|v| v.words.len() as u32)
        .sum()
}

fn collect_consonantal_forms(
    chapters: &[Chapter],
    forms: &mut std::collections::HashSet<String>,
) {
    for verse in chapters.iter().flat_map(|c| &c.verses) {
        for word in &verse.words {
            forms.insert(hebrew::strip_niqqud(&word.hebrew));
        }
    }
}

fn count_unique_words(chapters: &[Chapter]) -> u32 {
    let mut forms = std::collections::HashSet::new();
    collect_consonantal_forms(chapters, &mut forms);
    forms.len() as u32
}

/// Sample verse material for the seed dataset (Hebrew with full niqqud,
/// Russian running translation).
fn sample_verses(book: &str) -> &'static [(&'static str, &'static str)] {
    match book {
        "Genesis" => &[
            (
                "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם וְאֵת הָאָרֶץ",
                "В начале сотворил Бог небо и землю.",
            ),
            (
                "וְהָאָרֶץ הָיְתָה תֹהוּ וָבֹהוּ וְחֹשֶׁךְ עַל־פְּנֵי תְהוֹם",
                "Земля же была безвидна и пуста, и тьма над бездною.",
            ),
            (
                "וְרוּחַ אֱלֹהִים מְרַחֶפֶת עַל־פְּנֵי הַמָּיִם",
                "И Дух Божий носился над водою.",
            ),
        ],
        _ => &[(
            "דְּבַר־יְהוָה הָיָה אֶל־אַבְרָם בַּמַּחֲזֶה לֵאמֹר",
            "После сих происшествий было слово Господне к Авраму в видении.",
        )],
    }
}

/// The built-in starter dictionary: the most common words of the opening
/// verses, with Russian glosses.
pub fn seed_lexicon() -> Lexicon {
    fn occ(book: &str, chapter: u32, verse: u32) -> Option<Occurrence> {
        Some(Occurrence {
            book: book.to_string(),
            chapter,
            verse,
        })
    }

    [
        (
            "ברא".to_string(),
            LexiconEntry {
                root: "ברא".into(),
                meanings: vec![
                    Translation::new("создавать")
                        .with_context("божественное творение из ничего")
                        .with_grammar("глагол Qal"),
                    Translation::new("творить")
                        .with_context("приводить в существование нечто новое"),
                    Translation::new("созидать").with_context("формировать или устраивать"),
                ],
                frequency: 48,
                related_words: vec!["בריה".into(), "בראשית".into(), "בורא".into()],
                first_occurrence: occ("Genesis", 1, 1),
                etymology: Some("Семитский корень, связанный с разделением".into()),
            },
        ),
        (
            "אלהים".to_string(),
            LexiconEntry {
                root: "אלה".into(),
                meanings: vec![
                    Translation::new("Бог")
                        .with_context("единый Творец вселенной")
                        .with_grammar("имя существительное мужского рода множественного числа"),
                    Translation::new("Всесильный").with_context("обладающий всемогуществом"),
                    Translation::new("Судья").with_context("высший судья и правитель"),
                ],
                frequency: 2602,
                related_words: vec!["אל".into(), "אלוה".into(), "אלי".into()],
                first_occurrence: occ("Genesis", 1, 1),
                etymology: Some("Множественная форма величия от אלוה".into()),
            },
        ),
        (
            "השמים".to_string(),
            LexiconEntry {
                root: "שמה".into(),
                meanings: vec![
                    Translation::new("небеса")
                        .with_context("небосвод, атмосфера")
                        .with_grammar("имя существительное с артиклем"),
                    Translation::new("небо").with_context("видимое пространство над землей"),
                ],
                frequency: 421,
                related_words: vec!["שם".into(), "שמיים".into()],
                first_occurrence: occ("Genesis", 1, 1),
                etymology: Some("От корня שמה - быть высоким".into()),
            },
        ),
        (
            "הארץ".to_string(),
            LexiconEntry {
                root: "ארץ".into(),
                meanings: vec![
                    Translation::new("земля")
                        .with_context("планета или суша")
                        .with_grammar("имя существительное женского рода с артиклем"),
                    Translation::new("страна").with_context("определенная территория или народ"),
                    Translation::new("почва").with_context("поверхность для земледелия"),
                ],
                frequency: 2505,
                related_words: vec!["ארצה".into(), "ארצי".into(), "ארצות".into()],
                first_occurrence: occ("Genesis", 1, 1),
                etymology: Some("Основной семитский корень".into()),
            },
        ),
        (
            "בראשית".to_string(),
            LexiconEntry {
                root: "ראש".into(),
                meanings: vec![
                    Translation::new("в начале")
                        .with_context("во время начала")
                        .with_grammar("предлог + имя существительное"),
                    Translation::new("изначально").with_context("с самого начала"),
                ],
                frequency: 1,
                related_words: vec!["ראש".into(), "ראשון".into(), "ראשית".into()],
                first_occurrence: occ("Genesis", 1, 1),
                etymology: Some("ב (в) + ראשית (начало)".into()),
            },
        ),
        (
            "את".to_string(),
            LexiconEntry {
                root: "את".into(),
                meanings: vec![
                    Translation::new("[знак прямого дополнения]")
                        .with_context("указывает на определенное прямое дополнение")
                        .with_grammar("частица"),
                    Translation::new("вместе с").with_context("в значении союза (редко)"),
                ],
                frequency: 7853,
                related_words: vec!["אתכם".into(), "אתנו".into(), "אותו".into()],
                first_occurrence: occ("Genesis", 1, 1),
                etymology: Some("Основная грамматическая частица иврита".into()),
            },
        ),
        (
            "והארץ".to_string(),
            LexiconEntry {
                root: "ארץ".into(),
                meanings: vec![
                    Translation::new("и земля")
                        .with_context("продолжение описания творения")
                        .with_grammar("союз + имя существительное с артиклем"),
                    Translation::new("а земля")
                        .with_context("противопоставление состояния земли небесам"),
                ],
                frequency: 1,
                related_words: vec!["ארץ".into(), "הארץ".into()],
                first_occurrence: occ("Genesis", 1, 2),
                etymology: Some("ו (и) + ה (артикль) + ארץ (земля)".into()),
            },
        ),
        (
            "היתה".to_string(),
            LexiconEntry {
                root: "היה".into(),
                meanings: vec![
                    Translation::new("была")
                        .with_context("состояние существования в прошлом")
                        .with_grammar("глагол Qal прошедшего времени"),
                    Translation::new("стала").with_context("изменение состояния"),
                ],
                frequency: 3576,
                related_words: vec!["הוה".into(), "יהיה".into()],
                first_occurrence: occ("Genesis", 1, 2),
                etymology: None,
            },
        ),
        (
            "תהו".to_string(),
            LexiconEntry {
                root: "תהו".into(),
                meanings: vec![
                    Translation::new("хаос")
                        .with_context("состояние беспорядка и пустоты")
                        .with_grammar("имя существительное мужского рода"),
                    Translation::new("пустота").with_context("отсутствие формы и содержания"),
                ],
                frequency: 20,
                related_words: vec!["בהו".into(), "שוא".into()],
                first_occurrence: occ("Genesis", 1, 2),
                etymology: Some("Древний семитский корень, связанный с пустотой".into()),
            },
        ),
        (
            "ובהו".to_string(),
            LexiconEntry {
                root: "בהו".into(),
                meanings: vec![
                    Translation::new("и пуста")
                        .with_context("состояние полной пустоты")
                        .with_grammar("союз + имя существительное мужского рода"),
                    Translation::new("и безвидна").with_context("отсутствие видимой формы"),
                ],
                frequency: 3,
                related_words: vec!["תהו".into(), "ריקם".into()],
                first_occurrence: occ("Genesis", 1, 2),
                etymology: Some("ו (и) + בהו (пустота)".into()),
            },
        ),
    ]
    .into_iter()
    .collect()
}

/// Writes the static JSON file set consumed by the web front end:
/// the complete database, the lexicon alone, one file per book, and the
/// metadata record.
pub fn export_database(database: &TorahDatabase, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    fs::write(
        dir.join("torah-complete.json"),
        serde_json::to_string_pretty(database)?,
    )?;
    fs::write(
        dir.join("hebrew-lexicon.json"),
        serde_json::to_string_pretty(&database.lexicon)?,
    )?;
    for book in &database.books {
        fs::write(
            dir.join(format!("{}.json", book.english.to_lowercase())),
            serde_json::to_string_pretty(book)?,
        )?;
    }
    fs::write(
        dir.join("metadata.json"),
        serde_json::to_string_pretty(&database.metadata)?,
    )?;

    info!("Exported dataset files to {dir:?}");
    Ok(())
}
