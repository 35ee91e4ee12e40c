//! Command-line interface for the torah_rs interlinear dataset library.
//!
//! Provides commands for viewing verses word-by-word, looking up Hebrew
//! words in the lexicon, exporting the static JSON dataset, and managing
//! the local snapshot cache.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{LevelFilter, error, info};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use torah_rs::{
    LoadOptions, TorahData, WordAnalysis,
    error::Result,
    lexicon::is_fallback,
    progress::{ProgressCallback, ProgressUpdate},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Interlinear Torah reader CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for the persisted dataset snapshot (optional)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Discard the persisted snapshot and refetch the dataset
    #[arg(long, global = true, default_value_t = false)]
    force_refresh: bool,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a verse word-by-word with translations
    Verse {
        /// Book name (English, transliteration, Hebrew, or Russian)
        book: String,
        chapter: u32,
        verse: u32,
    },
    /// Look up a Hebrew word in the lexicon
    Word {
        /// The word, with or without vowel points
        word: String,
    },
    /// Show a random lexicon entry
    Random,
    /// Export the static JSON dataset files
    Export {
        /// Output directory
        dir: String,
    },
    /// Delete the persisted dataset snapshot
    ClearCache,
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Creates a progress callback for displaying download progress.
fn create_progress_callback(
    multi_progress: MultiProgress,
    progress_bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
) -> ProgressCallback {
    Box::new(move |update: ProgressUpdate| {
        let mut bars = progress_bars.lock().unwrap();

        if update.current_item == 0 && !bars.contains_key(&update.stage_description) {
            let pb = multi_progress.add(ProgressBar::new(update.total_items.unwrap_or(0)));
            let style_template = if update.total_items.is_some() {
                "{prefix:>12.cyan.bold} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({percent}%) {msg}"
            } else {
                "{prefix:>12.cyan.bold} [{elapsed_precise}] {spinner} {msg}"
            };

            pb.set_style(
                ProgressStyle::default_bar()
                    .template(style_template)
                    .unwrap()
                    .progress_chars("##-"),
            );
            pb.set_prefix(update.stage_description.clone());
            pb.set_message(update.message.unwrap_or_default());
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            bars.insert(update.stage_description.clone(), pb);
        } else if let Some(pb) = bars.get(&update.stage_description) {
            pb.set_position(update.current_item);
            if let Some(msg) = update.message {
                pb.set_message(msg);
            }
            if let Some(total) = update.total_items {
                if update.current_item >= total {
                    pb.finish_and_clear();
                }
            }
        }
        true
    })
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.as_ref().map(PathBuf::from);

    // clear-cache does not need a loaded dataset.
    if let Commands::ClearCache = cli.command {
        match TorahData::clear_cache(data_dir) {
            Ok(_) => println!("{}", "Snapshot cache cleared successfully.".green()),
            Err(e) => {
                error!("Failed to clear snapshot cache: {}", e);
                eprintln!("{}", format!("Error clearing cache: {}", e).red());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    info!("Loading Torah dataset...");

    let multi_progress = MultiProgress::new();
    let progress_bars = Arc::new(Mutex::new(HashMap::<String, ProgressBar>::new()));
    let callback = create_progress_callback(multi_progress.clone(), progress_bars.clone());

    let load_options = LoadOptions {
        data_dir,
        force_refresh: cli.force_refresh,
    };

    let torah_result = TorahData::load_with_options(load_options, Some(callback)).await;

    // Clean up progress bars
    {
        let bars = progress_bars.lock().unwrap();
        for (_, pb) in bars.iter() {
            pb.finish_and_clear();
        }
    }
    drop(multi_progress);
    std::io::stdout().flush().ok();

    let torah = match torah_result {
        Ok(torah) => {
            info!("Torah dataset loaded successfully.");
            torah
        }
        Err(e) => {
            error!("Failed to load Torah dataset: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Verse {
            book,
            chapter,
            verse,
        } => {
            if let Err(e) = handle_verse(&torah, &book, chapter, verse) {
                error!("Error during verse command: {}", e);
                eprintln!(
                    "{}",
                    format!("Error showing {} {}:{}: {}", book, chapter, verse, e).red()
                );
                std::process::exit(1);
            }
        }
        Commands::Word { word } => handle_word(&torah, &word),
        Commands::Random => handle_random(&torah),
        Commands::Export { dir } => {
            let dir = PathBuf::from(dir);
            match torah_rs::data::export_database(torah.database(), &dir) {
                Ok(_) => println!(
                    "{}",
                    format!("Dataset exported to {}.", dir.display()).green()
                ),
                Err(e) => {
                    error!("Failed to export dataset: {}", e);
                    eprintln!("{}", format!("Error exporting dataset: {}", e).red());
                    std::process::exit(1);
                }
            }
        }
        Commands::ClearCache => unreachable!("handled before loading"),
    }

    Ok(())
}

/// Handles the verse command: interlinear display of one verse.
fn handle_verse(torah: &TorahData, book: &str, chapter: u32, verse_num: u32) -> Result<()> {
    let book_data = torah.book(book)?;
    let verse = torah.verse(book, chapter, verse_num)?;

    println!(
        "\n{} ({}) {}:{}",
        book_data.hebrew.bold().cyan(),
        book_data.russian.italic(),
        chapter,
        verse_num
    );
    println!("  {}", verse.hebrew.join(" ").bold());
    println!("  {}\n", verse.russian.italic());

    for word in &verse.words {
        print_word_block(word, "  ");
    }
    Ok(())
}

/// Handles the word command: lexicon lookup for a single word.
fn handle_word(torah: &TorahData, word: &str) {
    let analysis = torah.analyze_word(word);
    if is_fallback(&analysis) {
        println!(
            "{}",
            format!("No lexicon entry for '{}'; showing heuristic analysis.", word).yellow()
        );
    }
    print_word_block(&analysis, "");
}

fn print_word_block(word: &WordAnalysis, indent: &str) {
    println!(
        "{}{} ~ {}",
        indent,
        word.hebrew.bold().cyan(),
        word.transliteration.italic()
    );
    if !word.root.is_empty() {
        println!("{}  {}: {}", indent, "Корень".magenta(), word.root.green());
    }
    for (i, translation) in word.translations.iter().enumerate() {
        println!(
            "{}  {}: {}",
            indent,
            (i + 1).to_string().bold(),
            translation.meaning
        );
        if let Some(context) = &translation.context {
            println!("{}     {}", indent, context.dimmed());
        }
        if let Some(grammar) = &translation.grammar {
            println!("{}     {}", indent, grammar.italic().dimmed());
        }
    }
    if word.occurrences > 1 {
        println!(
            "{}  {}: {}",
            indent,
            "Встречается".magenta(),
            word.occurrences
        );
    }
    if let Some(occ) = &word.first_occurrence {
        println!(
            "{}  {}: {} {}:{}",
            indent,
            "Впервые".magenta(),
            occ.book,
            occ.chapter,
            occ.verse
        );
    }
    println!();
}

fn handle_random(torah: &TorahData) {
    match torah.random_word() {
        Some((key, entry)) => {
            println!(
                "Random word: {} ({})",
                key.bold().cyan(),
                entry.root.green()
            );
            for meaning in &entry.meanings {
                println!("  {}", meaning.meaning);
            }
            if let Some(occ) = &entry.first_occurrence {
                println!("  {} {}:{}", occ.book, occ.chapter, occ.verse);
            }
        }
        None => {
            eprintln!("{}", "The lexicon is empty.".red());
        }
    }
}
