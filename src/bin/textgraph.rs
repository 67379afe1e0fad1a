//! textgraph CLI: inspect the annotation graph of a saved response payload.
//!
//! Usage:
//!   textgraph [--config path] [-v] summary <payload.json>
//!   textgraph entities|words|tree|unresolved <payload.json>

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use textgraph::{DecodeConfig, Response, WordRef};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "textgraph",
    version,
    about = "Inspect cross-referenced text-analytics responses"
)]
struct Cli {
    /// Path to a YAML decode config (defaults to ~/.config/textgraph/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print status fields and annotation counts
    Summary {
        /// Response payload (JSON)
        payload: PathBuf,
    },
    /// List entities with the words they span
    Entities { payload: PathBuf },
    /// List words with the annotations that mention them
    Words { payload: PathBuf },
    /// Print each sentence's dependency tree
    Tree { payload: PathBuf },
    /// Print link requests whose target never appeared, as JSON
    Unresolved { payload: PathBuf },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<DecodeConfig, String> {
    let result = match path {
        Some(path) => DecodeConfig::load(&path),
        None => match DecodeConfig::default_path() {
            Some(path) => DecodeConfig::load_or_default(&path),
            None => Ok(DecodeConfig::default()),
        },
    };
    result.map_err(|e| format!("Failed to load config: {}", e))
}

fn load_response(path: &Path, config: &DecodeConfig) -> Result<Response, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    Response::parse(&text, config).map_err(|e| e.to_string())
}

fn token(word: &WordRef<'_>) -> String {
    word.token().unwrap_or("?").to_string()
}

fn cmd_summary(response: &Response) -> i32 {
    println!("{}", response.summary());
    if !response.message().is_empty() {
        println!("Message: {}", response.message());
    }
    println!("{:<16}  {:>7}", "KIND", "COUNT");
    println!("{}", "-".repeat(25));
    let rows = [
        ("custom", response.custom_annotations().count()),
        ("topics", response.topics().count()),
        ("coarse topics", response.coarse_topics().count()),
        ("entities", response.entities().count()),
        ("entailments", response.entailments().count()),
        ("relations", response.relations().count()),
        ("properties", response.properties().count()),
        ("noun phrases", response.noun_phrases().count()),
        ("sentences", response.sentences().count()),
        ("words", response.words().count()),
        ("unresolved", response.unresolved_links().len()),
    ];
    for (kind, count) in rows {
        println!("{:<16}  {:>7}", kind, count);
    }
    0
}

fn cmd_entities(response: &Response) -> i32 {
    if response.entities().next().is_none() {
        println!("No entities.");
        return 0;
    }
    for entity in response.entities() {
        let words: Vec<String> = entity.matched_words().map(|w| token(&w)).collect();
        println!(
            "{:<32}  {:>6}  {}",
            entity.id().unwrap_or("-"),
            entity
                .relevance_score()
                .map(|s| format!("{:.3}", s))
                .unwrap_or_default(),
            words.join(" ")
        );
    }
    0
}

fn cmd_words(response: &Response) -> i32 {
    for word in response.words() {
        let entities: Vec<&str> = word.entities().filter_map(|e| e.record().id()).collect();
        let phrases = word.noun_phrases().count();
        println!(
            "{:>5}  {:<20}  {:<6}  entities=[{}] relations={} phrases={}",
            word.position().map(|p| p.to_string()).unwrap_or_default(),
            token(&word),
            word.part_of_speech().unwrap_or(""),
            entities.join(", "),
            word.relations().count(),
            phrases
        );
    }
    0
}

/// Indented lines for the tree under `root`, depth first.
///
/// Walks with an explicit stack; chain depth is bounded by the heap only.
fn tree_lines(root: WordRef<'_>, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![(root, depth)];
    while let Some((word, depth)) = stack.pop() {
        lines.push(format!(
            "{}{} ({})",
            "  ".repeat(depth),
            token(&word),
            word.relation_to_parent().unwrap_or("-")
        ));
        let children: Vec<_> = word.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
    lines
}

fn cmd_tree(response: &Response) -> i32 {
    for (i, sentence) in response.sentences().enumerate() {
        println!("Sentence {}", i);
        match sentence.root_word() {
            Some(root) => {
                for line in tree_lines(root, 1) {
                    println!("{}", line);
                }
            }
            None => println!("  (no root)"),
        }
    }
    0
}

fn cmd_unresolved(response: &Response) -> i32 {
    match serde_json::to_string_pretty(response.unresolved_links()) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let payload = match &cli.command {
        Commands::Summary { payload }
        | Commands::Entities { payload }
        | Commands::Words { payload }
        | Commands::Tree { payload }
        | Commands::Unresolved { payload } => payload.clone(),
    };
    let response = match load_response(&payload, &config) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Summary { .. } => cmd_summary(&response),
        Commands::Entities { .. } => cmd_entities(&response),
        Commands::Words { .. } => cmd_words(&response),
        Commands::Tree { .. } => cmd_tree(&response),
        Commands::Unresolved { .. } => cmd_unresolved(&response),
    };
    std::process::exit(code);
}
