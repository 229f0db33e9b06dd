// Gematria Finder CLI Tool
// Command-line interface for weighing text and searching phrases

use clap::{Args, Parser, Subcommand};
use gematria_finder::{
    parse_target, weigh, AnagramDecomposer, CorpusStore, DataLoader, FinderConfig, FinderError,
    PhraseSearch, Scheme, SchemeSet, SearchOutcome, TargetVector,
};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Gematria Finder - Weigh text and find phrases with chosen weights
#[derive(Parser, Debug)]
#[command(name = "gm-find")]
#[command(about = "Weigh text and search for phrases under four gematria schemes", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file (defaults plus GF_* variables otherwise)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show search progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show totals and letter breakdowns for a text
    Weigh {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Search for a phrase hitting a target, e.g. "primary=74,quaternary=1000"
    Find {
        #[arg(value_name = "TARGET")]
        target: String,

        /// Wall-clock budget in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the effective configuration as JSON
    Config,

    /// Split a set of letters into corpus words
    Anagram {
        #[arg(value_name = "LETTERS")]
        letters: String,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Attempt cap
    #[arg(short, long)]
    attempts: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Word list, one word per line (built-in list otherwise)
    #[arg(long, value_name = "FILE")]
    words: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => FinderConfig::from_json_file(path)?,
        None => FinderConfig::from_env()?,
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Weigh { text } => {
            print_weights(&text);
            Ok(())
        }
        Command::Find {
            target,
            timeout_ms,
            run,
        } => {
            let target = parse_target(&target)?;
            find(config, &target, timeout_ms, &run).await
        }
        Command::Config => {
            println!("{}", config.to_json()?);
            Ok(())
        }
        Command::Anagram { letters, run } => anagram(config, &letters, &run),
    }
}

fn print_weights(text: &str) {
    let schemes = SchemeSet::standard();
    println!("{}", text);
    println!("─────────────────────────────────────────────────");
    for scheme in Scheme::ALL {
        let weighing = weigh(text, schemes.table(scheme));
        let breakdown: Vec<String> = weighing
            .breakdown
            .iter()
            .map(|(ch, w)| format!("{}={}", ch, w))
            .collect();
        println!(
            "{:<11} ({:<7}) {:>6}   {}",
            scheme.to_string(),
            scheme.alias(),
            weighing.total,
            breakdown.join(" ")
        );
    }
}

fn load_words(run: &RunArgs) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    match &run.words {
        Some(path) => Ok(DataLoader::words_from_file(path)?),
        None => Ok(DataLoader::words().into_iter().map(str::to_string).collect()),
    }
}

async fn find(
    mut config: FinderConfig,
    target: &TargetVector,
    timeout_ms: Option<u64>,
    run: &RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(seed) = run.seed {
        config.search.seed = Some(seed);
    }
    let max_attempts = run.attempts.unwrap_or(config.search.max_attempts);
    let timeout_ms = timeout_ms.unwrap_or(config.search.timeout_ms);

    let words = load_words(run)?;
    let mut store = CorpusStore::new(SchemeSet::standard());
    let index = store.load(words.as_slice());
    let engine = PhraseSearch::new(config.search)?;

    let report = match engine.search(target, &index, max_attempts, timeout_ms).await {
        Ok(report) => report,
        Err(e) => {
            println!("❌ {}: {}", e, hint(&e));
            return Ok(());
        }
    };

    println!("Target: {}", target);
    match &report.outcome {
        SearchOutcome::Matched(phrase) => {
            println!("✅ Match after {} attempts:\n", report.attempts);
            println!("   {}", phrase);
        }
        outcome => {
            let label = if matches!(outcome, SearchOutcome::TimedOut(_)) {
                "Timed out"
            } else {
                "No exact match"
            };
            println!(
                "❌ {} after {} attempts; try a different target.\n",
                label, report.attempts
            );
            println!(
                "   Closest: {}  (off by {}) {}",
                outcome.phrase(),
                outcome.distance(),
                closeness_bar(outcome.distance(), target)
            );
        }
    }

    let achieved = report.outcome.phrase().weights;
    for scheme in target.enabled_schemes() {
        println!(
            "   {:<11} {:>6} / {}",
            scheme.to_string(),
            achieved.get(scheme),
            target.values[scheme.slot()]
        );
    }
    Ok(())
}

fn anagram(
    mut config: FinderConfig,
    letters: &str,
    run: &RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(seed) = run.seed {
        config.anagram.seed = Some(seed);
    }
    let max_attempts = run.attempts.unwrap_or(config.anagram.max_attempts);

    let words = load_words(run)?;
    let mut store = CorpusStore::new(SchemeSet::standard());
    let index = store.load(words.as_slice());
    let decomposer = AnagramDecomposer::new(config.anagram);

    match decomposer.decompose(letters, index.records(), max_attempts) {
        Ok(result) if result.leftover == 0 => {
            println!("✅ {}", result.phrase.join(" "));
        }
        Ok(result) => {
            warn!(leftover = result.leftover, "no complete decomposition");
            println!(
                "❌ Closest uses all but {} letters: {}",
                result.leftover,
                result.phrase.join(" ")
            );
        }
        Err(e) => println!("❌ {}: {}", e, hint(&e)),
    }
    Ok(())
}

/// What the user can do about a failed run
fn hint(error: &FinderError) -> &'static str {
    match error {
        FinderError::EmptyCorpus => "please wait for data to load",
        FinderError::EmptyInput => "please enter a non-empty phrase",
        FinderError::NoEnabledScheme => "name at least one scheme",
        FinderError::NoDecomposition { .. } => "try a different phrase",
    }
}

/// Visual closeness of an approximation to the target
fn closeness_bar(distance: u64, target: &TargetVector) -> String {
    let total: f64 = target
        .enabled_schemes()
        .map(|s| target.values[s.slot()] as f64)
        .sum();
    let closeness = if total == 0.0 {
        0.0
    } else {
        1.0 - (distance as f64 / total).min(1.0)
    };

    let bar_len = 10;
    let filled = (closeness * bar_len as f64) as usize;
    let mut bar = String::from("[");
    for i in 0..bar_len {
        if i < filled {
            bar.push('█');
        } else {
            bar.push('░');
        }
    }
    bar.push(']');
    bar
}
