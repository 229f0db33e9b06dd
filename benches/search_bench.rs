// Performance benchmarks for gematria-finder operations

use gematria_finder::{
    parse_target, AnagramConfig, AnagramDecomposer, CorpusIndex, DataLoader, PhraseSearch,
    SchemeSet, SearchConfig,
};
use std::time::Instant;

fn main() {
    println!("🏃 Gematria Finder Performance Benchmarks\n");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("Failed to start runtime");
    let words = DataLoader::words();

    let index = bench_index_build(&words);
    runtime.block_on(bench_search(&index));
    bench_anagram(&index);

    println!("\n✅ Benchmarks completed!");
}

fn bench_index_build(words: &[&str]) -> CorpusIndex {
    println!("📚 INDEX BUILD");
    println!("─────────────────────────────");

    let schemes = SchemeSet::standard();
    let iterations = 50;
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = CorpusIndex::build(words, &schemes);
    }
    let duration = start.elapsed();

    println!(
        "  {} words → {:.3}ms avg over {} builds",
        words.len(),
        duration.as_secs_f64() * 1000.0 / iterations as f64,
        iterations
    );
    println!();
    CorpusIndex::build(words, &schemes)
}

async fn bench_search(index: &CorpusIndex) {
    println!("🎯 PHRASE SEARCH");
    println!("─────────────────────────────");

    let engine = PhraseSearch::new(SearchConfig {
        seed: Some(42),
        ..SearchConfig::default()
    })
    .expect("Invalid search config");

    let targets = vec![
        "primary=57",
        "primary=74,secondary=444",
        "simple=111,jewish=666",
        "p=201,s=1206,t=204",
    ];

    for expr in targets {
        let target = parse_target(expr).expect("Invalid target");
        let start = Instant::now();
        let report = engine
            .search(&target, index, 200_000, 10_000)
            .await
            .expect("Search failed");
        let duration = start.elapsed();

        println!(
            "  {:<26} → {:<9} {:>7} attempts in {:.3}ms  ({})",
            expr,
            report.outcome.to_string(),
            report.attempts,
            duration.as_secs_f64() * 1000.0,
            report.outcome.phrase()
        );
    }
    println!();
}

fn bench_anagram(index: &CorpusIndex) {
    println!("🔤 ANAGRAM");
    println!("─────────────────────────────");

    let decomposer = AnagramDecomposer::new(AnagramConfig {
        seed: Some(42),
        ..AnagramConfig::default()
    });
    let inputs = vec!["the silver moon", "ancient golden river", "whisper of the wind"];

    for input in inputs {
        let start = Instant::now();
        let result = decomposer
            .decompose(input, index.records(), 1000)
            .expect("Decompose failed");
        let duration = start.elapsed();

        println!(
            "  {:<22} → {} (leftover {}) in {:.3}ms",
            input,
            result.phrase.join(" "),
            result.leftover,
            duration.as_secs_f64() * 1000.0
        );
    }
}
