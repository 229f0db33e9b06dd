// Integration tests for target parsing and configuration

use gematria_finder::{
    parse_target, CorpusIndex, FinderConfig, PhraseSearch, Scheme, SchemeSet, SearchOutcome,
    TargetError,
};
use std::io::Write;

#[test]
fn test_parse_display_round() {
    let target = parse_target("primary=74, quaternary=1000").unwrap();
    assert_eq!(target.to_string(), "primary=74,quaternary=1000");
    assert_eq!(parse_target(&target.to_string()).unwrap(), target);
}

#[test]
fn test_disabled_schemes_ignored_by_distance() {
    let schemes = SchemeSet::standard();
    let target = parse_target("simple=6").unwrap();
    // "cab" hits primary; its other totals do not count
    assert_eq!(target.distance(&schemes.weight_vector("cab")), 0);
    assert_eq!(target.distance(&schemes.weight_vector("cabs")), 19);
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_target(""), Err(TargetError::EmptyTarget));
    assert!(matches!(
        parse_target("primary=6,chaldean=3"),
        Err(TargetError::UnknownScheme { .. })
    ));
    assert!(matches!(
        parse_target("p=1,primary=2"),
        Err(TargetError::DuplicateScheme { scheme: Scheme::Primary })
    ));
}

#[tokio::test]
async fn test_config_file_drives_search() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "search": {{ "seed": 12, "length_bands": [{{ "min_words": 1, "max_words": 1 }}] }} }}"#
    )
    .unwrap();

    let config = FinderConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.search.seed, Some(12));

    let index = CorpusIndex::build(["cab", "abc", "moon"], &SchemeSet::standard());
    let target = parse_target("primary=57").unwrap();
    let report = PhraseSearch::new(config.search)
        .unwrap()
        .search(&target, &index, 10, 1000)
        .await
        .unwrap();

    assert!(report.outcome.is_match());
    assert_eq!(report.outcome.phrase().words, vec!["moon"]);
    assert_eq!(report.attempts, 1);
}

#[tokio::test]
async fn test_largest_parsed_values_search_cleanly() {
    let target = parse_target("primary=18446744073709551615,secondary=1").unwrap();
    let index = CorpusIndex::build(["cab", "abc"], &SchemeSet::standard());

    let report = PhraseSearch::default()
        .search(&target, &index, 10, 1000)
        .await
        .unwrap();
    match report.outcome {
        SearchOutcome::Exhausted(best) => assert_eq!(best.distance, u64::MAX),
        other => panic!("expected Exhausted, got {}", other),
    }
}
