//! Class queries: exact names, suffixes and ambiguity.

use crate::helpers::tree_fixtures::*;
use mappinggen::config::EngineConfig;
use mappinggen::engine::ShortNameEngine;
use mappinggen::FailureKind;
use rstest::rstest;

// =============================================================================
// EXACT LOOKUP
// =============================================================================

#[test]
fn test_exact_class_cached_after_first_call() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let first = engine.resolve_class("net/Block").unwrap();
    assert_eq!(first.from.as_ref(), "net/class_10");
    assert_eq!(first.to.as_ref(), "net/BlockF");
    assert_eq!(engine.stats().class_scans, 0);
    assert_eq!(engine.stats().cache_hits, 0);

    let second = engine.resolve_class("net/Block").unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.stats().class_scans, 0);
    assert_eq!(engine.stats().cache_hits, 1);
}

// =============================================================================
// SUFFIX LOOKUP
// =============================================================================

#[rstest]
#[case("Block", Ok("net/class_10"))]
#[case("Stone", Ok("net/class_20"))]
#[case("/Stone", Ok("net/class_20"))]
#[case("Missing", Err(FailureKind::Absent))]
fn test_suffix_outcomes(#[case] query: &str, #[case] expected: Result<&str, FailureKind>) {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let outcome = engine
        .resolve_class(query)
        .map(|class| class.from.to_string())
        .map_err(|failure| failure.kind());
    assert_eq!(outcome, expected.map(str::to_string));
    assert_eq!(engine.stats().class_scans, 1);
}

#[test]
fn test_ambiguous_lists_exact_candidate_set() {
    let tree = ambiguous_tree();
    let mut engine = engine(&tree);

    let failure = engine.resolve_class("B").unwrap_err();
    assert!(failure.is_ambiguous());

    let mut candidates: Vec<&str> = failure.candidates().iter().map(|c| c.as_ref()).collect();
    candidates.sort_unstable();
    assert_eq!(candidates, vec!["a/B", "c/B"]);
    assert_eq!(
        failure.message(),
        "suffix B is too ambiguous (size=2): [a/B, c/B]"
    );
}

#[test]
fn test_candidate_full_names_hit_cache_without_scan() {
    let tree = ambiguous_tree();
    let mut engine = engine(&tree);

    engine.resolve_class("B").unwrap_err();
    let scans = engine.stats().class_scans;

    for candidate in ["a/B", "c/B"] {
        assert!(engine.resolve_class(candidate).is_ok());
    }
    assert_eq!(engine.stats().class_scans, scans);
    assert_eq!(engine.stats().cache_hits, 2);
}

#[test]
fn test_absent_is_rescanned() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    engine.resolve_class("Nothing").unwrap_err();
    engine.resolve_class("Nothing").unwrap_err();
    assert_eq!(engine.stats().class_scans, 2);
    assert!(!engine.is_class_cached("Nothing"));
}

// =============================================================================
// CACHE BOUNDS
// =============================================================================

#[test]
fn test_bounded_class_cache_evicts_oldest() {
    let tree = scenario_tree();
    let config = EngineConfig::default().with_class_cache_capacity(1);
    let mut engine = ShortNameEngine::new(&tree, &config).unwrap();

    engine.resolve_class("Block").unwrap();
    engine.resolve_class("Block").unwrap();
    assert_eq!(engine.stats().class_scans, 1);

    engine.resolve_class("Stone").unwrap();
    engine.resolve_class("Block").unwrap();
    assert_eq!(engine.stats().class_scans, 3);
}
