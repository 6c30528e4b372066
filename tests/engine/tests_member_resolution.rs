//! Field and method queries.

use crate::helpers::tree_fixtures::*;
use mappinggen::config::EngineConfig;
use mappinggen::engine::ShortNameEngine;
use mappinggen::tree::MemberKind;

#[test]
fn test_field_by_owner_suffix() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let field = engine.resolve_field("B.x").unwrap();
    assert_eq!(field.entry.owner.as_ref(), "a/B");
    assert_eq!(field.entry.name.as_ref(), "x");
    assert_eq!(field.entry.desc.as_ref(), "I");
    assert_eq!(field.to.as_ref(), "f_x");
}

#[test]
fn test_exact_member_cached_without_scan() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let first = engine.resolve_method("net/Block.tick:(I)V").unwrap();
    assert_eq!(first.to.as_ref(), "m_13_");
    let second = engine.resolve_method("net/Block.tick:(I)V").unwrap();

    assert_eq!(first, second);
    let stats = engine.stats();
    assert_eq!(stats.member_scans, 0);
    assert_eq!(stats.class_scans, 0);
    assert_eq!(stats.cache_hits, 1);
}

#[test]
fn test_descriptor_is_matched_in_query_namespace() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let method = engine
        .resolve_method("net/Stone.canReplace:(Lnet/Block;)Z")
        .unwrap();
    assert_eq!(method.entry.to_string(), "net/class_20.method_21:(Lnet/class_10;)Z");
    assert_eq!(engine.stats().member_scans, 0);
}

#[test]
fn test_overload_ambiguity_then_full_key_hit() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let failure = engine.resolve_method("Block.tick").unwrap_err();
    assert!(failure.is_ambiguous());
    assert_eq!(
        failure.message(),
        "method Block.tick is ambiguous (size=2): [net/Block.tick:()V, net/Block.tick:(I)V]"
    );
    let scans = engine.stats().member_scans;

    let resolved = engine.resolve_method("net/Block.tick:()V").unwrap();
    assert_eq!(resolved.to.as_ref(), "m_12_");
    assert_eq!(engine.stats().member_scans, scans);
    assert!(engine.is_member_cached(MemberKind::Method, "net/Block.tick:(I)V"));
}

#[test]
fn test_member_without_owner_scans_tree() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    let field = engine.resolve_field("hardness").unwrap();
    assert_eq!(field.entry.owner.as_ref(), "net/class_10");

    let failure = engine.resolve_field("hardness:I").unwrap_err();
    assert!(failure.is_absent());
    assert_eq!(failure.message(), "No such field named hardness:I");
}

#[test]
fn test_owner_failure_surfaces_unchanged() {
    let tree = ambiguous_tree();
    let mut engine = engine(&tree);

    let failure = engine.resolve_field("B.x").unwrap_err();
    assert!(failure.is_ambiguous());
    assert_eq!(failure.message(), "suffix B is too ambiguous (size=2): [a/B, c/B]");

    let failure = engine.resolve_field("Q.x").unwrap_err();
    assert!(failure.is_absent());
    assert_eq!(failure.message(), "no class ends with Q");
}

#[test]
fn test_fields_and_methods_cached_separately() {
    let tree = scenario_tree();
    let mut engine = engine(&tree);

    engine.resolve_field("Block.hardness").unwrap();
    assert!(engine.is_member_cached(MemberKind::Field, "Block.hardness"));
    assert!(!engine.is_member_cached(MemberKind::Method, "Block.hardness"));
    assert!(engine.resolve_method("Block.hardness").unwrap_err().is_absent());
}

#[test]
fn test_bounded_member_cache_evicts_oldest() {
    let tree = scenario_tree();
    let config = EngineConfig::default().with_member_cache_capacity(1);
    let mut engine = ShortNameEngine::new(&tree, &config).unwrap();

    engine.resolve_field("Block.hardness").unwrap();
    engine.resolve_field("Block.hardness").unwrap();
    assert_eq!(engine.stats().member_scans, 1);

    engine.resolve_field("B.x").unwrap();
    assert!(!engine.is_member_cached(MemberKind::Field, "Block.hardness"));

    engine.resolve_field("Block.hardness").unwrap();
    assert_eq!(engine.stats().member_scans, 3);
}
