//! Batch scripts: echo lines, serialized output and failure handling.

use crate::helpers::tree_fixtures::*;
use mappinggen::MappingGenError;
use rstest::rstest;

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_field_short_owner_scenario() {
    let tree = scenario_tree();
    let run = run_batch(&tree, "f B.x\n");

    assert!(run.result.is_ok());
    assert_eq!(run.echo, "field\ta/B.x:I=f_x\n");
    assert_eq!(
        run.mapping,
        "v1\tintermediary\tforge17\nFIELD\ta/B\tI\tx\tf_x\n"
    );
}

#[test]
fn test_ambiguous_class_then_full_name() {
    let tree = ambiguous_tree();
    let mut session = session(&tree);
    let mut echo = Vec::new();

    let err = session.execute_line("c B", &mut echo).unwrap_err();
    let failure = err.resolve_failure().unwrap();
    assert!(failure.is_ambiguous());
    assert!(failure.message().contains("a/B"));
    assert!(failure.message().contains("c/B"));

    session.execute_line("c a/B", &mut echo).unwrap();
    assert_eq!(String::from_utf8(echo).unwrap(), "class\tclass_1=a/B_f\n");
}

#[test]
fn test_full_script_output() {
    let tree = scenario_tree();
    let script = "c Block\nf Block.hardness\n\nm Stone.canReplace\n";
    let run = run_batch(&tree, script);

    assert_eq!(run.result.unwrap(), run.mapping.len());
    assert_eq!(
        run.echo,
        "class\tnet/class_10=net/BlockF\n\
         field\tnet/class_10.field_11:F=f_11_\n\
         method\tnet/class_20.method_21:(Lnet/class_10;)Z=m_21_\n"
    );
    assert_eq!(
        run.mapping,
        "v1\tintermediary\tforge17\n\
         CLASS\tnet/class_10\tnet/BlockF\n\
         FIELD\tnet/class_10\tF\tfield_11\tf_11_\n\
         METHOD\tnet/class_20\t(Lnet/class_10;)Z\tmethod_21\tm_21_\n"
    );
}

#[test]
fn test_batch_is_idempotent() {
    let tree = scenario_tree();
    let script = "fc net.Block.hardness\nm net.Stone.tick:()V >> Block\nc Missing !!\n";

    let first = run_batch(&tree, script);
    let second = run_batch(&tree, script);
    assert!(first.result.is_ok());
    assert_eq!(first.mapping, second.mapping);
    assert_eq!(first.echo, second.echo);
}

// =============================================================================
// SUPPRESSION AND ALIASES
// =============================================================================

#[test]
fn test_ignore_absent_emits_nothing() {
    let tree = scenario_tree();
    let run = run_batch(&tree, "f Block.missing !!\n");

    assert!(run.result.is_ok());
    assert!(run.echo.is_empty());
    assert_eq!(run.mapping, "v1\tintermediary\tforge17\n");
}

#[test]
fn test_ignore_absent_keeps_ambiguous() {
    let tree = scenario_tree();
    let run = run_batch(&tree, "m Block.tick !!\n");

    let err = run.result.unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(run.mapping.is_empty());
}

#[test]
fn test_alias_emits_two_entries() {
    let tree = scenario_tree();
    let run = run_batch(&tree, "m net.Stone.tick:()V >> Block\n");

    assert!(run.result.is_ok());
    assert_eq!(
        run.echo,
        "method\tnet/class_10.method_12:()V=m_12_\n\
         method\tnet/Stone.method_12:()V=m_12_\n"
    );
    assert!(run.mapping.contains("METHOD\tnet/class_10\t()V\tmethod_12\tm_12_\n"));
    assert!(run.mapping.contains("METHOD\tnet/Stone\t()V\tmethod_12\tm_12_\n"));
}

#[test]
fn test_field_alias_emits_two_entries() {
    let tree = scenario_tree();
    let run = run_batch(&tree, "f net.Stone.hardness >> Block\n");

    assert!(run.result.is_ok());
    assert_eq!(
        run.echo,
        "field\tnet/class_10.field_11:F=f_11_\n\
         field\tnet/Stone.field_11:F=f_11_\n"
    );
    assert_eq!(
        run.mapping,
        "v1\tintermediary\tforge17\n\
         FIELD\tnet/class_10\tF\tfield_11\tf_11_\n\
         FIELD\tnet/Stone\tF\tfield_11\tf_11_\n"
    );
}

// =============================================================================
// FAILURES
// =============================================================================

#[rstest]
#[case("f Block.nothing", 2)]
#[case("m Block.tick", 3)]
#[case("q Block", 4)]
#[case("c", 4)]
#[case("f Block.hardness >>", 4)]
fn test_first_failure_aborts_with_line(#[case] bad: &str, #[case] code: i32) {
    let tree = scenario_tree();
    let script = format!("c Block\n{bad}\nc Stone\n");
    let run = run_batch(&tree, &script);

    let err = run.result.unwrap_err();
    assert_eq!(err.exit_code(), code);
    match &err {
        MappingGenError::Line { number, text, .. } => {
            assert_eq!(*number, 2);
            assert_eq!(text, bad);
        }
        other => panic!("expected a line error, got {other:?}"),
    }
    assert!(run.echo.starts_with("class\tnet/class_10=net/BlockF\nERROR: "));
    assert!(!run.echo.contains("net/StoneF"));
    assert!(run.mapping.is_empty());
}
