//! Interactive sessions: prompts, dumps and the unsaved-work guard.

use std::fs;

use crate::helpers::tree_fixtures::*;
use mappinggen::command::{Session, SessionState};
use mappinggen::config::{EngineConfig, SessionConfig};
use tempfile::TempDir;

fn interact(session: &mut Session<'_>, input: &str) -> String {
    interact_bytes(session, input.as_bytes())
}

fn interact_bytes(session: &mut Session<'_>, input: &[u8]) -> String {
    let mut out = Vec::new();
    session
        .run_interactive(input, &mut out)
        .expect("session should not abort");
    String::from_utf8(out).unwrap()
}

#[test]
fn test_banner_and_farewell() {
    let tree = scenario_tree();
    let mut session = session(&tree);

    let text = interact(&mut session, "bye\nc Block\n");
    assert_eq!(text, "You're entering interaction mode.\n$> Bye~\n");
    assert_eq!(session.state(), SessionState::Terminated);
    assert!(session.output().is_empty());
}

#[test]
fn test_dump_to_default_path_then_bye() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.tiny");
    let tree = scenario_tree();
    let config = SessionConfig::default().with_output_path(&path);
    let mut session = Session::new(&tree, &EngineConfig::default(), config).unwrap();

    let text = interact(&mut session, "c Block\nbye\ndmp\nbye\n");
    assert!(text.contains("class\tnet/class_10=net/BlockF\n"));
    assert!(text.contains("WARNING: there are things not saved\n"));
    assert!(text.ends_with("Bye~\n"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "v1\tintermediary\tforge17\nCLASS\tnet/class_10\tnet/BlockF\n"
    );
}

#[test]
fn test_dump_to_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("explicit.tiny");
    let tree = scenario_tree();
    let mut session = session(&tree);

    let input = format!("f B.x\ndmp {}\n", path.display());
    interact(&mut session, &input);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "v1\tintermediary\tforge17\nFIELD\ta/B\tI\tx\tf_x\n"
    );
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn test_unopenable_dump_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("out.tiny");
    let tree = scenario_tree();
    let mut session = session(&tree);

    let input = format!("c Block\ndmp {}\nbye\n", path.display());
    let text = interact(&mut session, &input);
    assert!(text.contains("ERROR: IO error:"));
    assert!(text.contains("WARNING: there are things not saved\n"));
    assert!(!path.exists());
}

#[test]
fn test_failures_do_not_end_session() {
    let tree = ambiguous_tree();
    let mut session = session(&tree);

    let text = interact(&mut session, "c B\nzz top\nc a/B\n");
    assert!(text.contains("ERROR: suffix B is too ambiguous (size=2): [a/B, c/B]\n"));
    assert!(text.contains("ERROR: Invalid process: zz\n"));
    assert!(text.contains("class\tclass_1=a/B_f\n"));
}

#[test]
fn test_long_errors_truncated() {
    let tree = scenario_tree();
    let config = SessionConfig::default().with_max_error_len(10);
    let mut session = Session::new(&tree, &EngineConfig::default(), config).unwrap();

    let text = interact(&mut session, "c NothingEndsLikeThis\n");
    assert!(text.contains("ERROR: no class e...\n"));
}

#[test]
fn test_undecodable_line_keeps_session_alive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.tiny");
    let tree = scenario_tree();
    let config = SessionConfig::default().with_output_path(&path);
    let mut session = Session::new(&tree, &EngineConfig::default(), config).unwrap();

    let text = interact_bytes(&mut session, b"c Block\nc \xff\xfe\ndmp\nbye\n");
    assert!(text.contains("ERROR: Line is not valid UTF-8"));
    assert!(text.ends_with("Bye~\n"));
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "v1\tintermediary\tforge17\nCLASS\tnet/class_10\tnet/BlockF\n"
    );
}
