//! Procfile, formation and variables-file integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use procx_core::{parse_procfile, CoreError, Formation, TemplateVars};
use rstest::rstest;
use std::fs;

// ---------------------------------------------------------------------------
// 1. Procfile on disk
// ---------------------------------------------------------------------------

#[test]
fn procfile_from_disk_keeps_declared_order() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let procfile = dir.child("Procfile");
    procfile
        .write_str("web: ./bin/web -p $PORT\nworker: ./bin/worker --queue 'high low'\nclock: ./bin/clock\n")
        .expect("write");
    procfile.assert(predicate::str::contains("worker:"));

    let text = fs::read_to_string(procfile.path()).expect("read");
    let entries = parse_procfile(&text).expect("parse");
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["web", "worker", "clock"]);
    assert_eq!(entries[1].args(), ["--queue", "high low"]);
}

#[test]
fn error_message_names_the_line() {
    let err = parse_procfile("web: ok\n\nnot a process\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 3"), "got: {msg}");
    assert!(msg.contains("not a process"), "got: {msg}");
}

// ---------------------------------------------------------------------------
// 2. Formation against a parsed Procfile
// ---------------------------------------------------------------------------

#[rstest]
#[case("all=2", [2, 2, 2])]
#[case("all=2,worker=5", [2, 5, 2])]
#[case("web=1", [1, 0, 0])]
#[case("all=1,clock=-3", [1, 1, 0])]
#[case("", [0, 0, 0])]
fn formation_counts_per_type(#[case] formation_str: &str, #[case] expected: [u32; 3]) {
    let entries = parse_procfile("web: a\nworker: b\nclock: c\n").expect("parse");
    let formation = Formation::parse(formation_str).expect("formation");
    let counts: Vec<u32> = entries.iter().map(|e| formation.resolve(e)).collect();
    assert_eq!(counts, expected, "formation {formation_str:?}");
}

// ---------------------------------------------------------------------------
// 3. Variables file
// ---------------------------------------------------------------------------

#[test]
fn vars_file_must_be_a_mapping() {
    let mut vars = TemplateVars::new();
    let err = vars.merge_yaml("- just\n- a list\n").unwrap_err();
    assert!(matches!(err, CoreError::VarsYaml(_)), "got: {err}");
}
