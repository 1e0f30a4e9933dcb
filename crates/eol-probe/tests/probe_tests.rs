//! Probes against the real git.
//!
//! Only outcomes that cannot depend on file timestamps are asserted: git may
//! or may not re-read an unchanged file depending on how fast the probe runs.

mod common;

use common::*;
use eol_probe::{run_exploration, run_probes, GitOracle, ProbeError, ProbeOptions, Session};
use eol_table::{ConfigurationTuple, CoreAutocrlf, CoreEol, Eol, Mapping, Os, Step, Text, Transition};
use pretty_assertions::assert_eq;

fn assert_identity(mapping: &Mapping) {
    for (step, transition) in mapping.steps() {
        assert_eq!(*transition, Transition::IDENTITY, "{step}");
    }
}

#[test]
fn no_attributes_no_conversion() {
    let sandbox = Sandbox::new();
    let mut session = Session::new(&sandbox.oracle, sandbox.workspace()).unwrap();

    let mapping = session
        .probe(&config(Text::Undefined, Eol::Undefined, CoreAutocrlf::False, CoreEol::Lf))
        .unwrap();

    assert_identity(&mapping);
}

#[test]
fn non_text_attributes_keep_bytes() {
    let sandbox = Sandbox::new();
    let mut session = Session::new(&sandbox.oracle, sandbox.workspace()).unwrap();

    for text in [Text::False, Text::Binary] {
        for core_autocrlf in [CoreAutocrlf::False, CoreAutocrlf::True] {
            let mapping = session
                .probe(&config(text, Eol::Undefined, core_autocrlf, CoreEol::Crlf))
                .unwrap();
            assert_identity(&mapping);
        }
    }
}

#[test]
fn text_attribute_normalizes_on_commit() {
    let sandbox = Sandbox::new();
    let mut session = Session::new(&sandbox.oracle, sandbox.workspace()).unwrap();

    let mapping = session
        .probe(&config(Text::True, Eol::Undefined, CoreAutocrlf::False, CoreEol::Lf))
        .unwrap();

    // Committed history is never rewritten, and checkout to LF leaves it alone.
    assert_eq!(mapping.show, Transition::IDENTITY);
    assert_eq!(mapping.clone, Transition::IDENTITY);
    for step in [
        Step::CommitNew,
        Step::CommitModifySimpleFile,
        Step::CommitModifyLfFile,
        Step::CommitModifyCrLfFile,
        Step::CommitModifyMixedFile,
    ] {
        assert_eq!(*mapping.get(step), ALL_LF, "{step}");
    }
}

#[test]
fn shared_attributes_share_one_golden_repository() {
    let sandbox = Sandbox::new();
    let options = ProbeOptions {
        workspace: sandbox.workspace(),
        os: Some(Os::Unix),
    };
    let configs = [
        config(Text::Undefined, Eol::Undefined, CoreAutocrlf::False, CoreEol::Lf),
        config(Text::Undefined, Eol::Undefined, CoreAutocrlf::False, CoreEol::Native),
    ];

    let entries = run_probes(&sandbox.oracle, &options, &configs).unwrap();

    assert_eq!(entries.len(), 2);
    for (entry, config) in entries.iter().zip(configs) {
        assert_eq!(entry.config, config.with_os(Os::Unix));
    }
    let root = sandbox.workspace();
    assert_eq!(entries_with_prefix(&root, "source-").len(), 1);
    assert_eq!(entries_with_prefix(&root, "target-"), vec!["target-0", "target-1"]);
}

#[test]
fn run_starts_from_an_empty_workspace() {
    let sandbox = Sandbox::new();
    let root = sandbox.workspace();
    std::fs::create_dir_all(root.join("target-7")).unwrap();
    let options = ProbeOptions {
        workspace: root.clone(),
        os: None,
    };

    let configs = [config(Text::Undefined, Eol::Undefined, CoreAutocrlf::False, CoreEol::Lf)];
    let entries = run_probes(&sandbox.oracle, &options, &configs).unwrap();

    assert_eq!(entries[0].config.os, None);
    assert_eq!(entries_with_prefix(&root, "target-"), vec!["target-0"]);
}

#[test]
fn missing_git_aborts_the_run() {
    let sandbox = Sandbox::new();
    let oracle = GitOracle::new("no-such-git-binary-4711");
    let options = ProbeOptions {
        workspace: sandbox.workspace(),
        os: None,
    };
    let configs: Vec<ConfigurationTuple> = eol_table::Axes::probe().enumerate().unwrap();

    let err = run_probes(&oracle, &options, &configs).unwrap_err();
    assert!(matches!(err, ProbeError::Util(_)));
}

#[test]
fn exploration_without_attributes_is_identity() {
    let sandbox = Sandbox::new();
    let options = ProbeOptions {
        workspace: sandbox.workspace(),
        os: Some(Os::Windows),
    };
    let configs = [config(Text::Undefined, Eol::Undefined, CoreAutocrlf::False, CoreEol::Lf)];

    let entries = run_exploration(&sandbox.oracle, &options, &configs).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].config.os, Some(Os::Windows));
    let mapping = entries[0].mapping;
    assert_eq!(mapping.checkout, Transition::IDENTITY);
    assert_eq!(mapping.checkin, Transition::IDENTITY);
    assert_eq!(mapping.checkin_new, Transition::IDENTITY);
    assert_eq!(entries_with_prefix(&sandbox.workspace(), "explore-source-").len(), 1);
}
