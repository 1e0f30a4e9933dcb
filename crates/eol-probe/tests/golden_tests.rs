//! Golden repositories built against the real git.

mod common;

use common::*;
use eol_probe::golden::{build_golden, fixture_name, GoldenCache, SLOTS, VARIANTS};
use eol_probe::{Oracle, Repo};
use eol_table::{line_breaks, Break};
use pretty_assertions::assert_eq;

#[test]
fn fixtures_are_committed_byte_exact() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("golden");

    build_golden(&sandbox.oracle, &path, "*.txt text eol=crlf").unwrap();

    let repo = Repo::new(&sandbox.oracle, &path);
    for slot in SLOTS {
        for (variant, content) in VARIANTS {
            let blob = repo.cat_file_blob(&fixture_name(slot, variant)).unwrap();
            assert_eq!(blob, content.as_bytes(), "{slot}-{variant}");
        }
    }
    assert_eq!(
        line_breaks(repo.cat_file_blob("1-mixed.txt").unwrap()),
        vec![Break::Lf, Break::CrLf]
    );
}

#[test]
fn head_carries_the_target_attributes() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("golden");

    build_golden(&sandbox.oracle, &path, "*.txt -text").unwrap();

    let repo = Repo::new(&sandbox.oracle, &path);
    assert_eq!(repo.cat_file_blob(".gitattributes").unwrap(), b"*.txt -text\n");

    let log = sandbox
        .oracle
        .git(&path, &["log", "--format=%s"])
        .unwrap();
    assert_eq!(
        String::from_utf8(log).unwrap(),
        "test - update1\nprepareGitRepo - update3\nprepareGitRepo - update2\nprepareGitRepo - update1\n"
    );
}

#[test]
fn empty_attributes_still_commit() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("golden");

    build_golden(&sandbox.oracle, &path, "").unwrap();

    let repo = Repo::new(&sandbox.oracle, &path);
    assert_eq!(repo.cat_file_blob(".gitattributes").unwrap(), b"\n");
    assert_eq!(repo.git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap(), b"main\n");
}

#[test]
fn cache_survives_a_new_session() {
    let sandbox = Sandbox::new();
    let root = sandbox.workspace();

    let mut first = GoldenCache::new(&root);
    let built = first.ensure(&sandbox.oracle, "*.txt text").unwrap();
    let head = sandbox.oracle.git(&built, &["rev-parse", "HEAD"]).unwrap();

    let mut second = GoldenCache::new(&root);
    let reused = second.ensure(&sandbox.oracle, "*.txt text").unwrap();

    assert_eq!(built, reused);
    assert_eq!(sandbox.oracle.git(&reused, &["rev-parse", "HEAD"]).unwrap(), head);
    assert_eq!(entries_with_prefix(&root, "source-").len(), 1);
}
