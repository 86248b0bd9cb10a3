// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[test]
fn test_release_removes_directory() {
    let root = tempfile::tempdir().unwrap();
    let mut ws = Workspace::create("BasicTemplate", Some(root.path()), false).unwrap();
    let path = ws.path().to_path_buf();
    std::fs::write(path.join("file.txt"), "x").unwrap();
    assert!(path.is_dir());

    assert_eq!(ws.release().unwrap(), None);
    assert!(!path.exists());
    assert!(ws.is_released());
}

#[test]
fn test_release_is_idempotent() {
    let mut ws = Workspace::create("t", None, false).unwrap();
    ws.release().unwrap();
    assert_eq!(ws.release().unwrap(), None);
}

#[test]
fn test_drop_removes_directory() {
    let path = {
        let ws = Workspace::create("t", None, false).unwrap();
        ws.path().to_path_buf()
    };
    assert!(!path.exists());
}

#[test]
fn test_keep_leaves_directory() {
    let root = tempfile::tempdir().unwrap();
    let mut ws = Workspace::create("kept", Some(root.path()), true).unwrap();
    let path = ws.path().to_path_buf();
    let kept = ws.release().unwrap();
    assert_eq!(kept, Some(path.clone()));
    assert!(path.is_dir());
}

#[test]
fn test_workspaces_are_unique() {
    let a = Workspace::create("same", None, false).unwrap();
    let b = Workspace::create("same", None, false).unwrap();
    assert_ne!(a.path(), b.path());
}

#[test]
fn test_missing_root_is_created() {
    let root = tempfile::tempdir().unwrap();
    let nested = root.path().join("a/b");
    let ws = Workspace::create("t", Some(&nested), false).unwrap();
    assert!(ws.path().starts_with(&nested));
}

#[rstest]
#[case("BasicTemplate", "BasicTemplate")]
#[case("renderscript/ndk", "renderscript-ndk")]
#[case("", "fixture")]
fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize(input), expected);
}
