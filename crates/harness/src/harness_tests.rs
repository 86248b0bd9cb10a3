// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::fs;

fn config_in(root: &std::path::Path) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.templates.root = root.join("templates");
    config.workspace.root = Some(root.join("work"));
    config
}

fn write_directory_template(root: &std::path::Path, name: &str) {
    let dir = root.join("templates").join(name);
    fs::create_dir_all(dir.join("app")).unwrap();
    fs::write(dir.join("build.gradle"), "apply plugin: 'base'\n").unwrap();
    fs::write(dir.join("app/Main.java"), "class Main {}\n").unwrap();
}

#[test]
fn test_create_copies_directory_template() {
    let tmp = tempfile::tempdir().unwrap();
    write_directory_template(tmp.path(), "BasicTemplate");
    let harness = Harness::new(config_in(tmp.path()));

    let fixture = harness
        .create("BasicTemplate", ["android.compileSdkVersion 33"])
        .unwrap();
    let dir = fixture.project_dir().unwrap();
    assert!(dir.starts_with(tmp.path().join("work")));
    assert_eq!(
        fs::read_to_string(dir.join("app/Main.java")).unwrap(),
        "class Main {}\n"
    );
    assert_eq!(
        fs::read_to_string(dir.join("build.gradle")).unwrap(),
        "apply plugin: 'base'\nandroid.compileSdkVersion 33\n"
    );
}

#[test]
fn test_create_does_not_touch_template_source() {
    let tmp = tempfile::tempdir().unwrap();
    write_directory_template(tmp.path(), "BasicTemplate");
    let harness = Harness::new(config_in(tmp.path()));

    let mut fixture = harness.create("BasicTemplate", ["a 1"]).unwrap();
    fixture.append_configuration("b 2").unwrap();
    assert_eq!(
        fs::read_to_string(tmp.path().join("templates/BasicTemplate/build.gradle")).unwrap(),
        "apply plugin: 'base'\n"
    );
}

#[test]
fn test_unknown_template_creates_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = Harness::new(config_in(tmp.path()));
    let err = harness.create("Missing", Vec::<Override>::new()).unwrap_err();
    assert!(matches!(err, HarnessError::TemplateNotFound { ref name } if name == "Missing"));
    assert!(!tmp.path().join("work").exists());
}

#[test]
fn test_missing_config_file_is_created() {
    let harness = Harness::new(HarnessConfig::default())
        .with_template(InlineTemplate::new("bare").with_file("README", "bare\n"));
    let fixture = harness.fixture("bare").create().unwrap();
    assert_eq!(fs::read_to_string(fixture.config_file().unwrap()).unwrap(), "");
}

#[test]
fn test_builder_applies_lines_settings_and_files() {
    let harness = Harness::new(HarnessConfig::default())
        .with_template(InlineTemplate::new("bare").with_file("build.gradle", ""));
    let fixture = harness
        .fixture("bare")
        .with_line("repositories { mavenCentral() }")
        .with_setting("version", "'2.0'")
        .with_file("src/App.kt", "fun main() {}")
        .create()
        .unwrap();
    let dir = fixture.project_dir().unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("build.gradle")).unwrap(),
        "repositories { mavenCentral() }\nversion '2.0'\n"
    );
    assert!(dir.join("src/App.kt").is_file());
}

#[test]
fn test_templates_lists_inline_and_directory_names() {
    let tmp = tempfile::tempdir().unwrap();
    write_directory_template(tmp.path(), "BasicTemplate");
    let harness =
        Harness::new(config_in(tmp.path())).with_template(InlineTemplate::new("inline"));
    assert_eq!(harness.templates().unwrap(), ["BasicTemplate", "inline"]);
}

#[test]
fn test_fixtures_from_same_template_are_isolated() {
    let harness = Harness::new(HarnessConfig::default())
        .with_template(InlineTemplate::new("t").with_file("build.gradle", "base\n"));
    let mut a = harness.fixture("t").create().unwrap();
    let b = harness.fixture("t").create().unwrap();
    assert_ne!(a.project_dir().unwrap(), b.project_dir().unwrap());

    a.append_configuration("only in a").unwrap();
    assert_eq!(
        fs::read_to_string(b.config_file().unwrap()).unwrap(),
        "base\n"
    );
}

#[test]
fn test_harness_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Harness>();
}
