// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers: a template directory with a fake build wrapper.

#![allow(dead_code)]

use fixturekit::{Harness, HarnessConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fake build wrapper: prints its goals, fails on a `fail` line in the configuration.
pub const FAKE_GRADLEW: &str = r#"echo "> Configure project :app"
for goal in "$@"; do
  echo "> Task :app:$goal"
done
if grep -q '^fail' build.gradle; then
  echo "FAILURE: Build failed with an exception." >&2
  exit 1
fi
echo "BUILD SUCCESSFUL"
"#;

pub const BASIC_BUILD_GRADLE: &str = "\
plugins {
    id 'com.android.application'
}

android {
    compileSdkVersion 33
}
";

/// A temp root holding `templates/BasicTemplate`, a workspace root, and a config file.
pub struct Sandbox {
    pub root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let template = root.path().join("templates/BasicTemplate");
        fs::create_dir_all(template.join("app/src/main")).unwrap();
        fs::write(template.join("build.gradle"), BASIC_BUILD_GRADLE).unwrap();
        fs::write(template.join("settings.gradle"), "include ':app'\n").unwrap();
        fs::write(
            template.join("app/src/main/AndroidManifest.xml"),
            "<manifest package=\"com.example.basic\"/>\n",
        )
        .unwrap();
        fs::write(template.join("gradlew"), FAKE_GRADLEW).unwrap();

        let sandbox = Self { root };
        fs::write(sandbox.config_path(), sandbox.config_toml()).unwrap();
        sandbox
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path().join("templates")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.path().join("work")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("fixturekit.toml")
    }

    /// Configuration text; the wrapper runs through `/bin/sh`.
    pub fn config_toml(&self) -> String {
        format!(
            "[tool]\n\
             program = \"/bin/sh\"\n\
             args = [\"gradlew\"]\n\
             timeout_ms = 30000\n\
             \n\
             [templates]\n\
             root = \"templates\"\n\
             \n\
             [workspace]\n\
             root = \"{}\"\n",
            self.work_dir().display()
        )
    }

    pub fn config(&self) -> HarnessConfig {
        HarnessConfig::load(&self.config_path()).unwrap()
    }

    pub fn harness(&self) -> Harness {
        Harness::new(self.config())
    }

    /// Entries left in the workspace root.
    pub fn leftover_workspaces(&self) -> usize {
        match fs::read_dir(self.work_dir()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}
