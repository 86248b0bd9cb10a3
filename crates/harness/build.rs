// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Build scripts are expected to panic on failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let path = std::path::Path::new(&out_dir).join("env_names.rs");
    let mut f = std::fs::File::create(path).unwrap();

    let vars = [
        ("FIXTUREKIT_CONFIG", "FIXTUREKIT_CONFIG"),
        ("FIXTUREKIT_TEMPLATES_DIR", "FIXTUREKIT_TEMPLATES_DIR"),
        ("FIXTUREKIT_BUILD_TOOL", "FIXTUREKIT_BUILD_TOOL"),
        ("FIXTUREKIT_TIMEOUT_MS", "FIXTUREKIT_TIMEOUT_MS"),
        ("FIXTUREKIT_KEEP_WORKSPACE", "FIXTUREKIT_KEEP_WORKSPACE"),
        ("FIXTUREKIT_WORKSPACE_ROOT", "FIXTUREKIT_WORKSPACE_ROOT"),
        ("FIXTUREKIT_CAPTURE", "FIXTUREKIT_CAPTURE"),
        ("FIXTUREKIT_LOG", "FIXTUREKIT_LOG"),
        ("FIXTUREKIT_PROJECT_DIR", "FIXTUREKIT_PROJECT_DIR"),
        ("CARGO_BIN_EXE_FIXTUREKIT", "CARGO_BIN_EXE_fixturekit"),
    ];

    for (const_name, env_name) in vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";").unwrap();
    }
}
