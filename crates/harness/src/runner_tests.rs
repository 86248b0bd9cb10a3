// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

fn shell(script: &str, cwd: &Path, timeout_ms: u64) -> Invocation {
    Invocation {
        program: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        env: vec![],
        cwd: cwd.to_path_buf(),
        timeout: Duration::from_millis(timeout_ms),
    }
}

fn runner() -> BuildRunner {
    BuildRunner::new().with_output_grace(Duration::from_millis(500))
}

#[tokio::test]
async fn test_zero_exit_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let out = runner()
        .run(&shell("echo built; echo warn >&2", dir.path(), 10_000))
        .await
        .unwrap();
    assert_eq!(out.status, BuildStatus::Success);
    assert_eq!(out.stdout, "built\n");
    assert_eq!(out.stderr, "warn\n");
}

#[tokio::test]
async fn test_nonzero_exit_is_build_failure_with_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let out = runner()
        .run(&shell("echo progress; echo 'FAILURE: boom' >&2; exit 3", dir.path(), 10_000))
        .await
        .unwrap();
    assert_eq!(
        out.status,
        BuildStatus::BuildFailure {
            exit_code: Some(3),
            diagnostic: "FAILURE: boom".to_string()
        }
    );
}

#[tokio::test]
async fn test_failure_without_stderr_uses_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out = runner()
        .run(&shell("echo only stdout; exit 1", dir.path(), 10_000))
        .await
        .unwrap();
    assert!(matches!(
        out.status,
        BuildStatus::BuildFailure { ref diagnostic, .. } if diagnostic == "only stdout"
    ));
}

#[tokio::test]
async fn test_timeout_kills_process_and_keeps_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let started = Instant::now();
    let out = runner()
        .run(&shell("echo starting; sleep 30; echo never", dir.path(), 300))
        .await
        .unwrap();
    assert_eq!(
        out.status,
        BuildStatus::Timeout {
            after: Duration::from_millis(300)
        }
    );
    assert!(out.stdout.contains("starting"));
    assert!(!out.stdout.contains("never"));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_runs_in_cwd_with_env() {
    let dir = tempfile::tempdir().unwrap();
    let mut invocation = shell("pwd; echo \"$GREETING\"", dir.path(), 10_000);
    invocation.env.push(("GREETING".to_string(), "hello".to_string()));
    let out = runner().run(&invocation).await.unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let mut lines = out.stdout.lines();
    assert_eq!(
        Path::new(lines.next().unwrap()).canonicalize().unwrap(),
        canonical
    );
    assert_eq!(lines.next(), Some("hello"));
}

#[tokio::test]
async fn test_missing_program_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let invocation = Invocation {
        program: "./does-not-exist".to_string(),
        args: vec![],
        env: vec![],
        cwd: dir.path().to_path_buf(),
        timeout: Duration::from_secs(5),
    };
    let err = runner().run(&invocation).await.unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Spawn { ref program, .. } if program == "./does-not-exist"
    ));
}

#[rstest]
#[case("./gradlew", "/work/./gradlew")]
#[case("bin/tool", "/work/bin/tool")]
#[case("make", "make")]
#[case("/usr/bin/make", "/usr/bin/make")]
fn test_resolve_program(#[case] program: &str, #[case] expected: &str) {
    assert_eq!(
        resolve_program(program, Path::new("/work")),
        PathBuf::from(expected)
    );
}

#[rstest]
#[case("out", "err", "err")]
#[case("out\n", "  \n", "out")]
#[case("", "", "")]
fn test_diagnostic_text(#[case] stdout: &str, #[case] stderr: &str, #[case] expected: &str) {
    assert_eq!(diagnostic_text(stdout, stderr), expected);
}
