// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case(RunOutcome::Success, r#"{"type":"success"}"#)]
#[case(RunOutcome::Timeout { after_ms: 250 }, r#"{"type":"timeout","after_ms":250}"#)]
#[case(
    RunOutcome::BuildFailure { exit_code: Some(1), diagnostic: "boom".to_string() },
    r#"{"type":"build_failure","exit_code":1,"diagnostic":"boom"}"#
)]
fn test_outcome_wire_format(#[case] outcome: RunOutcome, #[case] expected: &str) {
    assert_eq!(serde_json::to_string(&outcome).unwrap(), expected);
}

#[test]
fn test_recorded_run_durations_are_millis() {
    let run = RecordedRun {
        seq: 3,
        timestamp: SystemTime::UNIX_EPOCH,
        elapsed: Duration::from_millis(1500),
        request: RunRequest {
            fixture: "BasicTemplate".to_string(),
            goals: vec!["clean".to_string(), "assembleDebug".to_string()],
            properties: vec!["android.uniquePackageNames=true".to_string()],
            arguments: vec![],
        },
        outcome: RunOutcome::Success,
        duration: Duration::from_millis(42),
    };
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["elapsed"], 1500);
    assert_eq!(json["duration"], 42);
    assert_eq!(json["request"]["goals"][1], "assembleDebug");

    let parsed: RecordedRun = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.duration, Duration::from_millis(42));
    assert_eq!(parsed.request, run.request);
}

#[test]
fn test_is_success() {
    assert!(RunOutcome::Success.is_success());
    assert!(!RunOutcome::Timeout { after_ms: 1 }.is_success());
}
