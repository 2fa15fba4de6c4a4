//! File sink for structured logs. Runs in its own process so the run
//! context picks up `LOG_DIR` on first use.

use std::fs;

use finscenario::logging::{log, obj, run_dir, run_id, v_str, Domain, Level};
use tempfile::TempDir;

#[test]
fn records_land_in_run_directory() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("LOG_DIR", dir.path());
    std::env::set_var("RUN_ID", "sink-test");
    std::env::set_var("LOG_LEVEL", "trace");
    std::env::remove_var("LOG_DOMAINS");

    assert_eq!(run_id(), "sink-test");
    log(Level::Info, Domain::View, "dashboard_shown", obj(&[("scenario", v_str("budgeting"))]));
    log(Level::Debug, Domain::Submit, "submission_built", obj(&[]));

    let run = run_dir().unwrap();
    assert_eq!(run, dir.path().join("sink-test"));
    assert!(run.join("manifest.json").exists());

    let events = fs::read_to_string(run.join("events.jsonl")).unwrap();
    let first: serde_json::Value = serde_json::from_str(events.lines().next().unwrap()).unwrap();
    assert_eq!(first["event"], "dashboard_shown");
    assert_eq!(first["scenario"], "budgeting");
    assert_eq!(first["run_id"], "sink-test");

    let trace = fs::read_to_string(run.join("trace.jsonl")).unwrap();
    assert!(trace.contains("submission_built"));
    assert!(!events.contains("submission_built"));
}
