//! Pipeline execution specs
//!
//! End-to-end runs with shell collaborators that answer verdict JSON on
//! stdout. Exit code 0 means release, 1 means hold.

use crate::prelude::*;
use predicates::prelude::*;

const BLOCKED_VERDICT: &str = r#"{"status":"blocked","findings":[{"severity":"critical","category":"architecture_flaw","description":"hidden coupling","root_cause":1}],"handoff":{"ok":false}}"#;

/// Three stages whose collaborators replay fixture files
const CLEAN_PLAN: &str = r#"
rework_limit = 3

[[stage]]
name = "design"
command = "cat pass.json"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "implementation"
command = "cat pass.json"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "release-audit"
command = "cat pass.json"
"#;

#[test]
fn clean_run_releases_with_exit_0() {
    let temp = Project::empty();
    temp.file("plan.toml", CLEAN_PLAN);
    temp.file("pass.json", PASS_VERDICT);

    temp.gw()
        .args(["run", "--plan", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decision: release"))
        .stdout(predicate::str::contains("Defects: 0 recorded"));
}

#[test]
fn json_output_carries_the_decision() {
    let temp = Project::empty();
    temp.file("plan.toml", CLEAN_PLAN);
    temp.file("pass.json", PASS_VERDICT);

    let output = temp
        .gw()
        .args(["run", "--plan", "plan.toml", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["decision"], "release");
    assert_eq!(report["metrics"]["stages"]["1"]["found"], 0);
}

#[test]
fn regression_recovers_and_releases() {
    let temp = Project::empty();
    // stage 2 blocks once with a critical rooted at stage 1, then passes
    temp.file(
        "plan.toml",
        r#"
rework_limit = 3

[[stage]]
name = "design"
command = "cat pass.json"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "implementation"
command = "if [ -f reworked ]; then cat pass.json; else touch reworked; cat blocked.json; fi"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "release-audit"
command = "cat pass.json"
"#,
    );
    temp.file("pass.json", PASS_VERDICT);
    temp.file("blocked.json", BLOCKED_VERDICT);

    temp.gw()
        .args(["run", "--plan", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decision: release"))
        .stdout(predicate::str::contains("1 resolved"));
}

#[test]
fn persistent_defect_holds_with_exit_1() {
    let temp = Project::empty();
    temp.file(
        "plan.toml",
        r#"
rework_limit = 1

[[stage]]
name = "design"
command = "cat pass.json"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "implementation"
command = "cat blocked.json"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "release-audit"
command = "cat pass.json"
"#,
    );
    temp.file("pass.json", PASS_VERDICT);
    temp.file("blocked.json", BLOCKED_VERDICT);

    temp.gw()
        .args(["run", "--plan", "plan.toml"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Decision: hold"))
        .stdout(predicate::str::contains("rework limit exceeded"));
}

#[test]
fn crashing_collaborator_holds() {
    let temp = Project::empty();
    temp.file(
        "plan.toml",
        r#"
[[stage]]
name = "design"
command = "exit 3"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "release-audit"
command = "cat pass.json"
"#,
    );
    temp.file("pass.json", PASS_VERDICT);

    temp.gw()
        .args(["run", "--plan", "plan.toml"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("collaborator failed at stage 1"));
}

#[test]
fn initial_input_reaches_the_first_gate() {
    let temp = Project::empty();
    // the first stage echoes its handoff straight through by ignoring
    // stdin and emitting a verdict whose handoff satisfies the gate
    temp.file(
        "plan.toml",
        r#"
[[stage]]
name = "design"
command = "cat pass.json"

[[stage.gate]]
name = "ok"
field = "ok"

[[stage]]
name = "release-audit"
command = "cat pass.json"
"#,
    );
    temp.file("pass.json", PASS_VERDICT);
    temp.file("input.json", r#"{"component":"widget"}"#);

    temp.gw()
        .args(["run", "--plan", "plan.toml", "--input", "input.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decision: release"));
}
