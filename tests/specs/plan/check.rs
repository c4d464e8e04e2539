//! Plan validation specs

use crate::prelude::*;
use predicates::prelude::*;

const THREE_STAGE_PLAN: &str = r#"
rework_limit = 2

[classify]
architecture_flaw = 1

[[stage]]
name = "design"
timeout = "30s"

[[stage.gate]]
name = "approved"
field = "design.approved"

[[stage]]
name = "implementation"
timeout = "1m"

[[stage.gate]]
name = "built"
field = "build.ok"

[[stage]]
name = "release-audit"
"#;

#[test]
fn valid_plan_checks_clean() {
    let temp = Project::empty();
    temp.file("plan.toml", THREE_STAGE_PLAN);
    temp.gw()
        .args(["check", "--plan", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan OK: 3 stages"))
        .stdout(predicate::str::contains("design"))
        .stdout(predicate::str::contains("architecture_flaw -> 1"));
}

#[test]
fn empty_gate_on_non_terminal_stage_is_rejected() {
    let temp = Project::empty();
    temp.file(
        "plan.toml",
        r#"
[[stage]]
name = "first"

[[stage]]
name = "last"
"#,
    );
    temp.gw()
        .args(["check", "--plan", "plan.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid plan"));
}
