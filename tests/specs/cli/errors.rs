//! CLI error specs
//!
//! Usage and plan errors exit 2, distinct from the hold exit code 1.

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn missing_plan_file_exits_2() {
    let temp = Project::empty();
    temp.gw()
        .args(["run", "--plan", "no-such-plan.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn empty_plan_is_rejected() {
    let temp = Project::empty();
    temp.file("plan.toml", "rework_limit = 3\n");
    temp.gw()
        .args(["check", "--plan", "plan.toml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid plan"));
}

#[test]
fn unknown_plan_fields_are_rejected() {
    let temp = Project::empty();
    temp.file(
        "plan.toml",
        r#"
retry_limit = 3

[[stage]]
name = "only"
"#,
    );
    temp.gw()
        .args(["check", "--plan", "plan.toml"])
        .assert()
        .failure()
        .code(2);
}
