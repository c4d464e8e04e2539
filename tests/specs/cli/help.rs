//! CLI surface specs

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.gw()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn no_subcommand_is_a_usage_error() {
    let temp = Project::empty();
    temp.gw().assert().failure().code(2);
}
