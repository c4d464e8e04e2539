use super::*;
use crate::finding::{Finding, Severity};
use yare::parameterized;

fn table() -> ClassificationTable {
    let mut table = ClassificationTable::new();
    table.insert("requirement_ambiguity", 1);
    table.insert("architecture_flaw", 2);
    table.insert("implementation_error", 4);
    table.insert("test_gap", 5);
    table
}

fn finding_at(observed: u32, category: &str) -> Finding {
    Finding::new(Severity::Major, category, "defect", observed)
}

#[test]
fn explicit_root_cause_is_authoritative() {
    // category would classify to stage 4; the explicit hint wins
    let finding = finding_at(6, "implementation_error").with_root_cause(2);
    let decision = route(&finding, &table(), &ReworkCounters::new(), 3);
    assert_eq!(
        decision,
        RouteDecision::Regress {
            target: StageId(2)
        }
    );
}

#[parameterized(
    requirement = { "requirement_ambiguity", 1 },
    architecture = { "architecture_flaw", 2 },
    implementation = { "implementation_error", 4 },
)]
fn table_classifies_by_category(category: &str, expected: u32) {
    let finding = finding_at(6, category);
    let decision = route(&finding, &table(), &ReworkCounters::new(), 3);
    assert_eq!(
        decision,
        RouteDecision::Regress {
            target: StageId(expected)
        }
    );
}

#[test]
fn same_stage_root_cause_resolves_in_place() {
    let finding = finding_at(4, "implementation_error");
    let decision = route(&finding, &table(), &ReworkCounters::new(), 3);
    assert_eq!(decision, RouteDecision::ResolveInPlace);
}

#[test]
fn explicit_self_root_cause_never_regresses() {
    let finding = finding_at(7, "anything").with_root_cause(7);
    let decision = route(&finding, &table(), &ReworkCounters::new(), 3);
    assert_eq!(decision, RouteDecision::ResolveInPlace);
}

#[test]
fn in_place_resolution_is_bounded_by_the_limit() {
    let mut cycles = ReworkCounters::new();
    cycles.bump(StageId(4));
    cycles.bump(StageId(4));

    let finding = finding_at(4, "implementation_error");
    let decision = route(&finding, &table(), &cycles, 2);
    assert_eq!(
        decision,
        RouteDecision::Escalate {
            reason: EscalateReason::ReworkLimitExceeded {
                target: StageId(4),
                limit: 2
            }
        }
    );
}

#[test]
fn unknown_category_escalates() {
    let finding = finding_at(6, "cosmic_rays");
    let decision = route(&finding, &table(), &ReworkCounters::new(), 3);
    assert_eq!(
        decision,
        RouteDecision::Escalate {
            reason: EscalateReason::Unclassifiable {
                category: "cosmic_rays".to_string()
            }
        }
    );
}

#[test]
fn downstream_root_cause_escalates() {
    let finding = finding_at(2, "test_gap"); // classifies to stage 5, after stage 2
    let decision = route(&finding, &table(), &ReworkCounters::new(), 3);
    assert_eq!(
        decision,
        RouteDecision::Escalate {
            reason: EscalateReason::DownstreamRootCause {
                target: StageId(5)
            }
        }
    );
}

#[test]
fn exhausted_rework_budget_converts_regress_to_escalate() {
    let finding = finding_at(6, "architecture_flaw");
    let mut cycles = ReworkCounters::new();
    cycles.bump(StageId(2));
    cycles.bump(StageId(2));
    cycles.bump(StageId(2));

    let decision = route(&finding, &table(), &cycles, 3);
    assert_eq!(
        decision,
        RouteDecision::Escalate {
            reason: EscalateReason::ReworkLimitExceeded {
                target: StageId(2),
                limit: 3
            }
        }
    );
}

#[test]
fn budget_below_limit_still_regresses() {
    let finding = finding_at(6, "architecture_flaw");
    let mut cycles = ReworkCounters::new();
    cycles.bump(StageId(2));
    cycles.bump(StageId(2));

    let decision = route(&finding, &table(), &cycles, 3);
    assert_eq!(
        decision,
        RouteDecision::Regress {
            target: StageId(2)
        }
    );
}
