// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate evaluation
//!
//! Pure pass/blocked decision between two stages. A gate passes iff every
//! criterion resolves to `true` in the verdict's handoff payload and the
//! verdict carries no critical finding. Missing fields fail closed.

use crate::finding::Severity;
use crate::stage::{GateCriterion, Stage};
use crate::verdict::StageVerdict;
use serde::{Deserialize, Serialize};

/// Result of evaluating a stage's gate against its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    pub passed: bool,
    /// Criteria that were unmet or unresolvable from the verdict
    pub failed: Vec<GateCriterion>,
}

impl GateResult {
    pub fn failed_names(&self) -> Vec<String> {
        self.failed.iter().map(|c| c.name.clone()).collect()
    }
}

/// Evaluate a stage's gate against the verdict it just produced.
///
/// Deterministic and side-effect free.
pub fn evaluate(stage: &Stage, verdict: &StageVerdict) -> GateResult {
    let failed: Vec<GateCriterion> = stage
        .gate
        .iter()
        .filter(|criterion| !criterion_met(criterion, verdict))
        .cloned()
        .collect();

    let has_critical = verdict
        .findings
        .iter()
        .any(|f| f.severity == Severity::Critical);

    GateResult {
        passed: failed.is_empty() && !has_critical,
        failed,
    }
}

fn criterion_met(criterion: &GateCriterion, verdict: &StageVerdict) -> bool {
    matches!(
        lookup(&verdict.handoff, &criterion.field),
        Some(serde_json::Value::Bool(true))
    )
}

/// Resolve a dotted path ("a.b.c") into a JSON value
fn lookup<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
