// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Defect routing
//!
//! Classifies a finding by root-cause stage and decides whether the
//! pipeline regresses, resolves in place, or escalates to an operator.
//! Routing never guesses: an unclassifiable finding escalates.

use crate::finding::Finding;
use crate::run::ReworkCounters;
use crate::stage::StageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Data-driven mapping from finding category to root-cause stage.
///
/// Supplied by the plan; the controlled vocabulary is configuration,
/// not code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTable(BTreeMap<String, StageId>);

impl ClassificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, stage: impl Into<StageId>) {
        self.0.insert(category.into(), stage.into());
    }

    pub fn resolve(&self, category: &crate::finding::Category) -> Option<StageId> {
        self.0.get(&category.0).copied()
    }

    pub fn targets(&self) -> impl Iterator<Item = (&str, StageId)> {
        self.0.iter().map(|(c, s)| (c.as_str(), *s))
    }
}

impl FromIterator<(String, StageId)> for ClassificationTable {
    fn from_iter<T: IntoIterator<Item = (String, StageId)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Why a finding could not be auto-routed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscalateReason {
    /// No explicit root cause and no classification-table entry
    Unclassifiable { category: String },
    /// Root cause resolved to a stage after the observing one
    DownstreamRootCause { target: StageId },
    /// The regression target has exhausted its rework-cycle budget
    ReworkLimitExceeded { target: StageId, limit: u32 },
}

/// Routing decision for one finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Re-enter an earlier stage to fix the defect at its origin
    Regress { target: StageId },
    /// The root cause is the observing stage itself; fix without regressing
    ResolveInPlace,
    /// Halt the run; operator intervention required
    Escalate { reason: EscalateReason },
}

/// Route one finding.
///
/// An explicit `root_cause` on the finding is authoritative; otherwise the
/// classification table resolves the category. A route whose target has
/// already consumed `limit` rework cycles becomes an escalation - this
/// applies to in-place resolution as well as regression, which bounds the
/// total number of re-entries of any stage in any run.
pub fn route(
    finding: &Finding,
    table: &ClassificationTable,
    cycles: &ReworkCounters,
    limit: u32,
) -> RouteDecision {
    let target = match finding.root_cause.or_else(|| table.resolve(&finding.category)) {
        Some(stage) => stage,
        None => {
            return RouteDecision::Escalate {
                reason: EscalateReason::Unclassifiable {
                    category: finding.category.0.clone(),
                },
            }
        }
    };

    if target > finding.observed_at {
        return RouteDecision::Escalate {
            reason: EscalateReason::DownstreamRootCause { target },
        };
    }
    if cycles.get(target) >= limit {
        return RouteDecision::Escalate {
            reason: EscalateReason::ReworkLimitExceeded { target, limit },
        };
    }
    if target == finding.observed_at {
        return RouteDecision::ResolveInPlace;
    }

    RouteDecision::Regress { target }
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
