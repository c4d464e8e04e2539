// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline run state machine
//!
//! A `PipelineRun` owns the mutable state of one verification run: the
//! current stage index, completed verdicts, per-stage rework counters, and
//! the overall status. Transitions are pure: they return the new run plus
//! the audit events describing what happened. The stage index only moves
//! backward through an explicit `Regress` input, which targets a strictly
//! smaller index and bumps that stage's rework counter.

use crate::stage::StageId;
use crate::verdict::StageVerdict;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a run was held rather than released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum HoldReason {
    /// A routed finding required operator intervention
    Escalated { stage: StageId, detail: String },
    /// A regression target exhausted its rework-cycle budget
    ReworkLimitExceeded { stage: StageId },
    /// A stage collaborator exceeded its wall-clock budget
    CollaboratorTimeout { stage: StageId },
    /// A stage collaborator produced output violating the verdict schema
    SchemaViolation { stage: StageId },
    /// A stage collaborator failed outright (spawn failure, non-zero exit)
    CollaboratorFailed { stage: StageId },
    /// The terminal gate passed but critical/major defects remain open
    UnresolvedDefects { open: u32 },
}

impl std::fmt::Display for HoldReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldReason::Escalated { stage, detail } => {
                write!(f, "escalated at stage {stage}: {detail}")
            }
            HoldReason::ReworkLimitExceeded { stage } => {
                write!(f, "rework limit exceeded for stage {stage}")
            }
            HoldReason::CollaboratorTimeout { stage } => {
                write!(f, "collaborator timeout at stage {stage}")
            }
            HoldReason::SchemaViolation { stage } => {
                write!(f, "schema violation at stage {stage}")
            }
            HoldReason::CollaboratorFailed { stage } => {
                write!(f, "collaborator failed at stage {stage}")
            }
            HoldReason::UnresolvedDefects { open } => {
                write!(f, "{open} unresolved blocking defect(s)")
            }
        }
    }
}

/// Final decision for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Release,
    Hold { reason: HoldReason },
}

/// Overall status of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running(StageId),
    Blocked(StageId),
    Completed(Decision),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed(_))
    }
}

/// Per-stage rework-cycle counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReworkCounters(BTreeMap<StageId, u32>);

impl ReworkCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stage: StageId) -> u32 {
        self.0.get(&stage).copied().unwrap_or(0)
    }

    pub fn bump(&mut self, stage: StageId) -> u32 {
        let count = self.0.entry(stage).or_insert(0);
        *count += 1;
        *count
    }
}

/// Inputs that drive run transitions
#[derive(Debug, Clone)]
pub enum RunInput {
    /// Start the run at stage 1
    Start,
    /// The current stage's verdict passed its gate. `open_blocking` is the
    /// count of still-open critical/major ledger defects, consulted only
    /// at the terminal stage.
    GatePassed {
        verdict: StageVerdict,
        open_blocking: u32,
    },
    /// The current stage's gate blocked
    GateBlocked { failed: Vec<String> },
    /// Regress to an earlier stage to fix a routed defect
    Regress { target: StageId },
    /// Re-run the current stage without regressing
    Retry,
    /// Halt the run; surfaces as a hold with the given reason
    Escalate { reason: HoldReason },
}

/// Audit-trail event emitted by a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    StageEntered { stage: StageId },
    GatePassed { stage: StageId },
    GateBlocked { stage: StageId, failed: Vec<String> },
    Regressed { from: StageId, to: StageId, cycle: u32 },
    Retried { stage: StageId, cycle: u32 },
    Escalated { stage: StageId, reason: HoldReason },
    Completed { decision: Decision },
}

/// Mutable state of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: String,
    /// Number of stages in the plan (fixed at construction)
    pub stage_count: u32,
    pub state: RunState,
    /// Verdicts in the order the gates accepted them
    pub verdicts: Vec<(StageId, StageVerdict)>,
    pub rework: ReworkCounters,
}

impl PipelineRun {
    pub fn new(id: impl Into<String>, stage_count: u32) -> Self {
        Self {
            id: id.into(),
            stage_count,
            state: RunState::Idle,
            verdicts: Vec::new(),
            rework: ReworkCounters::new(),
        }
    }

    pub fn current_stage(&self) -> Option<StageId> {
        match self.state {
            RunState::Running(stage) | RunState::Blocked(stage) => Some(stage),
            _ => None,
        }
    }

    fn is_last(&self, stage: StageId) -> bool {
        stage.0 == self.stage_count
    }

    /// Pure transition function - returns the new run and audit events
    pub fn transition(&self, input: RunInput) -> (PipelineRun, Vec<RunEvent>) {
        match (&self.state, input) {
            (RunState::Idle, RunInput::Start) if self.stage_count > 0 => {
                let mut run = self.clone();
                let first = StageId(1);
                run.state = RunState::Running(first);
                (run, vec![RunEvent::StageEntered { stage: first }])
            }

            (RunState::Running(stage), RunInput::GatePassed { verdict, open_blocking }) => {
                let stage = *stage;
                let mut run = self.clone();
                run.verdicts.push((stage, verdict));
                let mut events = vec![RunEvent::GatePassed { stage }];

                if self.is_last(stage) {
                    let decision = if open_blocking == 0 {
                        Decision::Release
                    } else {
                        Decision::Hold {
                            reason: HoldReason::UnresolvedDefects { open: open_blocking },
                        }
                    };
                    run.state = RunState::Completed(decision.clone());
                    events.push(RunEvent::Completed { decision });
                } else {
                    let next = StageId(stage.0 + 1);
                    run.state = RunState::Running(next);
                    events.push(RunEvent::StageEntered { stage: next });
                }
                (run, events)
            }

            (RunState::Running(stage), RunInput::GateBlocked { failed }) => {
                let stage = *stage;
                let mut run = self.clone();
                run.state = RunState::Blocked(stage);
                (run, vec![RunEvent::GateBlocked { stage, failed }])
            }

            // Regression only targets a strictly earlier stage
            (RunState::Blocked(stage), RunInput::Regress { target }) if target < *stage => {
                let from = *stage;
                let mut run = self.clone();
                let cycle = run.rework.bump(target);
                run.state = RunState::Running(target);
                (
                    run,
                    vec![
                        RunEvent::Regressed { from, to: target, cycle },
                        RunEvent::StageEntered { stage: target },
                    ],
                )
            }

            (RunState::Blocked(stage), RunInput::Retry) => {
                let stage = *stage;
                let mut run = self.clone();
                let cycle = run.rework.bump(stage);
                run.state = RunState::Running(stage);
                (
                    run,
                    vec![
                        RunEvent::Retried { stage, cycle },
                        RunEvent::StageEntered { stage },
                    ],
                )
            }

            // Escalation halts the run from Running (runner errors) or
            // Blocked (routing decisions)
            (RunState::Running(stage) | RunState::Blocked(stage), RunInput::Escalate { reason }) => {
                let stage = *stage;
                let mut run = self.clone();
                let decision = Decision::Hold {
                    reason: reason.clone(),
                };
                run.state = RunState::Completed(decision.clone());
                (
                    run,
                    vec![
                        RunEvent::Escalated { stage, reason },
                        RunEvent::Completed { decision },
                    ],
                )
            }

            // Invalid transitions - no change
            _ => (self.clone(), vec![]),
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
