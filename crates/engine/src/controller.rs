// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline controller
//!
//! The top-level state machine for one run. Stage execution is strictly
//! sequential: stage i+1 never starts before stage i's gate is evaluated,
//! and the runner call is the sole suspension point. Every error is
//! recovered here; the only outcomes are release or hold, carried in a
//! report with the full audit trail.

use crate::runner::StageRunner;
use gw_adapters::StageCollaborator;
use gw_core::{
    gate, route, Clock, DefectLedger, EscalateReason, Finding, HoldReason, IdGen, PipelineRun,
    RouteDecision, RunEvent, RunInput, RunReport, RunState, StageId, VerdictStatus,
};
use gw_plan::Plan;
use serde_json::Value;
use std::collections::BTreeMap;

/// Owns all run state and drives it to a final decision
pub struct PipelineController<C, K, I> {
    plan: Plan,
    runner: StageRunner<C>,
    clock: K,
    id_gen: I,
}

impl<C, K, I> PipelineController<C, K, I>
where
    C: StageCollaborator,
    K: Clock,
    I: IdGen,
{
    pub fn new(plan: Plan, collaborator: C, clock: K, id_gen: I) -> Self {
        Self {
            plan,
            runner: StageRunner::new(collaborator),
            clock,
            id_gen,
        }
    }

    /// Execute the pipeline over `initial_payload` until release or hold.
    ///
    /// Replaying the same collaborator verdicts against a fresh run with
    /// the same plan yields the same decision and metrics.
    pub async fn run(&self, initial_payload: Value) -> RunReport {
        let run_id = self.id_gen.next();
        let mut run = PipelineRun::new(run_id.clone(), self.plan.stage_count());
        let mut ledger = DefectLedger::new();
        let mut events: Vec<RunEvent> = Vec::new();

        // Handoff each stage was last entered with, replayed on regression
        let mut stage_inputs: BTreeMap<StageId, Value> = BTreeMap::new();
        // Findings attached to the next (re-entered) stage invocation
        let mut pending_findings: Vec<Finding> = Vec::new();
        let mut handoff = initial_payload.clone();

        run = apply(run, RunInput::Start, &mut events);
        tracing::info!(run_id = %run_id, stages = self.plan.stage_count(), "run started");

        while let RunState::Running(stage_id) = run.state.clone() {
            let Some(stage) = self.plan.stage(stage_id) else {
                // Unreachable for a validated plan
                run = apply(
                    run,
                    RunInput::Escalate {
                        reason: HoldReason::Escalated {
                            stage: stage_id,
                            detail: "stage missing from plan".to_string(),
                        },
                    },
                    &mut events,
                );
                break;
            };

            stage_inputs.insert(stage_id, handoff.clone());
            let prior = std::mem::take(&mut pending_findings);

            let verdict = match self.runner.invoke(stage, handoff.clone(), prior).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    // Runner errors are systemic faults; always escalate
                    run = apply(
                        run,
                        RunInput::Escalate {
                            reason: e.hold_reason(),
                        },
                        &mut events,
                    );
                    continue;
                }
            };

            let gate_result = gate::evaluate(stage, &verdict);
            let blocked = !gate_result.passed || verdict.status == VerdictStatus::Blocked;

            if !blocked {
                // The superseding pass resolves defects rooted at this stage
                // before this verdict's own findings are recorded
                let resolved = ledger.resolve_for_stage(stage_id);
                if !resolved.is_empty() {
                    tracing::info!(stage = %stage_id, resolved = resolved.len(), "defects resolved");
                }
                self.record_findings(&verdict.findings, &run, &mut ledger);

                handoff = verdict.handoff.clone();
                let open_blocking = if stage_id.0 == self.plan.stage_count() {
                    ledger.open_blocking().count() as u32
                } else {
                    0
                };
                run = apply(
                    run,
                    RunInput::GatePassed {
                        verdict,
                        open_blocking,
                    },
                    &mut events,
                );
                continue;
            }

            let decisions = self.record_findings(&verdict.findings, &run, &mut ledger);
            run = apply(
                run,
                RunInput::GateBlocked {
                    failed: gate_result.failed_names(),
                },
                &mut events,
            );

            let blocking: Vec<(&Finding, &RouteDecision)> = verdict
                .findings
                .iter()
                .zip(decisions.iter())
                .filter(|(f, _)| f.severity.is_blocking())
                .collect();

            if blocking.is_empty() {
                // Criteria failed without a routable finding: re-run the
                // stage in place, bounded by the rework limit
                let input = if run.rework.get(stage_id) >= self.plan.rework_limit {
                    RunInput::Escalate {
                        reason: HoldReason::ReworkLimitExceeded { stage: stage_id },
                    }
                } else {
                    RunInput::Retry
                };
                run = apply(run, input, &mut events);
                continue;
            }

            if let Some(reason) = blocking
                .iter()
                .find_map(|(_, d)| escalation_reason(d, stage_id))
            {
                run = apply(run, RunInput::Escalate { reason }, &mut events);
                continue;
            }

            // All routes are regress / resolve-in-place: re-enter the
            // earliest target with the blocking findings attached
            let target = blocking
                .iter()
                .map(|(_, d)| match d {
                    RouteDecision::Regress { target } => *target,
                    _ => stage_id,
                })
                .min()
                .unwrap_or(stage_id);
            pending_findings = blocking.iter().map(|(f, _)| (*f).clone()).collect();

            if target < stage_id {
                handoff = stage_inputs
                    .get(&target)
                    .cloned()
                    .unwrap_or_else(|| initial_payload.clone());
                run = apply(run, RunInput::Regress { target }, &mut events);
            } else {
                run = apply(run, RunInput::Retry, &mut events);
            }
        }

        let decision = match &run.state {
            RunState::Completed(decision) => decision.clone(),
            // Unreachable: the loop only exits on a completed state
            _ => gw_core::Decision::Hold {
                reason: HoldReason::Escalated {
                    stage: StageId(0),
                    detail: "run ended without a decision".to_string(),
                },
            },
        };
        tracing::info!(run_id = %run_id, decision = ?decision, "run finished");

        RunReport {
            run_id,
            decision,
            blocking_issues: ledger.open_blocking().map(|r| r.finding.clone()).collect(),
            metrics: ledger.effectiveness_report(self.plan.stage_count()),
            events,
            defects: ledger.records().to_vec(),
        }
    }

    /// Route and record every finding of a verdict; decisions are returned
    /// in finding order
    fn record_findings(
        &self,
        findings: &[Finding],
        run: &PipelineRun,
        ledger: &mut DefectLedger,
    ) -> Vec<RouteDecision> {
        findings
            .iter()
            .map(|finding| {
                let decision = route(
                    finding,
                    &self.plan.classify,
                    &run.rework,
                    self.plan.rework_limit,
                );
                let cycle = match &decision {
                    RouteDecision::Regress { target } => run.rework.get(*target) + 1,
                    _ => run.rework.get(finding.observed_at),
                };
                ledger.record(finding.clone(), decision.clone(), cycle, &self.clock);
                decision
            })
            .collect()
    }
}

/// Map a routing escalation into the run's hold reason
fn escalation_reason(decision: &RouteDecision, stage: StageId) -> Option<HoldReason> {
    let RouteDecision::Escalate { reason } = decision else {
        return None;
    };
    Some(match reason {
        EscalateReason::ReworkLimitExceeded { target, .. } => {
            HoldReason::ReworkLimitExceeded { stage: *target }
        }
        EscalateReason::Unclassifiable { category } => HoldReason::Escalated {
            stage,
            detail: format!("unclassifiable finding category '{category}'"),
        },
        EscalateReason::DownstreamRootCause { target } => HoldReason::Escalated {
            stage,
            detail: format!("root cause resolved to later stage {target}"),
        },
    })
}

fn apply(run: PipelineRun, input: RunInput, events: &mut Vec<RunEvent>) -> PipelineRun {
    let (next, new_events) = run.transition(input);
    events.extend(new_events);
    next
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
