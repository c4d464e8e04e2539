// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage runner
//!
//! Invokes one external stage collaborator with a handoff package and
//! returns its structured verdict. The runner is the sole suspension point
//! of a run: the collaborator call is bounded by the stage's timeout
//! budget, and expiry stops the wait rather than leaving it pending. A
//! timeout or malformed verdict is an error, never inferred as a pass.
//! No retries at this layer.

use crate::wire;
use gw_adapters::{CollaboratorError, StageCollaborator, StageRequest};
use gw_core::{Finding, HoldReason, Stage, StageId, StageVerdict};
use std::time::Duration;
use thiserror::Error;

/// Errors from one stage invocation
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("stage {stage} exceeded its timeout budget of {budget:?}")]
    Timeout { stage: StageId, budget: Duration },
    #[error("stage {stage} returned a verdict violating the schema: {message}")]
    Schema { stage: StageId, message: String },
    #[error("stage {stage} collaborator failed: {source}")]
    Collaborator {
        stage: StageId,
        source: CollaboratorError,
    },
}

impl RunnerError {
    /// The hold reason this error maps to; runner errors always escalate
    pub fn hold_reason(&self) -> HoldReason {
        match self {
            RunnerError::Timeout { stage, .. } => HoldReason::CollaboratorTimeout { stage: *stage },
            RunnerError::Schema { stage, .. } => HoldReason::SchemaViolation { stage: *stage },
            RunnerError::Collaborator { stage, .. } => {
                HoldReason::CollaboratorFailed { stage: *stage }
            }
        }
    }
}

/// Invokes stage collaborators under their timeout budgets
pub struct StageRunner<C> {
    collaborator: C,
}

impl<C: StageCollaborator> StageRunner<C> {
    pub fn new(collaborator: C) -> Self {
        Self { collaborator }
    }

    /// Invoke `stage` with the given handoff payload and prior findings
    pub async fn invoke(
        &self,
        stage: &Stage,
        handoff: serde_json::Value,
        prior_findings: Vec<Finding>,
    ) -> Result<StageVerdict, RunnerError> {
        let request = StageRequest {
            stage_id: stage.id,
            stage: stage.name.clone(),
            handoff,
            prior_findings,
        };

        let span = tracing::info_span!("stage", stage = %stage.id, name = %stage.name);
        let _guard = span.enter();
        let start = std::time::Instant::now();

        let raw = tokio::time::timeout(stage.timeout, self.collaborator.invoke(&request))
            .await
            .map_err(|_| {
                tracing::error!(budget_ms = stage.timeout.as_millis() as u64, "timeout");
                RunnerError::Timeout {
                    stage: stage.id,
                    budget: stage.timeout,
                }
            })?
            .map_err(|source| RunnerError::Collaborator {
                stage: stage.id,
                source,
            })?;

        let verdict = wire::parse_verdict(stage, &raw).map_err(|e| RunnerError::Schema {
            stage: stage.id,
            message: e.to_string(),
        })?;

        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            status = ?verdict.status,
            findings = verdict.findings.len(),
            "verdict received"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
