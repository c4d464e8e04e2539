// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Defect ledger
//!
//! Append-only record of every defect found during a run. Records are the
//! source of the per-stage effectiveness metrics; status moves
//! `open -> resolved` exactly once, when the root-cause stage re-passes.

use crate::clock::Clock;
use crate::finding::Finding;
use crate::metrics::{PerStageMetrics, StageMetrics};
use crate::route::{EscalateReason, RouteDecision};
use crate::stage::StageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Monotonically increasing defect identity within one ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DefectId(pub u64);

impl std::fmt::Display for DefectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectStatus {
    Open,
    Resolved,
}

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub id: DefectId,
    pub finding: Finding,
    /// Root-cause stage as resolved by routing, when it could be resolved
    pub root_cause: Option<StageId>,
    pub route: RouteDecision,
    pub status: DefectStatus,
    /// Rework cycle of the root-cause stage at the time of recording
    pub cycle: u32,
    pub recorded_at: DateTime<Utc>,
}

impl DefectRecord {
    /// Open critical/major defects block release
    pub fn blocks_release(&self) -> bool {
        self.status == DefectStatus::Open && self.finding.severity.is_blocking()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("defect not found: {0}")]
    NotFound(DefectId),
    #[error("defect already resolved: {0}")]
    AlreadyResolved(DefectId),
}

/// Append-only defect log for one pipeline run.
///
/// Id allocation uses an atomic counter so a ledger sharded across runs
/// for reporting stays safe under concurrent writers.
#[derive(Debug)]
pub struct DefectLedger {
    records: Vec<DefectRecord>,
    next_id: AtomicU64,
}

impl Default for DefectLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl DefectLedger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a defect with its routing decision, assigning the next id
    pub fn record(
        &mut self,
        finding: Finding,
        route: RouteDecision,
        cycle: u32,
        clock: &impl Clock,
    ) -> DefectId {
        let id = DefectId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let root_cause = match &route {
            RouteDecision::Regress { target } => Some(*target),
            RouteDecision::ResolveInPlace => Some(finding.observed_at),
            // An escalation still knows its root cause unless the finding
            // was unclassifiable
            RouteDecision::Escalate { reason } => match reason {
                EscalateReason::ReworkLimitExceeded { target, .. }
                | EscalateReason::DownstreamRootCause { target } => Some(*target),
                EscalateReason::Unclassifiable { .. } => finding.root_cause,
            },
        };
        tracing::debug!(defect = %id, ?root_cause, "defect recorded");
        self.records.push(DefectRecord {
            id,
            finding,
            root_cause,
            route,
            status: DefectStatus::Open,
            cycle,
            recorded_at: clock.now(),
        });
        id
    }

    /// Transition a defect `open -> resolved`; valid exactly once
    pub fn mark_resolved(&mut self, id: DefectId) -> Result<(), LedgerError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        if record.status == DefectStatus::Resolved {
            return Err(LedgerError::AlreadyResolved(id));
        }
        record.status = DefectStatus::Resolved;
        Ok(())
    }

    /// Resolve every open defect root-caused to `stage`.
    ///
    /// Called when the regression target re-passes its gate, superseding the
    /// verdicts that carried the original findings. Returns the resolved ids.
    pub fn resolve_for_stage(&mut self, stage: StageId) -> Vec<DefectId> {
        let mut resolved = Vec::new();
        for record in &mut self.records {
            if record.status == DefectStatus::Open && record.root_cause == Some(stage) {
                record.status = DefectStatus::Resolved;
                resolved.push(record.id);
            }
        }
        resolved
    }

    pub fn records(&self) -> &[DefectRecord] {
        &self.records
    }

    /// Open critical/major defects
    pub fn open_blocking(&self) -> impl Iterator<Item = &DefectRecord> {
        self.records.iter().filter(|r| r.blocks_release())
    }

    /// Per-stage effectiveness metrics.
    ///
    /// `stage_count` pre-fills a zeroed entry for every stage so clean
    /// stages report explicitly rather than by omission.
    pub fn effectiveness_report(&self, stage_count: u32) -> PerStageMetrics {
        let mut metrics = PerStageMetrics::with_stages(stage_count);
        for record in &self.records {
            metrics.entry(record.finding.observed_at).found += 1;
            if let Some(root) = record.root_cause {
                metrics.entry(root).injected += 1;
                // Escaped: injected earlier than it was observed
                if root < record.finding.observed_at {
                    metrics.entry(root).escaped += 1;
                }
            }
        }
        metrics
    }

    /// Metrics entry helper for a single stage (mainly for tests)
    pub fn stage_metrics(&self, stage: StageId, stage_count: u32) -> StageMetrics {
        self.effectiveness_report(stage_count).get(stage)
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
