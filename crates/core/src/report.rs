// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Final run report
//!
//! The only user-visible outcome of a run: release or hold, together with
//! the full chain of findings, routing decisions, and audit events that led
//! to it.

use crate::finding::Finding;
use crate::ledger::DefectRecord;
use crate::metrics::PerStageMetrics;
use crate::run::{Decision, RunEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    #[serde(flatten)]
    pub decision: Decision,
    /// Findings that were still blocking when the run ended
    pub blocking_issues: Vec<Finding>,
    pub metrics: PerStageMetrics,
    /// Ordered audit trail of every transition
    pub events: Vec<RunEvent>,
    /// Full defect ledger contents
    pub defects: Vec<DefectRecord>,
}

impl RunReport {
    pub fn released(&self) -> bool {
        self.decision == Decision::Release
    }
}
