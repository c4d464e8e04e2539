// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage verdicts
//!
//! The structured output of one stage invocation. Immutable once returned
//! by the stage runner.

use crate::finding::Finding;
use serde::{Deserialize, Serialize};

/// Outcome reported by a stage collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Passed,
    Blocked,
}

/// The structured output of one stage invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageVerdict {
    pub status: VerdictStatus,
    #[serde(default)]
    pub findings: Vec<Finding>,
    /// Opaque payload handed to the next stage
    #[serde(default)]
    pub handoff: serde_json::Value,
}

impl StageVerdict {
    /// A clean passing verdict with the given handoff payload
    pub fn passed(handoff: serde_json::Value) -> Self {
        Self {
            status: VerdictStatus::Passed,
            findings: Vec::new(),
            handoff,
        }
    }

    /// A blocked verdict carrying the given findings
    pub fn blocked(findings: Vec<Finding>, handoff: serde_json::Value) -> Self {
        Self {
            status: VerdictStatus::Blocked,
            findings,
            handoff,
        }
    }

    /// Findings severe enough to block release (critical/major)
    pub fn blocking_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity.is_blocking())
    }
}
