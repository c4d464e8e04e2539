// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage configuration
//!
//! A stage is one fixed step in the ordered verification sequence. Stages
//! are built once at plan time and never mutated during a run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 1-based ordinal position of a stage in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StageId(pub u32);

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StageId {
    fn from(n: u32) -> Self {
        StageId(n)
    }
}

/// One named predicate a stage's verdict must satisfy to open the gate
/// into the next stage.
///
/// `field` is a dotted path into the verdict's handoff payload. The
/// criterion is met only when the path resolves to JSON `true`; a missing
/// or non-boolean value fails closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCriterion {
    pub name: String,
    pub field: String,
}

impl GateCriterion {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// Immutable configuration for one verification stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    /// Gate criteria for entering the next stage. Empty only on the
    /// terminal stage; plan validation rejects empty gates elsewhere.
    #[serde(default)]
    pub gate: Vec<GateCriterion>,
    /// Maximum wall-clock budget for one invocation of this stage
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Stage {
    pub fn new(id: impl Into<StageId>, name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gate: Vec::new(),
            timeout,
        }
    }

    /// Add a gate criterion
    pub fn with_criterion(mut self, criterion: GateCriterion) -> Self {
        self.gate.push(criterion);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_builder_collects_criteria() {
        let stage = Stage::new(1, "requirements", Duration::from_secs(60))
            .with_criterion(GateCriterion::new("closed", "requirements.closed"))
            .with_criterion(GateCriterion::new("reviewed", "requirements.reviewed"));
        assert_eq!(stage.id, StageId(1));
        assert_eq!(stage.gate.len(), 2);
    }

    #[test]
    fn stage_timeout_round_trips_through_humantime() {
        let stage = Stage::new(3, "static-analysis", Duration::from_secs(300));
        let toml = toml_like(&stage);
        assert!(toml.contains("\"5m\""));
    }

    fn toml_like(stage: &Stage) -> String {
        serde_json::to_string(stage).unwrap()
    }
}
