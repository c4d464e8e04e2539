// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stage effectiveness metrics

use crate::stage::StageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Defect counters for one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMetrics {
    /// Defects observed at this stage
    pub found: u32,
    /// Defects whose root cause traces to this stage (injection rate)
    pub injected: u32,
    /// Defects injected here that escaped to a later stage before detection
    pub escaped: u32,
}

impl StageMetrics {
    pub fn is_clean(&self) -> bool {
        *self == StageMetrics::default()
    }
}

/// Metrics for every stage of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerStageMetrics {
    pub stages: BTreeMap<StageId, StageMetrics>,
}

impl PerStageMetrics {
    /// Zeroed metrics for stages 1..=stage_count
    pub fn with_stages(stage_count: u32) -> Self {
        let stages = (1..=stage_count)
            .map(|n| (StageId(n), StageMetrics::default()))
            .collect();
        Self { stages }
    }

    pub fn entry(&mut self, stage: StageId) -> &mut StageMetrics {
        self.stages.entry(stage).or_default()
    }

    pub fn get(&self, stage: StageId) -> StageMetrics {
        self.stages.get(&stage).copied().unwrap_or_default()
    }

    pub fn total_found(&self) -> u32 {
        self.stages.values().map(|m| m.found).sum()
    }
}
