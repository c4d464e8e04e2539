// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gw-core: Core library for the Gatewright (gw) verification pipeline engine
//!
//! This crate provides:
//! - The pipeline data model: stages, verdicts, findings, defect records
//! - Pure gate evaluation and defect routing
//! - The append-only defect ledger and per-stage effectiveness metrics
//! - The `PipelineRun` state machine driven by the engine crate

pub mod clock;
pub mod id;

pub mod finding;
pub mod gate;
pub mod ledger;
pub mod metrics;
pub mod report;
pub mod route;
pub mod run;
pub mod stage;
pub mod verdict;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use finding::{Category, Finding, Severity};
pub use gate::{evaluate, GateResult};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use ledger::{DefectId, DefectLedger, DefectRecord, DefectStatus, LedgerError};
pub use metrics::{PerStageMetrics, StageMetrics};
pub use report::RunReport;
pub use route::{route, ClassificationTable, EscalateReason, RouteDecision};
pub use run::{Decision, HoldReason, PipelineRun, ReworkCounters, RunEvent, RunInput, RunState};
pub use stage::{GateCriterion, Stage, StageId};
pub use verdict::{StageVerdict, VerdictStatus};
