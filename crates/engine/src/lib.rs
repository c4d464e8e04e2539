// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Gatewright execution engine
//!
//! Drives one verification pipeline run: the stage runner invokes
//! collaborators under their timeout budgets, the controller sequences
//! stages, routes defects, applies regression, and finalizes the
//! release/hold decision.

mod controller;
mod runner;
mod wire;

pub use controller::PipelineController;
pub use runner::{RunnerError, StageRunner};
