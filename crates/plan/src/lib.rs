// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pipeline plan parsing and validation
//!
//! A plan is the static configuration of one verification pipeline: the
//! ordered stage sequence with gate criteria and timeout budgets, the
//! root-cause classification table, and the rework-cycle limit. Plans are
//! parsed from TOML once and never mutated mid-run.

mod parser;
mod validator;

pub use parser::{parse_plan, Plan, PlanError};
pub use validator::{validate, ValidateError};
