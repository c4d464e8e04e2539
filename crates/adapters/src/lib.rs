// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Stage collaborator adapters
//!
//! The only code that crosses the trust boundary into collaborator
//! territory. A collaborator receives a handoff package and answers with a
//! raw verdict; interpreting that verdict belongs to the engine's runner.

pub mod collaborator;

pub use collaborator::{CollaboratorError, ProcessCollaborator, StageCollaborator, StageRequest};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use collaborator::{FakeCollaborator, InvokeCall};
