// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage collaborator invocation contract

mod process;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use process::ProcessCollaborator;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCollaborator, InvokeCall};

use async_trait::async_trait;
use gw_core::{Finding, StageId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input package for one stage invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRequest {
    pub stage_id: StageId,
    pub stage: String,
    /// Opaque payload handed over from the previous stage
    pub handoff: serde_json::Value,
    /// Findings attached when a stage is re-entered after a regression
    #[serde(default)]
    pub prior_findings: Vec<Finding>,
}

/// Errors from the collaborator side of the boundary
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("no command configured for stage {0}")]
    NoCommand(StageId),
    #[error("failed to spawn collaborator: {0}")]
    SpawnFailed(String),
    #[error("collaborator i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode stage request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("collaborator exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// An external stage collaborator: payload in, raw verdict out.
///
/// Implementations must not interpret the verdict; schema validation and
/// timeout enforcement live in the engine's stage runner.
#[async_trait]
pub trait StageCollaborator: Send + Sync {
    async fn invoke(&self, request: &StageRequest) -> Result<String, CollaboratorError>;
}
