// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake collaborator for tests
//!
//! Scripted raw responses per stage with a recorded call log. Responses are
//! consumed in order; the last scripted response for a stage repeats, so a
//! stage that always passes needs scripting only once.

use super::{CollaboratorError, StageCollaborator, StageRequest};
use async_trait::async_trait;
use gw_core::{Finding, StageId, StageVerdict};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeCall {
    pub stage_id: StageId,
    pub stage: String,
    pub prior_findings: Vec<Finding>,
}

#[derive(Debug, Clone)]
enum Script {
    Respond(String),
    Delay(Duration, String),
    Fail(String),
}

#[derive(Debug, Default)]
struct Inner {
    scripts: BTreeMap<StageId, VecDeque<Script>>,
    calls: Vec<InvokeCall>,
}

/// Scripted in-memory collaborator
#[derive(Debug, Clone, Default)]
pub struct FakeCollaborator {
    inner: Arc<Mutex<Inner>>,
}

impl FakeCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a raw response for a stage
    pub fn respond(&self, stage: impl Into<StageId>, raw: impl Into<String>) {
        self.push(stage.into(), Script::Respond(raw.into()));
    }

    /// Script a structured verdict for a stage
    pub fn respond_verdict(&self, stage: impl Into<StageId>, verdict: &StageVerdict) {
        let raw = serde_json::to_string(verdict).unwrap_or_default();
        self.respond(stage, raw);
    }

    /// Script a response that arrives only after `delay`
    pub fn respond_after(
        &self,
        stage: impl Into<StageId>,
        delay: Duration,
        raw: impl Into<String>,
    ) {
        self.push(stage.into(), Script::Delay(delay, raw.into()));
    }

    /// Script an invocation failure for a stage
    pub fn fail(&self, stage: impl Into<StageId>, message: impl Into<String>) {
        self.push(stage.into(), Script::Fail(message.into()));
    }

    /// All recorded invocations in order
    pub fn calls(&self) -> Vec<InvokeCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Number of invocations of one stage
    pub fn invocations(&self, stage: impl Into<StageId>) -> usize {
        let stage = stage.into();
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .filter(|c| c.stage_id == stage)
            .count()
    }

    fn push(&self, stage: StageId, script: Script) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.scripts.entry(stage).or_default().push_back(script);
    }

    fn next_script(&self, request: &StageRequest) -> Option<Script> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(InvokeCall {
            stage_id: request.stage_id,
            stage: request.stage.clone(),
            prior_findings: request.prior_findings.clone(),
        });
        let queue = inner.scripts.get_mut(&request.stage_id)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            // Last response repeats for subsequent invocations
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl StageCollaborator for FakeCollaborator {
    async fn invoke(&self, request: &StageRequest) -> Result<String, CollaboratorError> {
        let script = self
            .next_script(request)
            .ok_or_else(|| CollaboratorError::SpawnFailed("no scripted response".to_string()))?;

        match script {
            Script::Respond(raw) => Ok(raw),
            Script::Delay(delay, raw) => {
                tokio::time::sleep(delay).await;
                Ok(raw)
            }
            Script::Fail(message) => Err(CollaboratorError::SpawnFailed(message)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
