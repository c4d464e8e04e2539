// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-backed stage collaborator

use super::{CollaboratorError, StageCollaborator, StageRequest};
use async_trait::async_trait;
use gw_core::StageId;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Invokes one external command per stage: the stage request is written to
/// the command's stdin as JSON, the raw verdict is read from its stdout.
#[derive(Debug, Clone, Default)]
pub struct ProcessCollaborator {
    commands: BTreeMap<StageId, String>,
    cwd: Option<PathBuf>,
}

impl ProcessCollaborator {
    pub fn new(commands: BTreeMap<StageId, String>) -> Self {
        Self {
            commands,
            cwd: None,
        }
    }

    /// Run stage commands from the given working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[async_trait]
impl StageCollaborator for ProcessCollaborator {
    async fn invoke(&self, request: &StageRequest) -> Result<String, CollaboratorError> {
        let command = self
            .commands
            .get(&request.stage_id)
            .ok_or(CollaboratorError::NoCommand(request.stage_id))?;

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .env("GW_STAGE", &request.stage)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(stage = %request.stage_id, command, "invoking collaborator");

        let mut child = cmd
            .spawn()
            .map_err(|e| CollaboratorError::SpawnFailed(e.to_string()))?;

        let payload = serde_json::to_vec(request)?;
        if let Some(mut stdin) = child.stdin.take() {
            // A collaborator that exits without reading stdin closes the
            // pipe; that is its prerogative, not an invocation error.
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
            // Drop closes the pipe so the collaborator sees EOF
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(CollaboratorError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> StageRequest {
        StageRequest {
            stage_id: StageId(1),
            stage: "requirements".to_string(),
            handoff: json!({"component": "fuel-controller"}),
            prior_findings: vec![],
        }
    }

    #[tokio::test]
    async fn pipes_request_in_and_verdict_out() {
        let mut commands = BTreeMap::new();
        // Echo the handoff back inside a passing verdict
        commands.insert(
            StageId(1),
            r#"cat > /dev/null; printf '{"status":"passed","findings":[],"handoff":{}}'"#
                .to_string(),
        );
        let collaborator = ProcessCollaborator::new(commands);

        let raw = collaborator.invoke(&request()).await.unwrap();
        assert!(raw.contains("\"passed\""));
    }

    #[tokio::test]
    async fn missing_command_is_an_error() {
        let collaborator = ProcessCollaborator::new(BTreeMap::new());
        let err = collaborator.invoke(&request()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::NoCommand(StageId(1))));
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let mut commands = BTreeMap::new();
        commands.insert(StageId(1), "echo boom >&2; exit 3".to_string());
        let collaborator = ProcessCollaborator::new(commands);

        let err = collaborator.invoke(&request()).await.unwrap_err();
        match err {
            CollaboratorError::NonZeroExit { code, stderr } => {
                assert_eq!(code, 3);
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
