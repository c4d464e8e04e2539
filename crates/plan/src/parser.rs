// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan TOML parsing

use crate::validator::{validate, ValidateError};
use gw_core::{ClassificationTable, GateCriterion, Stage, StageId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading a plan
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ValidateError),
}

/// A parsed, validated pipeline plan
#[derive(Debug, Clone)]
pub struct Plan {
    /// Stages in execution order; `stages[i]` has ordinal `i + 1`
    pub stages: Vec<Stage>,
    pub classify: ClassificationTable,
    pub rework_limit: u32,
    /// Collaborator command per stage, for process-backed runs
    pub commands: BTreeMap<StageId, String>,
}

impl Plan {
    /// Build a plan directly from stages, for tests and embedders that
    /// construct stages in code. `parse_plan` is the validating entry
    /// point; callers here run `validate` themselves if they need it.
    pub fn new(stages: Vec<Stage>, classify: ClassificationTable, rework_limit: u32) -> Self {
        Self {
            stages,
            classify,
            rework_limit,
            commands: BTreeMap::new(),
        }
    }

    pub fn stage_count(&self) -> u32 {
        self.stages.len() as u32
    }

    /// Get a stage by ordinal
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.get(id.0.checked_sub(1)? as usize)
    }

    pub fn command(&self, id: StageId) -> Option<&str> {
        self.commands.get(&id).map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanDoc {
    #[serde(default = "default_rework_limit")]
    rework_limit: u32,
    #[serde(default)]
    classify: BTreeMap<String, u32>,
    #[serde(default, rename = "stage")]
    stages: Vec<StageDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StageDoc {
    name: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    timeout: Duration,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    gate: Vec<CriterionDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CriterionDoc {
    name: String,
    field: String,
}

fn default_rework_limit() -> u32 {
    3
}

fn default_timeout() -> Duration {
    Duration::from_secs(300)
}

/// Parse and validate a plan from TOML content
pub fn parse_plan(content: &str) -> Result<Plan, PlanError> {
    let doc: PlanDoc = toml::from_str(content)?;

    let mut stages = Vec::with_capacity(doc.stages.len());
    let mut commands = BTreeMap::new();
    for (index, stage_doc) in doc.stages.into_iter().enumerate() {
        let id = StageId(index as u32 + 1);
        let mut stage = Stage::new(id, stage_doc.name, stage_doc.timeout);
        for criterion in stage_doc.gate {
            stage = stage.with_criterion(GateCriterion::new(criterion.name, criterion.field));
        }
        if let Some(command) = stage_doc.command {
            commands.insert(id, command);
        }
        stages.push(stage);
    }

    let classify = doc
        .classify
        .into_iter()
        .map(|(category, target)| (category, StageId(target)))
        .collect();

    let plan = Plan {
        stages,
        classify,
        rework_limit: doc.rework_limit,
        commands,
    };
    validate(&plan)?;
    Ok(plan)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
