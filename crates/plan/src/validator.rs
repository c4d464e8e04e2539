// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan validation
//!
//! Configuration errors are rejected before a run is constructed; the
//! engine assumes a validated plan.

use crate::parser::Plan;
use gw_core::StageId;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("plan defines no stages")]
    NoStages,
    #[error("duplicate stage name: {0}")]
    DuplicateStage(String),
    #[error("stage {stage} ({name}) has an empty gate; only the terminal stage may omit criteria")]
    EmptyGate { stage: StageId, name: String },
    #[error("criterion '{criterion}' in stage {stage} has an empty field path")]
    EmptyCriterionField { stage: StageId, criterion: String },
    #[error("classification target out of range: {category} -> {target} (stages 1..={count})")]
    ClassifyOutOfRange {
        category: String,
        target: StageId,
        count: u32,
    },
    #[error("rework limit must be at least 1")]
    ZeroReworkLimit,
}

/// Validate a plan's structural invariants
pub fn validate(plan: &Plan) -> Result<(), ValidateError> {
    if plan.stages.is_empty() {
        return Err(ValidateError::NoStages);
    }
    if plan.rework_limit == 0 {
        return Err(ValidateError::ZeroReworkLimit);
    }

    let count = plan.stage_count();
    let mut names = BTreeSet::new();
    for stage in &plan.stages {
        if !names.insert(stage.name.clone()) {
            return Err(ValidateError::DuplicateStage(stage.name.clone()));
        }
        // Every stage except the terminal one needs at least one criterion
        if stage.gate.is_empty() && stage.id.0 != count {
            return Err(ValidateError::EmptyGate {
                stage: stage.id,
                name: stage.name.clone(),
            });
        }
        for criterion in &stage.gate {
            if criterion.field.trim().is_empty() {
                return Err(ValidateError::EmptyCriterionField {
                    stage: stage.id,
                    criterion: criterion.name.clone(),
                });
            }
        }
    }

    for (category, target) in plan.classify.targets() {
        if target.0 == 0 || target.0 > count {
            return Err(ValidateError::ClassifyOutOfRange {
                category: category.to_string(),
                target,
                count,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
