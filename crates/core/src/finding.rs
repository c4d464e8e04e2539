// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Findings reported by stage collaborators

use crate::stage::StageId;
use serde::{Deserialize, Serialize};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Observation,
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Critical and major findings block release and are routed when a
    /// gate fails; minor findings and observations are recorded only.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Major)
    }

    pub fn name(&self) -> &str {
        match self {
            Severity::Observation => "observation",
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Finding category from the controlled vocabulary supplied by stages
/// (e.g. `requirement_ambiguity`, `implementation_error`). Categories are
/// resolved to root-cause stages through the plan's classification table,
/// never through hard-coded variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category(pub String);

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category(s)
    }
}

/// One observed defect reported by a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub description: String,
    /// Stage at which the finding was observed
    pub observed_at: StageId,
    /// Root-cause stage, authoritative when the stage supplied it
    #[serde(default)]
    pub root_cause: Option<StageId>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        category: impl Into<Category>,
        description: impl Into<String>,
        observed_at: impl Into<StageId>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            description: description.into(),
            observed_at: observed_at.into(),
            root_cause: None,
        }
    }

    /// Attach an explicit root-cause stage
    pub fn with_root_cause(mut self, stage: impl Into<StageId>) -> Self {
        self.root_cause = Some(stage.into());
        self
    }
}
