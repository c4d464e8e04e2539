// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator wire schema
//!
//! Strict shape of the verdict a collaborator must return. Unknown fields,
//! unknown enum values, and type mismatches are schema violations; they
//! are never coerced into a verdict.

use gw_core::{Category, Finding, Severity, Stage, StageId, StageVerdict, VerdictStatus};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
enum StatusWire {
    Passed,
    Blocked,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FindingWire {
    severity: Severity,
    category: String,
    description: String,
    #[serde(default)]
    root_cause: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerdictWire {
    status: StatusWire,
    #[serde(default)]
    findings: Vec<FindingWire>,
    #[serde(default)]
    handoff: serde_json::Value,
}

/// Parse a collaborator's raw output into a verdict for `stage`
pub(crate) fn parse_verdict(stage: &Stage, raw: &str) -> Result<StageVerdict, serde_json::Error> {
    let wire: VerdictWire = serde_json::from_str(raw)?;

    let findings = wire
        .findings
        .into_iter()
        .map(|f| Finding {
            severity: f.severity,
            category: Category(f.category),
            description: f.description,
            observed_at: stage.id,
            root_cause: f.root_cause.map(StageId),
        })
        .collect();

    Ok(StageVerdict {
        status: match wire.status {
            StatusWire::Passed => VerdictStatus::Passed,
            StatusWire::Blocked => VerdictStatus::Blocked,
        },
        findings,
        handoff: wire.handoff,
    })
}
