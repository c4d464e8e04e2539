// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gw check --plan <file>` - Parse and validate a pipeline plan

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Plan TOML file
    #[arg(long)]
    pub plan: PathBuf,
}

pub fn handle(args: CheckArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("reading plan {}", args.plan.display()))?;
    let plan = gw_plan::parse_plan(&content)
        .with_context(|| format!("invalid plan {}", args.plan.display()))?;

    println!("Plan OK: {} stages, rework limit {}", plan.stage_count(), plan.rework_limit);
    for stage in &plan.stages {
        let criteria: Vec<&str> = stage.gate.iter().map(|c| c.name.as_str()).collect();
        let gate = if criteria.is_empty() {
            "(terminal, no gate)".to_string()
        } else {
            criteria.join(", ")
        };
        println!("  {:>2}. {:<20} gate: {}", stage.id, stage.name, gate);
    }
    let targets: Vec<String> = plan
        .classify
        .targets()
        .map(|(category, stage)| format!("{category} -> {stage}"))
        .collect();
    if !targets.is_empty() {
        println!("  classify: {}", targets.join(", "));
    }
    Ok(())
}
