// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gw run --plan <file>` - Drive a pipeline run to release or hold

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use gw_adapters::ProcessCollaborator;
use gw_core::{SystemClock, UuidIdGen};
use gw_engine::PipelineController;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Args)]
pub struct RunArgs {
    /// Plan TOML file
    #[arg(long)]
    pub plan: PathBuf,

    /// JSON file with the initial build payload (defaults to `{}`)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

pub async fn handle(args: RunArgs) -> Result<ExitCode> {
    let content = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("reading plan {}", args.plan.display()))?;
    let plan = gw_plan::parse_plan(&content)
        .with_context(|| format!("invalid plan {}", args.plan.display()))?;

    let initial = match &args.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading input {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid input JSON {}", path.display()))?
        }
        None => serde_json::json!({}),
    };

    // Stage commands run from the plan file's directory
    let cwd = args.plan.parent().unwrap_or(Path::new(".")).to_path_buf();
    let collaborator = ProcessCollaborator::new(plan.commands.clone()).with_cwd(cwd);

    let controller = PipelineController::new(plan, collaborator, SystemClock, UuidIdGen);
    let report = controller.run(initial).await;

    output::print_report(&report, args.output)?;
    Ok(if report.released() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
