// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Report formatting for `gw run`

use anyhow::Result;
use clap::ValueEnum;
use gw_core::{Decision, RunReport};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a run report in the selected format
pub fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print_text(report),
    }
    Ok(())
}

fn print_text(report: &RunReport) {
    println!("Run: {}", report.run_id);
    match &report.decision {
        Decision::Release => println!("Decision: release"),
        Decision::Hold { reason } => println!("Decision: hold ({reason})"),
    }

    if !report.blocking_issues.is_empty() {
        println!("Blocking issues:");
        for finding in &report.blocking_issues {
            println!(
                "  [{}] {} (observed at stage {})",
                finding.severity, finding.description, finding.observed_at
            );
        }
    }

    println!("Stage metrics (found/injected/escaped):");
    for (stage, m) in &report.metrics.stages {
        println!("  {:>2}: {}/{}/{}", stage, m.found, m.injected, m.escaped);
    }

    let resolved = report
        .defects
        .iter()
        .filter(|d| d.status == gw_core::DefectStatus::Resolved)
        .count();
    println!("Defects: {} recorded, {} resolved", report.defects.len(), resolved);
}
