//! Terminal and JSON rendering of batch results.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use waggle_core::PathRejection;
use waggle_pipeline::{BatchReport, TaskOutcome};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "task")]
    task: String,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "detail")]
    detail: String,
}

#[derive(Serialize)]
struct BatchReportJson {
    registered: usize,
    failed: usize,
    tasks: Vec<TaskOutcomeJson>,
}

#[derive(Serialize)]
struct TaskOutcomeJson {
    task: String,
    path: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// List every rejected directory, grouped by reason.
pub fn print_rejection(rejection: &PathRejection) {
    if !rejection.bad_names.is_empty() {
        println!();
        println!("The following tasks will not be valid ECS tasks:");
        for name in &rejection.bad_names {
            println!("    * {name}");
        }
    }

    if !rejection.not_a_dir.is_empty() {
        println!();
        println!("The following paths don't appear to be Docker configurations:");
        for name in &rejection.not_a_dir {
            println!("    * {name}");
        }
    }
}

/// One diagnostic per failed task, naming its directory.
pub fn print_failures(report: &BatchReport) {
    for (task, err) in report.failures() {
        println!();
        println!(
            "{} Unable to prepare AWS task {}",
            "✗".red().bold(),
            task.source_path.display()
        );
        println!("    {}: {err}", err.kind());
    }
}

/// Every attempted task with its outcome.
pub fn print_summary(report: &BatchReport) {
    println!();
    println!("The following tasks have been registered with AWS ECS:");
    let rows: Vec<SummaryRow> = report.outcomes.iter().map(summary_row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let registered = report.registrations().count();
    let total = report.outcomes.len();
    if registered == total {
        println!("{} {registered} of {total} registered", "✓".green().bold());
    } else {
        println!(
            "{} {registered} of {total} registered",
            "!".yellow().bold()
        );
    }
}

pub fn print_json(report: &BatchReport) -> Result<()> {
    let payload = BatchReportJson {
        registered: report.registrations().count(),
        failed: report.failures().count(),
        tasks: report.outcomes.iter().map(outcome_json).collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize batch report")?
    );
    Ok(())
}

fn summary_row(outcome: &TaskOutcome) -> SummaryRow {
    match &outcome.result {
        Ok(registration) => SummaryRow {
            task: outcome.task.name.to_string(),
            result: format!("revision {}", registration.revision),
            detail: registration.image.to_string(),
        },
        Err(err) => SummaryRow {
            task: outcome.task.name.to_string(),
            result: format!("failed ({})", err.kind()),
            detail: err.to_string(),
        },
    }
}

fn outcome_json(outcome: &TaskOutcome) -> TaskOutcomeJson {
    let mut json = TaskOutcomeJson {
        task: outcome.task.name.to_string(),
        path: outcome.task.source_path.display().to_string(),
        status: "registered",
        revision: None,
        image: None,
        error_kind: None,
        error: None,
    };
    match &outcome.result {
        Ok(registration) => {
            json.revision = Some(registration.revision.0);
            json.image = Some(registration.image.to_string());
        }
        Err(err) => {
            json.status = "failed";
            json.error_kind = Some(err.kind());
            json.error = Some(err.to_string());
        }
    }
    json
}
