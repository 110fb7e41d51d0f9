//! Deploy command implementation.

use std::path::PathBuf;

use crate::app::api::{BatchSummary, DeployResult, DeploymentOutcome, ToolOptions};
use crate::domain::AppError;

pub fn run_deploy(
    target: &str,
    resource_group: &str,
    root: Option<PathBuf>,
    dry_run: bool,
    options: &ToolOptions,
) -> Result<i32, AppError> {
    match crate::app::api::deploy(target, resource_group, root, dry_run, options)? {
        DeployResult::Single(outcome) => {
            print_outcome(&outcome);
            Ok(0)
        }
        DeployResult::Batch(summary) => {
            print_summary(&summary);
            Ok(if summary.is_success() { 0 } else { 1 })
        }
    }
}

fn print_outcome(outcome: &DeploymentOutcome) {
    if outcome.dry_run {
        println!(
            "📄 Dry run for {} (deployment {})",
            outcome.folder.display(),
            outcome.deployment_name
        );
        println!("  {}", outcome.command);
    } else {
        println!(
            "✅ Deployed {} as {} to {}",
            outcome.folder.display(),
            outcome.deployment_name,
            outcome.resource_group
        );
    }
}

fn print_summary(summary: &BatchSummary) {
    for outcome in &summary.outcomes {
        print_outcome(outcome);
    }
    for failure in &summary.failures {
        eprintln!("❌ {} ({}): {}", failure.folder.display(), failure.stage, failure.error);
    }

    println!();
    println!("🚀 Deployment summary");
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Total: {}", summary.total);
}
