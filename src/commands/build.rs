use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use kiln::application::{BuildReport, FileOutcome};

use super::{canonical_root, display_relative, open_pipeline};

pub fn cmd_build(root: &Path, json: bool) -> Result<()> {
    let root = canonical_root(root)?;
    let pipeline = open_pipeline(&root, json)?;

    // Ctrl+C stops dispatching new files; running ones finish
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_clone.store(true, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let report = pipeline.build_all(&cancel)?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print_report(&report, &root);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &BuildReport, root: &Path) {
    for outcome in &report.outcomes {
        print_outcome(outcome, root);
    }

    println!(
        "\n{} built, {} skipped, {} failed, {} warning(s)",
        report.persisted, report.skipped, report.errored, report.warnings
    );
    if report.cancelled > 0 {
        println!("cancelled: {} file(s) not started", report.cancelled);
    }
}

fn print_outcome(outcome: &FileOutcome, root: &Path) {
    let path = display_relative(&outcome.path, root);

    if let Some(error) = &outcome.error {
        println!("error  {}", path);
        for line in error.lines() {
            println!("       {}", line);
        }
    } else if outcome.is_skipped() {
        let reason = outcome.skip_reason.as_deref().unwrap_or("skipped");
        println!("skip   {} ({})", path, reason);
    } else {
        let written: Vec<String> = outcome
            .written
            .iter()
            .map(|p| display_relative(p, root))
            .collect();
        println!("built  {} -> {}", path, written.join(", "));
    }

    for warning in &outcome.warnings {
        println!("warn   {}: {}", path, warning);
    }
}
