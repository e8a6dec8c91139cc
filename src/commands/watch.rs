use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use kiln::application::{WatchEvent, WatchUseCase};

use super::{canonical_root, display_relative, open_pipeline};

pub fn cmd_watch(root: &Path, json: bool) -> Result<()> {
    let root = canonical_root(root)?;
    let use_case = WatchUseCase::new(open_pipeline(&root, json)?);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    use_case.start(running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            print_event(&event, &root);
        }
    })?;

    Ok(())
}

fn print_event(event: &WatchEvent, root: &Path) {
    match event {
        WatchEvent::WatchStarted { root: watched, extensions } => {
            println!("watching {} ({})", watched, extensions.join(", "));
            println!("press Ctrl+C to stop");
        }
        WatchEvent::FileChanged { path } => {
            println!("changed  {}", display_relative(Path::new(path), root));
        }
        WatchEvent::BuildStarted { files } => {
            println!("building {} file(s)", files);
        }
        WatchEvent::BuildComplete {
            persisted,
            skipped,
            errored,
            warnings,
        } => {
            println!(
                "done     {} built, {} skipped, {} failed, {} warning(s)",
                persisted, skipped, errored, warnings
            );
        }
        WatchEvent::Error { path, message } => match path {
            Some(path) => eprintln!("error    {}\n{}", display_relative(Path::new(path), root), message),
            None => eprintln!("error    {}", message),
        },
        WatchEvent::Shutdown => println!("stopped"),
    }
}
