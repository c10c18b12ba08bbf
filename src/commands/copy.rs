//! Terminal copy command

use super::{require_folder_ids, run_job, CopyReport, JobHooks};
use crate::config::CopyArgs;
use crate::engine::ReplicationEvent;
use crate::remote::DriveClient;
use crate::store::JsonProgressStore;
use crate::types::ForkError;
use crate::ui::ProgressReporter;
use crate::Config;
use console::Term;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Builder;

/// Run the copy command against Google Drive
pub fn run(args: CopyArgs, config: Config) -> Result<CopyReport, ForkError> {
    let term = Term::stdout();
    let source = match args.source {
        Some(source) => source,
        None => prompt(&term, "Enter the SOURCE folder ID or URL: ")?,
    };
    let destination = match args.destination {
        Some(destination) => destination,
        None => prompt(&term, "Enter the DESTINATION folder ID or URL: ")?,
    };
    let (source, destination) = require_folder_ids(Some(&source), Some(&destination))?;

    let credentials = config.credentials.clone().ok_or_else(|| {
        ForkError::Unauthenticated(
            "no access token; pass --access-token, set DFORK_ACCESS_TOKEN or use --token-file"
                .to_string(),
        )
    })?;
    let mut client = DriveClient::new(credentials, &config.api_base)?;

    if args.fresh && JsonProgressStore::new(&config.progress_file).discard()? {
        println!(
            "Discarded previous progress in '{}'",
            config.progress_file.display()
        );
    }

    println!("Source:      {}", source);
    println!("Destination: {}", destination);
    println!(
        "Progress will be saved to '{}'",
        config.progress_file.display()
    );
    println!(
        "Errors will be logged to '{}'\n",
        config.failure_log.display()
    );

    let cancel = install_interrupt_flag();
    let reporter = ProgressReporter::new();
    reporter.start(&source, &destination);
    let on_event = |event: &ReplicationEvent| reporter.handle(event);

    let result = run_job(
        &mut client,
        &config,
        &source,
        &destination,
        JobHooks {
            on_event: Some(&on_event),
            cancel: Some(&*cancel),
        },
    );

    match &result {
        Ok(report) => {
            reporter.finish("Process finished");
            println!("{}", report.summary());
        }
        Err(ForkError::Interrupted) => {
            reporter.abandon();
            println!("Process interrupted by user.");
            println!("Progress has been saved. You can safely rerun the command to resume.");
        }
        Err(err) => {
            reporter.abandon();
            eprintln!("An unexpected error occurred: {}", err);
            if err.is_resumable() || matches!(err, ForkError::Progress { .. }) {
                println!("Progress has been saved. You may be able to resume by rerunning the command.");
            }
        }
    }

    result
}

fn prompt(term: &Term, label: &str) -> Result<String, ForkError> {
    term.write_str(label)?;
    Ok(term.read_line()?.trim().to_string())
}

/// Flag set on Ctrl-C so the engine can stop at the next item boundary.
///
/// A second Ctrl-C exits at once; a blocked request or a backoff sleep
/// would otherwise delay the stop.
fn install_interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handle = Arc::clone(&flag);

    std::thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!("cannot install Ctrl-C handler: {}", e);
                return;
            }
        };
        runtime.block_on(async {
            while tokio::signal::ctrl_c().await.is_ok() {
                if record_interrupt(&handle) == InterruptAction::Exit {
                    eprintln!("\nInterrupted again, exiting. Progress up to the last saved item is kept.");
                    std::process::exit(130);
                }
            }
        });
    });

    flag
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterruptAction {
    StopAtNextItem,
    Exit,
}

fn record_interrupt(flag: &AtomicBool) -> InterruptAction {
    if flag.swap(true, Ordering::SeqCst) {
        InterruptAction::Exit
    } else {
        InterruptAction::StopAtNextItem
    }
}
