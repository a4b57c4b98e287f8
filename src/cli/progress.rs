//! Progress bar rendering for recognition batches.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::pipeline::BatchEvent;

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Render batch events until the sending side is dropped.
///
/// When `visible` is false the events are drained silently.
pub fn spawn_renderer(mut events: UnboundedReceiver<BatchEvent>, visible: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut bar: Option<ProgressBar> = None;

        while let Some(event) = events.recv().await {
            if !visible {
                continue;
            }

            match event {
                BatchEvent::BatchStarted { total_pages } => {
                    println!(
                        "{} Recognizing {} page(s)",
                        style("→").cyan(),
                        total_pages
                    );
                    let progress = ProgressBar::new(100);
                    progress.set_style(bar_style());
                    bar = Some(progress);
                }
                BatchEvent::PageStarted { page_number, .. } => {
                    if let Some(ref progress) = bar {
                        progress.set_message(format!("page {}", page_number));
                    }
                }
                BatchEvent::Progress { percent } => {
                    if let Some(ref progress) = bar {
                        progress.set_position(u64::from(percent));
                    }
                }
                BatchEvent::PageFailed { page_number, error } => {
                    if let Some(ref progress) = bar {
                        progress.println(format!(
                            "  {} page {}: {}",
                            style("✗").red(),
                            page_number,
                            error
                        ));
                    }
                }
                BatchEvent::BatchComplete {
                    succeeded,
                    failed,
                    cancelled,
                } => {
                    if let Some(progress) = bar.take() {
                        progress.finish_and_clear();
                    }
                    if cancelled {
                        println!(
                            "{} Cancelled: {} page(s) recognized, {} not recognized",
                            style("!").yellow(),
                            succeeded,
                            failed
                        );
                    } else if failed > 0 {
                        println!(
                            "{} {} page(s) recognized, {} failed",
                            style("!").yellow(),
                            succeeded,
                            failed
                        );
                    } else {
                        println!("{} {} page(s) recognized", style("✓").green(), succeeded);
                    }
                }
                BatchEvent::PageProgress { .. } | BatchEvent::PageCompleted { .. } => {}
            }
        }

        if let Some(progress) = bar {
            progress.finish_and_clear();
        }
    })
}
