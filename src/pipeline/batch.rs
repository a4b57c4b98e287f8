//! Sequential recognition of an ordered page batch.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{Page, RecognitionResult};
use crate::ocr::{EngineError, RecognitionBackend, RecognitionEngine};

/// Separator placed between the texts of consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

const CANCELLED: &str = "cancelled before recognition";

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    BatchStarted { total_pages: usize },
    PageStarted { page_number: u32, index: usize },
    /// Progress of the current page, 0-100.
    PageProgress { page_number: u32, percent: u8 },
    /// Overall batch progress, 0-100. Never decreases.
    Progress { percent: u8 },
    PageCompleted { page_number: u32, confidence: f32 },
    PageFailed { page_number: u32, error: String },
    BatchComplete {
        succeeded: usize,
        failed: usize,
        cancelled: bool,
    },
}

/// Receives [`BatchEvent`]s.
pub trait ProgressSink {
    fn emit(&self, event: BatchEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(BatchEvent),
{
    fn emit(&self, event: BatchEvent) {
        self(event)
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: BatchEvent) {}
}

/// Results of a batch, one per page in ordinal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<RecognitionResult>,
    /// Shutdown was requested before every page could start.
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn combined_text(&self) -> String {
        combine_text(&self.results)
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Text of successful pages in page order, separated by a blank line.
///
/// Failed pages contribute nothing, and neither do pages that recognized
/// no text.
pub fn combine_text(results: &[RecognitionResult]) -> String {
    let mut ordered: Vec<&RecognitionResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.page_number);
    ordered
        .into_iter()
        .filter(|r| r.success && !r.text.is_empty())
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Tracks overall progress so reported values never go backwards.
struct OverallProgress<'a> {
    sink: &'a dyn ProgressSink,
    total: u32,
    last: u8,
}

impl<'a> OverallProgress<'a> {
    fn new(sink: &'a dyn ProgressSink, total: usize) -> Self {
        Self {
            sink,
            total: total.max(1) as u32,
            last: 0,
        }
    }

    /// Report progress within the page at `index`.
    fn update(&mut self, index: usize, page_percent: u8) {
        let done = index as u32 * 100 + u32::from(page_percent.min(100));
        self.advance((done / self.total).min(100) as u8);
    }

    fn advance(&mut self, percent: u8) {
        if percent > self.last {
            self.last = percent;
            self.sink.emit(BatchEvent::Progress { percent });
        }
    }
}

/// Recognize `pages` one at a time in ordinal order.
///
/// Page failures are recorded in their results and never stop the batch.
/// An engine initialization failure aborts it. When a shutdown is requested
/// the current page finishes and every page not yet started gets a failed
/// result, so the outcome still holds one result per page.
pub fn process_pages<B: RecognitionBackend>(
    engine: &mut RecognitionEngine<B>,
    pages: &[Page],
    sink: &dyn ProgressSink,
) -> Result<BatchOutcome, EngineError> {
    if pages.is_empty() {
        debug!("Empty batch, nothing to recognize");
        return Ok(BatchOutcome::default());
    }

    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|page| page.ordinal);

    sink.emit(BatchEvent::BatchStarted {
        total_pages: ordered.len(),
    });

    let mut progress = OverallProgress::new(sink, ordered.len());
    let mut results = Vec::with_capacity(ordered.len());
    let mut cancelled = false;

    for (index, page) in ordered.iter().enumerate() {
        if engine.shutdown_requested() {
            cancelled = true;
            results.push(RecognitionResult::failed(page, CANCELLED));
            sink.emit(BatchEvent::PageFailed {
                page_number: page.ordinal,
                error: CANCELLED.to_string(),
            });
            continue;
        }

        sink.emit(BatchEvent::PageStarted {
            page_number: page.ordinal,
            index,
        });

        let result = engine.recognize(page, &mut |percent| {
            sink.emit(BatchEvent::PageProgress {
                page_number: page.ordinal,
                percent,
            });
            progress.update(index, percent);
        });

        let result = match result {
            Ok(result) => result,
            // Requested between the check above and the call.
            Err(EngineError::ShutDown) => {
                cancelled = true;
                RecognitionResult::failed(page, CANCELLED)
            }
            Err(e) => return Err(e),
        };

        if result.success {
            sink.emit(BatchEvent::PageCompleted {
                page_number: result.page_number,
                confidence: result.confidence,
            });
        } else {
            sink.emit(BatchEvent::PageFailed {
                page_number: result.page_number,
                error: result.error.clone().unwrap_or_default(),
            });
        }
        results.push(result);
        progress.update(index + 1, 0);
    }

    progress.advance(100);

    let outcome = BatchOutcome { results, cancelled };
    if cancelled {
        warn!(
            "Batch cancelled: {} of {} pages recognized",
            outcome.succeeded(),
            ordered.len()
        );
    } else {
        info!(
            "Batch complete: {} succeeded, {} failed",
            outcome.succeeded(),
            outcome.failed()
        );
    }

    sink.emit(BatchEvent::BatchComplete {
        succeeded: outcome.succeeded(),
        failed: outcome.failed(),
        cancelled,
    });

    Ok(outcome)
}
