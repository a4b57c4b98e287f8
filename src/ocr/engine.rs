//! Lifecycle wrapper around a recognition backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::backend::{OcrError, RecognitionBackend};
use crate::models::{MediaKind, Page, RecognitionResult};

/// Errors that abort a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Recognition engine initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Recognition engine has been shut down")]
    ShutDown,
}

/// Cloneable request to stop a running batch.
///
/// Once requested, the batch finishes its current page and starts no others.
/// The request is permanent for the engine it came from.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineState {
    Uninitialized,
    Ready,
    /// Initialization failed; the message is replayed on every later call.
    Failed(String),
    ShutDown,
}

/// Owns one backend instance and initializes it on first use.
///
/// The engine recognizes one page at a time. Callers that want concurrent
/// batches need one engine per batch.
pub struct RecognitionEngine<B: RecognitionBackend> {
    backend: B,
    state: EngineState,
    shutdown: ShutdownHandle,
}

impl<B: RecognitionBackend> RecognitionEngine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_shutdown_handle(backend, ShutdownHandle::default())
    }

    /// Use an existing handle, so it can be wired up before the engine exists.
    pub fn with_shutdown_handle(backend: B, shutdown: ShutdownHandle) -> Self {
        Self {
            backend,
            state: EngineState::Uninitialized,
            shutdown,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state == EngineState::Ready
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.is_requested()
    }

    /// Initialize the backend if it has not been yet.
    ///
    /// A failed initialization is not retried: later calls return the same
    /// error without touching the backend again.
    pub fn init(&mut self) -> Result<(), EngineError> {
        match &self.state {
            EngineState::Ready => Ok(()),
            EngineState::Failed(message) => Err(EngineError::InitializationFailed(message.clone())),
            EngineState::ShutDown => Err(EngineError::ShutDown),
            EngineState::Uninitialized => {
                info!("Initializing {} recognition engine", self.backend.name());
                match self.backend.initialize() {
                    Ok(()) => {
                        self.state = EngineState::Ready;
                        Ok(())
                    }
                    Err(e) => {
                        let message = e.to_string();
                        warn!("{} initialization failed: {}", self.backend.name(), message);
                        self.state = EngineState::Failed(message.clone());
                        Err(EngineError::InitializationFailed(message))
                    }
                }
            }
        }
    }

    /// Recognize one page.
    ///
    /// Per-page problems, including an unsupported media type, come back as
    /// a failed [`RecognitionResult`]. Only engine-level failures are errors.
    pub fn recognize(
        &mut self,
        page: &Page,
        progress: &mut dyn FnMut(u8),
    ) -> Result<RecognitionResult, EngineError> {
        if self.state == EngineState::ShutDown || self.shutdown.is_requested() {
            return Err(EngineError::ShutDown);
        }

        let Some(kind) = page.media_kind() else {
            let error = OcrError::UnsupportedMediaKind(page.media_type.clone());
            warn!("Skipping {}: {}", page.display_name(), error);
            return Ok(RecognitionResult::failed(page, error.to_string()));
        };

        self.init()?;

        debug!("Recognizing {} ({})", page.display_name(), kind);
        let start = Instant::now();
        let outcome = match kind {
            MediaKind::Image => self.backend.recognize_image(&page.content, progress),
            MediaKind::Pdf => {
                self.backend
                    .recognize_pdf_page(&page.content, page.pdf_page.unwrap_or(1), progress)
            }
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(recognized) => Ok(RecognitionResult::succeeded(
                page,
                &recognized.text,
                recognized.confidence,
                elapsed_ms,
            )),
            Err(e) => {
                warn!("Recognition failed for {}: {}", page.display_name(), e);
                Ok(RecognitionResult::failed(page, e.to_string()))
            }
        }
    }

    /// Release the backend. Safe to call repeatedly or before first use.
    ///
    /// The engine cannot be used again afterwards.
    pub fn shutdown(&mut self) {
        self.shutdown.request();
        if self.state == EngineState::Ready {
            self.backend.terminate();
            info!("{} recognition engine shut down", self.backend.name());
        }
        self.state = EngineState::ShutDown;
    }
}

impl<B: RecognitionBackend> Drop for RecognitionEngine<B> {
    fn drop(&mut self) {
        if self.state == EngineState::Ready {
            self.backend.terminate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::RecognizedText;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Counts {
        init: AtomicUsize,
        recognize: AtomicUsize,
        terminate: AtomicUsize,
    }

    struct FakeBackend {
        counts: Arc<Counts>,
        init_error: Option<&'static str>,
    }

    impl FakeBackend {
        fn new(counts: &Arc<Counts>) -> Self {
            Self {
                counts: Arc::clone(counts),
                init_error: None,
            }
        }
    }

    impl RecognitionBackend for FakeBackend {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            String::new()
        }

        fn initialize(&mut self) -> Result<(), OcrError> {
            self.counts.init.fetch_add(1, Ordering::SeqCst);
            match self.init_error {
                Some(message) => Err(OcrError::LanguageDataMissing(message.to_string())),
                None => Ok(()),
            }
        }

        fn recognize_image(
            &mut self,
            _image: &[u8],
            progress: &mut dyn FnMut(u8),
        ) -> Result<RecognizedText, OcrError> {
            self.counts.recognize.fetch_add(1, Ordering::SeqCst);
            progress(100);
            Ok(RecognizedText {
                text: "  text  ".to_string(),
                confidence: 88.0,
            })
        }

        fn recognize_pdf_page(
            &mut self,
            _pdf: &[u8],
            page: u32,
            _progress: &mut dyn FnMut(u8),
        ) -> Result<RecognizedText, OcrError> {
            self.counts.recognize.fetch_add(1, Ordering::SeqCst);
            Err(OcrError::OcrFailed(format!("page {} unreadable", page)))
        }

        fn terminate(&mut self) {
            self.counts.terminate.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn image_page(ordinal: u32) -> Page {
        Page::new(ordinal, b"img".to_vec(), "image/png")
    }

    #[test]
    fn test_lazy_initialization() {
        let counts = Arc::new(Counts::default());
        let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
        assert!(!engine.is_initialized());

        let result = engine.recognize(&image_page(1), &mut |_| {}).unwrap();
        engine.recognize(&image_page(2), &mut |_| {}).unwrap();

        assert!(result.success);
        assert_eq!(result.text, "text");
        assert_eq!(result.confidence, 88.0);
        assert_eq!(counts.init.load(Ordering::SeqCst), 1);
        assert!(engine.is_initialized());
    }

    #[test]
    fn test_init_failure_is_sticky() {
        let counts = Arc::new(Counts::default());
        let mut backend = FakeBackend::new(&counts);
        backend.init_error = Some("hin");
        let mut engine = RecognitionEngine::new(backend);

        let first = engine.recognize(&image_page(1), &mut |_| {});
        let second = engine.recognize(&image_page(2), &mut |_| {});

        assert!(matches!(first, Err(EngineError::InitializationFailed(_))));
        assert_eq!(first, second);
        assert_eq!(counts.init.load(Ordering::SeqCst), 1);
        assert_eq!(counts.recognize.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsupported_media_does_not_initialize() {
        let counts = Arc::new(Counts::default());
        let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
        let page = Page::new(1, b"doc".to_vec(), "application/msword");

        let result = engine.recognize(&page, &mut |_| {}).unwrap();

        assert!(!result.success);
        assert_eq!(result.confidence, 0.0);
        assert!(result.error.unwrap().contains("application/msword"));
        assert_eq!(counts.init.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_page_failure_is_captured() {
        let counts = Arc::new(Counts::default());
        let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
        let page = Page::new(1, b"%PDF".to_vec(), "application/pdf").with_pdf_page(3);

        let result = engine.recognize(&page, &mut |_| {}).unwrap();

        assert!(!result.success);
        assert!(result.error.unwrap().contains("page 3"));
    }

    #[test]
    fn test_shutdown_before_use_is_noop() {
        let counts = Arc::new(Counts::default());
        let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
        engine.shutdown();
        engine.shutdown();
        assert_eq!(counts.terminate.load(Ordering::SeqCst), 0);
        assert_eq!(
            engine.recognize(&image_page(1), &mut |_| {}),
            Err(EngineError::ShutDown)
        );
    }

    #[test]
    fn test_shutdown_terminates_once() {
        let counts = Arc::new(Counts::default());
        {
            let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
            engine.init().unwrap();
            engine.shutdown();
        }
        assert_eq!(counts.terminate.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_terminates_initialized_engine() {
        let counts = Arc::new(Counts::default());
        {
            let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
            engine.init().unwrap();
        }
        assert_eq!(counts.terminate.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shutdown_handle_is_shared() {
        let counts = Arc::new(Counts::default());
        let mut engine = RecognitionEngine::new(FakeBackend::new(&counts));
        let handle = engine.shutdown_handle();
        handle.request();
        assert!(engine.shutdown_requested());
        assert_eq!(
            engine.recognize(&image_page(1), &mut |_| {}),
            Err(EngineError::ShutDown)
        );
    }
}
