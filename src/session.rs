//! One image, one set of options, one run at a time.

use crate::client::GeminiClient;
use crate::error::{Error, Result};
use crate::options::ProcessingOptions;
use crate::payload::ImagePayload;
use crate::simulated_detection::{DetectionScores, SimulatedDetector};
use crate::status::ProcessingStatus;

/// Message used when a failure carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to process image. The AI model might be busy.";

/// State for a single humanize workflow.
///
/// `run` takes `&mut self`, so at most one request is in flight per session.
#[derive(Debug)]
pub struct HumanizeSession {
    client: GeminiClient,
    detector: SimulatedDetector,
    options: ProcessingOptions,
    status: ProcessingStatus,
    source: Option<ImagePayload>,
    result: Option<ImagePayload>,
    scores: DetectionScores,
    error: Option<String>,
}

impl HumanizeSession {
    /// New idle session with default options.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self::with_detector(client, SimulatedDetector::new())
    }

    /// New idle session using the given score source.
    #[must_use]
    pub fn with_detector(client: GeminiClient, detector: SimulatedDetector) -> Self {
        Self {
            client,
            detector,
            options: ProcessingOptions::default(),
            status: ProcessingStatus::Idle,
            source: None,
            result: None,
            scores: DetectionScores::default(),
            error: None,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// Options for the next run.
    #[must_use]
    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Replace the options used by the next run.
    pub fn set_options(&mut self, options: ProcessingOptions) {
        self.options = options;
    }

    /// The loaded image, if any.
    #[must_use]
    pub fn source(&self) -> Option<&ImagePayload> {
        self.source.as_ref()
    }

    /// The last successful result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&ImagePayload> {
        self.result.as_ref()
    }

    /// Simulated before/after figures.
    #[must_use]
    pub fn scores(&self) -> DetectionScores {
        self.scores
    }

    /// Message from the last failed run.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load a new image, clearing any previous result or error.
    pub fn load(&mut self, image: ImagePayload) {
        self.status = ProcessingStatus::Idle;
        self.result = None;
        self.error = None;
        self.scores = DetectionScores {
            before: self.detector.before_score(),
            after: 0.0,
        };
        self.source = Some(image);
    }

    /// Run the loaded image through the model.
    ///
    /// Waits the configured analysis delay before sending the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImageLoaded`] without changing state if nothing is
    /// loaded; otherwise any error from the request, after recording it and
    /// moving to [`ProcessingStatus::Error`].
    pub async fn run(&mut self) -> Result<&ImagePayload> {
        let Some(source) = self.source.clone() else {
            return Err(Error::NoImageLoaded);
        };

        self.status = self.status.transition(ProcessingStatus::Analyzing)?;
        self.error = None;
        tracing::debug!(status = %self.status, "run started");

        let delay = self.client.config().analysis_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.status = self.status.transition(ProcessingStatus::Processing)?;
        tracing::debug!(status = %self.status, "sending request");

        let outcome = self.client.humanize(&source, &self.options).await;
        match outcome {
            Ok(result) => {
                self.scores.after = self.detector.after_score();
                self.status = self.status.transition(ProcessingStatus::Completed)?;
                tracing::info!(status = %self.status, "run completed");
                Ok(self.result.insert(result))
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                });
                self.status = self.status.transition(ProcessingStatus::Error)?;
                tracing::error!(error = %e, "run failed");
                Err(e)
            }
        }
    }
}
