//! Re-render AI-generated images as natural-looking photographs.
//!
//! The crate builds a photographic instruction from a few cosmetic options,
//! sends it with the image to the Gemini image model, and returns the first
//! image the model answers with.
//!
//! # Quick Start
//!
//! ```no_run
//! use truecapture::{GeminiClient, ImagePayload, Preset};
//!
//! # async fn run() -> truecapture::Result<()> {
//! let client = GeminiClient::from_env()?;
//! let image = ImagePayload::from_file("render.png".as_ref())?;
//! let result = client.humanize(&image, &Preset::Balanced.options()).await?;
//! result.save("photo.jpg".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Prompt only
//!
//! ```
//! use truecapture::{build_prompt, CameraProfile, ProcessingOptions, RealismLevel};
//!
//! let opts = ProcessingOptions::new(RealismLevel::Ultra, CameraProfile::Film, 80).unwrap();
//! let prompt = build_prompt(&opts);
//! assert!(prompt.contains("Kodak Portra 400"));
//! assert!(prompt.contains("heavy natural film grain"));
//! ```
//!
//! # Detection scores
//!
//! The before/after "AI detection" figures in [`simulated_detection`] are
//! random numbers for display. There is no detector.

#![deny(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod payload;
pub mod prompt;
pub mod session;
pub mod simulated_detection;
pub mod status;

pub use client::{extract_result, GeminiClient, GenerateContentResponse};
pub use config::Config;
pub use error::{Error, Result};
pub use options::{CameraProfile, Preset, ProcessingOptions, RealismLevel};
pub use payload::{default_output_path, download_file_name, strip_data_uri, ImagePayload};
pub use prompt::{build_prompt, GrainIntensity};
pub use session::HumanizeSession;
pub use simulated_detection::{DetectionScores, SimulatedDetector};
pub use status::{ProcessingStatus, ProcessingStep};
