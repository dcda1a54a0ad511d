//! Error types for the truecapture crate.

use crate::status::ProcessingStatus;

/// Message shown when the model answers without an image part.
pub const NO_VISUAL_RESULT_MESSAGE: &str =
    "The AI processing failed to generate a visual result. Please try again with a different setting.";

/// Errors that can occur while preparing, submitting, or saving a humanize request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP transport failed (connection, TLS, body decoding).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status or an error object.
    #[error("Gemini API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider-supplied message, or the raw body when none was parsed.
        message: String,
    },

    /// The response contained no inline image part.
    #[error("{}", NO_VISUAL_RESULT_MESSAGE)]
    NoVisualResult,

    /// No API key was found in the environment.
    #[error("API key not set (export GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    /// Grain amount outside 0-100.
    #[error("grain amount {0} out of range (0-100)")]
    InvalidGrain(u32),

    /// An option name that does not match any known value.
    #[error("unknown {kind}: {value}")]
    InvalidOption {
        /// Which option was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The input file is not an image.
    #[error("Please upload an image file.")]
    NotAnImage,

    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A status change the state machine does not allow.
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: ProcessingStatus,
        /// Requested status.
        to: ProcessingStatus,
    },

    /// A run was requested before any image was loaded.
    #[error("no image loaded")]
    NoImageLoaded,

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred while decoding or encoding an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
