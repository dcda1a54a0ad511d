//! Base64 image payloads, data URIs, and file intake/output.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};

/// MIME type attached to every result returned by the model.
pub const RESULT_MIME_TYPE: &str = "image/jpeg";

/// Prefix of downloaded result files.
pub const DOWNLOAD_PREFIX: &str = "truecapture_";

/// An encoded image: base64 text plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Base64 data without any data-URI prefix.
    pub data: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
}

/// Split a `data:<mime>;base64,` prefix off `input`.
///
/// Returns the MIME type (if a prefix was present) and the raw base64 part.
pub(crate) fn split_data_uri(input: &str) -> (Option<&str>, &str) {
    let Some(rest) = input.strip_prefix("data:") else {
        return (None, input);
    };
    match rest.split_once(";base64,") {
        Some((mime, data)) if !mime.is_empty() && !mime.contains(',') => (Some(mime), data),
        _ => (None, input),
    }
}

/// Return the raw base64 part of `input`, stripping a data-URI prefix if present.
#[must_use]
pub fn strip_data_uri(input: &str) -> &str {
    split_data_uri(input).1
}

impl ImagePayload {
    /// Create a payload from already-encoded base64 data.
    #[must_use]
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encode raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(STANDARD.encode(bytes), mime_type)
    }

    /// Parse a data URI, or accept a bare base64 string as JPEG.
    #[must_use]
    pub fn from_data_uri(input: &str) -> Self {
        let (mime, data) = split_data_uri(input.trim());
        Self::new(data, mime.unwrap_or(RESULT_MIME_TYPE))
    }

    /// Read an image file, sniffing its format from the content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::NotAnImage`] if the content is not a recognised image format.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let format = image::guess_format(&bytes).map_err(|_| Error::NotAnImage)?;
        tracing::debug!(path = %path.display(), ?format, size = bytes.len(), "loaded input image");
        Ok(Self::from_bytes(&bytes, format.to_mime_type()))
    }

    /// Format as `data:{mime};base64,{data}`.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the base64 data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Base64`] if the data is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.data.as_bytes())?)
    }

    /// Decode and write the image in the format implied by `path`.
    ///
    /// The parent directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not decode to an image, the
    /// extension is not a supported output format, or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.decode()?;
        let img = image::load_from_memory(&bytes)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        save_image(&img, path)
    }
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp"
        ),
        None => false,
    }
}

/// Save an image with format-specific quality settings.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, 100);
            encoder.encode_image(&DynamicImage::ImageRgb8(img.to_rgb8()))?;
        }
        ImageFormat::Png | ImageFormat::WebP => {
            img.save(path)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

/// File name for a downloaded result: `truecapture_{unix_millis}.jpg`.
#[must_use]
pub fn download_file_name(now: DateTime<Utc>) -> String {
    format!("{DOWNLOAD_PREFIX}{}.jpg", now.timestamp_millis())
}

/// Default output path: the download file name in the current directory.
#[must_use]
pub fn default_output_path() -> PathBuf {
    PathBuf::from(download_file_name(Utc::now()))
}
