//! Data types and errors shared by the extraction collaborators.

use thiserror::Error;

/// Text and image content recovered from one input source.
#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    /// Document or page title, when the source exposes one.
    pub title: Option<String>,
    /// Plain text recovered from the source.
    pub text: String,
    /// Images discovered in the source, in encounter order.
    pub images: Vec<ExtractedImage>,
}

impl ExtractedContent {
    /// Recognized text entries from all images, skipping empties.
    pub fn recognized_texts(&self) -> Vec<String> {
        self.images
            .iter()
            .filter_map(|image| image.recognized_text.as_deref())
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One image discovered during extraction.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    /// Stable identifier within the source (index, relationship id, ...).
    pub identifier: String,
    /// Resolved image URL for web sources.
    pub url: Option<String>,
    /// Alt text or recognized text associated with the image.
    pub recognized_text: Option<String>,
    /// Raw image bytes, when downloaded.
    pub bytes: Vec<u8>,
}

/// Errors raised by the extraction collaborators.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The input matches no supported format.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
    /// Reading a local file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// Fetching a remote resource failed.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// URL that could not be fetched.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The remote resource answered with an error status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        /// URL that was fetched.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },
    /// The Google Workspace URL could not be interpreted.
    #[error("Unrecognized Google Workspace URL: {0}")]
    GoogleUrl(String),
}
