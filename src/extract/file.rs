//! Local-file extraction.
//!
//! Plain-text sources are read directly. Binary document formats (PDF, DOCX, PPTX) are
//! reported as unsupported; their parsing internals are out of scope for this crate, and the
//! batch treats the error as a per-input skip.

use crate::extract::types::{ExtractedContent, ExtractionError};
use std::path::Path;

const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Extract text content from a local file.
pub fn extract_from_file(path: &str) -> Result<ExtractedContent, ExtractionError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ExtractionError::UnsupportedFormat(path.to_string()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| ExtractionError::Io {
        path: path.to_string(),
        source,
    })?;

    Ok(ExtractedContent {
        title: None,
        text,
        images: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_plain_text_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("temp file");
        write!(file, "Session notes body.").expect("write");

        let content = extract_from_file(file.path().to_str().expect("utf-8 path"))
            .expect("extraction succeeds");
        assert_eq!(content.text, "Session notes body.");
        assert!(content.images.is_empty());
    }

    #[test]
    fn rejects_binary_document_formats() {
        let error = extract_from_file("slides.pptx").expect_err("unsupported");
        assert!(matches!(error, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = extract_from_file("/no/such/notes.txt").expect_err("missing");
        assert!(matches!(error, ExtractionError::Io { .. }));
    }
}
