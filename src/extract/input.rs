//! Classification of command-line inputs into extraction handlers.

use std::path::Path;

/// The handler responsible for one input argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A Google Docs/Sheets/Slides link, handled through the export endpoint.
    GoogleWorkspace,
    /// Any other http(s) URL, handled by the web extractor.
    Url,
    /// An existing local file.
    File,
    /// Nothing we know how to handle; skipped with a warning.
    Unsupported,
}

/// Classify one input argument.
///
/// URLs are recognized by scheme prefix; everything else is treated as a path and checked
/// against the filesystem.
pub fn classify(input: &str) -> InputKind {
    if input.starts_with("http://") || input.starts_with("https://") {
        if input.contains("docs.google.com") {
            return InputKind::GoogleWorkspace;
        }
        return InputKind::Url;
    }
    if Path::new(input).is_file() {
        return InputKind::File;
    }
    InputKind::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_google_workspace_links() {
        assert_eq!(
            classify("https://docs.google.com/document/d/abc123/edit"),
            InputKind::GoogleWorkspace
        );
        assert_eq!(
            classify("https://docs.google.com/spreadsheets/d/abc123/edit"),
            InputKind::GoogleWorkspace
        );
    }

    #[test]
    fn classifies_plain_urls() {
        assert_eq!(classify("https://example.com/post"), InputKind::Url);
        assert_eq!(classify("http://example.com"), InputKind::Url);
    }

    #[test]
    fn missing_paths_are_unsupported() {
        assert_eq!(
            classify("/definitely/not/a/real/path.txt"),
            InputKind::Unsupported
        );
        assert_eq!(classify("ftp://example.com/file"), InputKind::Unsupported);
    }
}
