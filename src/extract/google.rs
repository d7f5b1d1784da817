//! Google Workspace link handling.
//!
//! Docs, Sheets, and Slides links are resolved to their public export endpoints and fetched
//! as plain text, so no document-format parser is needed. The exported payload is spooled
//! through a temporary file that is removed when the extraction finishes, whether or not the
//! analysis succeeds.

use crate::extract::types::{ExtractedContent, ExtractionError};
use reqwest::Client;
use std::io::Write;
use url::Url;

/// Google Workspace services with a known export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleService {
    /// Google Docs documents.
    Docs,
    /// Google Sheets spreadsheets.
    Sheets,
    /// Google Slides presentations.
    Slides,
}

/// Identify which Google service a URL belongs to.
pub fn identify_service(url: &str) -> Option<GoogleService> {
    if url.contains("docs.google.com/document") {
        Some(GoogleService::Docs)
    } else if url.contains("docs.google.com/spreadsheets") {
        Some(GoogleService::Sheets)
    } else if url.contains("docs.google.com/presentation") {
        Some(GoogleService::Slides)
    } else {
        None
    }
}

/// Extract the document identifier from a Google Workspace URL.
///
/// Handles both the `/d/{id}/` path form and the `?id=` query form.
pub fn extract_doc_id(url: &str) -> Option<String> {
    if let Some((_, rest)) = url.split_once("/d/") {
        let id = rest.split('/').next().unwrap_or(rest);
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Build the plain-text export URL for a document.
pub fn build_export_url(service: GoogleService, doc_id: &str) -> String {
    match service {
        GoogleService::Docs => {
            format!("https://docs.google.com/document/d/{doc_id}/export?format=txt")
        }
        GoogleService::Sheets => {
            format!("https://docs.google.com/spreadsheets/d/{doc_id}/export?format=csv")
        }
        GoogleService::Slides => {
            format!("https://docs.google.com/presentation/d/{doc_id}/export/txt")
        }
    }
}

/// Resolve a Google Workspace link to its export endpoint and fetch its text.
pub async fn extract_from_google_url(
    http: &Client,
    url: &str,
) -> Result<ExtractedContent, ExtractionError> {
    let service =
        identify_service(url).ok_or_else(|| ExtractionError::GoogleUrl(url.to_string()))?;
    let doc_id = extract_doc_id(url).ok_or_else(|| ExtractionError::GoogleUrl(url.to_string()))?;
    let export_url = build_export_url(service, &doc_id);
    tracing::info!(service = ?service, doc_id = %doc_id, "Downloading Google Workspace export");

    let response = http
        .get(&export_url)
        .send()
        .await
        .map_err(|source| ExtractionError::Fetch {
            url: export_url.clone(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(ExtractionError::HttpStatus {
            url: export_url,
            status: response.status().as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| ExtractionError::Fetch {
            url: export_url.clone(),
            source,
        })?;

    let text = spool_export(&bytes, &export_url)?;

    Ok(ExtractedContent {
        title: None,
        text,
        images: Vec::new(),
    })
}

/// Write the exported payload to a temporary file and read it back as UTF-8 text.
///
/// The temporary file is deleted when it drops, including on the error paths.
fn spool_export(bytes: &[u8], export_url: &str) -> Result<String, ExtractionError> {
    let io_error = |source| ExtractionError::Io {
        path: export_url.to_string(),
        source,
    };

    let mut spool = tempfile::NamedTempFile::new().map_err(io_error)?;
    spool.write_all(bytes).map_err(io_error)?;
    std::fs::read_to_string(spool.path()).map_err(io_error)
}
