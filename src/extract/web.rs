//! Web-page extraction over plain HTTP.
//!
//! Pages are fetched with a short timeout, converted from HTML to readable text, and scanned
//! for images. Alt text stands in for recognized image text; a failed image download is a
//! per-image warning, never a page failure.

use crate::extract::google;
use crate::extract::types::{ExtractedContent, ExtractedImage, ExtractionError};
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Extractor for web pages and Google Workspace exports.
pub struct WebExtractor {
    http: Client,
}

impl Default for WebExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WebExtractor {
    /// Build the extractor with its HTTP client.
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("session-lens/extract")
            .build()
            .expect("Failed to construct reqwest::Client for extraction");
        Self { http }
    }

    /// Fetch a URL and recover its readable text and images.
    pub async fn extract_url(&self, url: &str) -> Result<ExtractedContent, ExtractionError> {
        tracing::info!(url, "Fetching page");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ExtractionError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ExtractionError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let base_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|source| ExtractionError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let title = extract_title(&html);
        let cleaned = strip_styles_and_scripts(&html);
        let text = html2md::parse_html(&cleaned, true);
        let images = self.collect_images(&html, &base_url).await;

        Ok(ExtractedContent {
            title,
            text,
            images,
        })
    }

    /// Extract a Google Workspace link through its plain-text export endpoint.
    pub async fn extract_google(&self, url: &str) -> Result<ExtractedContent, ExtractionError> {
        google::extract_from_google_url(&self.http, url).await
    }

    async fn collect_images(&self, html: &str, base_url: &Url) -> Vec<ExtractedImage> {
        let mut images = Vec::new();
        for (index, tag) in image_tags(html).into_iter().enumerate() {
            let Some(resolved) = resolve_image_url(base_url, &tag.src) else {
                continue;
            };

            let bytes = match self.download_image(&resolved).await {
                Ok(bytes) => bytes,
                Err(error) => {
                    tracing::warn!(url = %resolved, error = %error, "Failed to load image");
                    Vec::new()
                }
            };

            images.push(ExtractedImage {
                identifier: index.to_string(),
                url: Some(resolved.to_string()),
                recognized_text: tag.alt,
                bytes,
            });
        }
        images
    }

    async fn download_image(&self, url: &Url) -> Result<Vec<u8>, reqwest::Error> {
        let response = self
            .http
            .get(url.clone())
            .timeout(IMAGE_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

struct ImageTag {
    src: String,
    alt: Option<String>,
}

fn image_regex() -> &'static Regex {
    static IMAGE_RE: OnceLock<Regex> = OnceLock::new();
    IMAGE_RE.get_or_init(|| Regex::new(r"(?is)<img[^>]*>").expect("valid regex"))
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let pattern = format!(r#"(?is){name}\s*=\s*["']([^"']*)["']"#);
    let re = Regex::new(&pattern).expect("valid regex");
    re.captures(tag)
        .map(|captures| captures[1].trim().to_string())
}

fn image_tags(html: &str) -> Vec<ImageTag> {
    image_regex()
        .find_iter(html)
        .filter_map(|found| {
            let tag = found.as_str();
            let src = attribute(tag, "src")?;
            if src.is_empty() {
                return None;
            }
            let alt = attribute(tag, "alt").filter(|value| !value.is_empty());
            Some(ImageTag { src, alt })
        })
        .collect()
}

fn resolve_image_url(base_url: &Url, src: &str) -> Option<Url> {
    if src.starts_with("http://") || src.starts_with("https://") {
        return Url::parse(src).ok();
    }
    base_url.join(src).ok()
}

fn extract_title(html: &str) -> Option<String> {
    static TITLE_RE: OnceLock<Regex> = OnceLock::new();
    let re = TITLE_RE
        .get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));
    re.captures(html)
        .map(|captures| captures[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

fn strip_styles_and_scripts(html: &str) -> String {
    static STYLE_RE: OnceLock<Regex> = OnceLock::new();
    static SCRIPT_RE: OnceLock<Regex> = OnceLock::new();
    let style_re =
        STYLE_RE.get_or_init(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));
    let script_re = SCRIPT_RE
        .get_or_init(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));
    let without_styles = style_re.replace_all(html, "");
    script_re.replace_all(&without_styles, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_image_tags_with_alt_text() {
        let html = r#"<p>hi</p><img src="/a.png" alt="loss curve"><img alt="no src">"#;
        let tags = image_tags(html);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].src, "/a.png");
        assert_eq!(tags[0].alt.as_deref(), Some("loss curve"));
    }

    #[test]
    fn resolves_relative_image_urls() {
        let base = Url::parse("https://example.com/post/1").expect("url");
        let resolved = resolve_image_url(&base, "/img/a.png").expect("resolved");
        assert_eq!(resolved.as_str(), "https://example.com/img/a.png");

        let absolute = resolve_image_url(&base, "https://cdn.example.com/b.png").expect("abs");
        assert_eq!(absolute.as_str(), "https://cdn.example.com/b.png");
    }

    #[test]
    fn extracts_page_title() {
        let html = "<html><head><title> Intro to ML </title></head><body></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Intro to ML"));
        assert_eq!(extract_title("<html></html>"), None);
    }

    #[test]
    fn strips_styles_and_scripts() {
        let html = "<style>.a{}</style><p>keep</p><script>alert(1)</script>";
        let cleaned = strip_styles_and_scripts(html);
        assert!(cleaned.contains("<p>keep</p>"));
        assert!(!cleaned.contains("alert"));
        assert!(!cleaned.contains(".a{}"));
    }

    #[tokio::test]
    async fn extract_url_converts_html_to_text() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/post");
                then.status(200).body(
                    "<html><head><title>Post</title></head>\
                     <body><h1>Heading</h1><p>Body text.</p></body></html>",
                );
            })
            .await;

        let extractor = WebExtractor::new();
        let content = extractor
            .extract_url(&format!("{}/post", server.base_url()))
            .await
            .expect("extraction succeeds");

        assert_eq!(content.title.as_deref(), Some("Post"));
        assert!(content.text.contains("Heading"));
        assert!(content.text.contains("Body text."));
    }

    #[tokio::test]
    async fn extract_url_surfaces_http_errors() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/gone");
                then.status(404);
            })
            .await;

        let extractor = WebExtractor::new();
        let error = extractor
            .extract_url(&format!("{}/gone", server.base_url()))
            .await
            .expect_err("http error");
        assert!(matches!(
            error,
            ExtractionError::HttpStatus { status: 404, .. }
        ));
    }
}
