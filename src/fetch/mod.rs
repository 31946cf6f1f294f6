//! Retrieval of the raw vehicle dataset text.
//!
//! [`HttpClient`] is the request seam over `reqwest`, [`TextSource`] the
//! seam the store loads from. [`DataSource`] picks HTTP or file access
//! from a configured location string.

mod basic;
mod client;
mod source;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use source::{DataSource, FileSource, HttpSource, TextSource};

use crate::error::LoadError;
use tracing::debug;

/// GETs `url` and returns the body as text.
///
/// # Errors
///
/// [`LoadError::Status`] when the server answers with a non-success status,
/// [`LoadError::Transport`] when no response arrives or the URL is invalid.
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String, LoadError> {
    let parsed: reqwest::Url = url
        .parse()
        .map_err(|e| LoadError::Transport(format!("invalid URL {url}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let text = resp.text().await?;
    debug!(url, bytes = text.len(), "Dataset body received");
    Ok(text)
}
