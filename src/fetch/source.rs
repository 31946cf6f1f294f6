use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::{BasicClient, HttpClient, fetch_text};
use crate::error::LoadError;

/// Yields the full dataset text from one fixed location.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String, LoadError>;

    /// Location shown in logs and exported reports.
    fn describe(&self) -> String;
}

/// Dataset served over HTTP(S).
pub struct HttpSource<C> {
    client: C,
    url: String,
}

impl<C: HttpClient> HttpSource<C> {
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> TextSource for HttpSource<C> {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        fetch_text(&self.client, &self.url).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Dataset stored on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextSource for FileSource {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Source chosen from a location string: `http://` and `https://` go over
/// the network, anything else is read as a file path.
pub enum DataSource {
    Http(HttpSource<BasicClient>),
    File(FileSource),
}

impl DataSource {
    pub fn from_location(location: &str) -> Result<Self, LoadError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let client = BasicClient::with_timeouts(Duration::from_secs(30), Duration::from_secs(10))?;
            Ok(Self::Http(HttpSource::new(client, location)))
        } else {
            Ok(Self::File(FileSource::new(location)))
        }
    }
}

#[async_trait]
impl TextSource for DataSource {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        match self {
            Self::Http(source) => source.fetch_text().await,
            Self::File(source) => source.fetch_text().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::File(source) => source.describe(),
        }
    }
}
