//! Changelog sources

use std::path::{Path, PathBuf};

/// Raw changelog of the Claude Code repository
pub const DEFAULT_CHANGELOG_URL: &str =
    "https://raw.githubusercontent.com/anthropics/claude-code/main/CHANGELOG.md";

/// Errors fetching the changelog
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("failed to fetch changelog: HTTP {status}")]
    Status { status: u16 },

    /// The request never produced a response
    #[error("failed to fetch changelog: {0}")]
    Transport(#[from] reqwest::Error),

    /// A local changelog could not be read
    #[error("failed to read changelog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that yields the current changelog text
#[async_trait::async_trait]
pub trait ChangelogSource: Send + Sync {
    /// Fetch the full document
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Where the document comes from, for logging
    fn describe(&self) -> String;
}

/// Fetches the changelog over HTTP
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for the given URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGELOG_URL)
    }
}

#[async_trait::async_trait]
impl ChangelogSource for HttpSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the changelog from a local file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ChangelogSource for FileSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
