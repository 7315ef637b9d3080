//! Dataset loading.
//!
//! A [`DatasetSource`] produces one [`Dataset`] per call. The pipeline loads
//! exactly once per invocation; any failure aborts it before rendering.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use heatmap_common::{Dataset, HeatmapError, HeatmapResult};

/// Published monthly global land-surface temperature document.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Something that can produce the dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    async fn load(&self) -> HeatmapResult<Dataset>;
}

/// Fetches the dataset with a single HTTP GET.
pub struct UrlSource {
    url: String,
    client: Client,
}

impl UrlSource {
    /// Create a source for `url`. Without a timeout a stalled request waits
    /// indefinitely.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> HeatmapResult<Self> {
        let url = url.into();
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| HeatmapError::Fetch {
            url: url.clone(),
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_error(&self, err: reqwest::Error) -> HeatmapError {
        HeatmapError::Fetch {
            url: self.url.clone(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl DatasetSource for UrlSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn load(&self) -> HeatmapResult<Dataset> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HeatmapError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.fetch_error(e))?;
        debug!(bytes = body.len(), "dataset downloaded");

        let dataset = Dataset::from_slice(&body)?;
        info!(
            records = dataset.len(),
            base_temperature = dataset.base_temperature,
            "dataset loaded"
        );
        Ok(dataset)
    }
}

/// Reads the dataset from a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> HeatmapResult<Dataset> {
        let content = tokio::fs::read(&self.path).await?;
        let dataset = Dataset::from_slice(&content)?;
        info!(records = dataset.len(), "dataset loaded from file");
        Ok(dataset)
    }
}

/// Pick a source: a local file wins over a URL, the URL defaults to the
/// published document.
pub fn select_source(
    input: Option<&Path>,
    url: Option<&str>,
    timeout: Option<Duration>,
) -> HeatmapResult<Box<dyn DatasetSource>> {
    match input {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(UrlSource::new(
            url.unwrap_or(DEFAULT_SOURCE_URL),
            timeout,
        )?)),
    }
}
