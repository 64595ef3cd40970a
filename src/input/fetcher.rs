//! Fetching a document by locator and turning it into plain text
//!
//! Every failure is reported as a [`FetchOutcome::Failed`] value; nothing here returns an
//! error to the caller once the fetcher is built.

use crate::config::FetchConfig;
use crate::error::{Result, SkillMatchError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use reqwest::{Client, Url};
use std::fmt;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Text(String),
    Failed(FetchFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    MissingLocator,
    InvalidLocator(String),
    UnsupportedScheme(String),
    Timeout(Duration),
    Network(String),
    Io(String),
    Status(u16),
    TooLarge { limit: usize },
    Extraction(String),
}

impl FetchOutcome {
    /// The extracted text, or empty text for any failure
    pub fn into_text(self) -> String {
        match self {
            FetchOutcome::Text(text) => text,
            FetchOutcome::Failed(_) => String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::MissingLocator => write!(f, "no document locator"),
            FetchFailure::InvalidLocator(reason) => write!(f, "invalid locator: {}", reason),
            FetchFailure::UnsupportedScheme(scheme) => write!(f, "unsupported scheme '{}'", scheme),
            FetchFailure::Timeout(limit) => write!(f, "timed out after {:?}", limit),
            FetchFailure::Network(reason) => write!(f, "network error: {}", reason),
            FetchFailure::Io(reason) => write!(f, "could not read document: {}", reason),
            FetchFailure::Status(code) => write!(f, "server responded with status {}", code),
            FetchFailure::TooLarge { limit } => write!(f, "document exceeds {} bytes", limit),
            FetchFailure::Extraction(reason) => write!(f, "text extraction failed: {}", reason),
        }
    }
}

/// Anything that can resolve a document locator to text.
pub trait DocumentSource {
    fn fetch(&self, locator: Option<&str>) -> impl Future<Output = FetchOutcome> + Send;

    fn fetch_text(&self, locator: Option<&str>) -> impl Future<Output = String> + Send
    where
        Self: Sync,
    {
        async move { self.fetch(locator).await.into_text() }
    }
}

/// HTTP(S) and `file://` document fetcher with a hard timeout and size cap.
#[derive(Debug, Clone)]
pub struct HttpDocumentFetcher {
    client: Client,
    timeout: Duration,
    max_bytes: usize,
}

impl HttpDocumentFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.timeout())
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| SkillMatchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout(),
            max_bytes: config.max_document_bytes,
        })
    }

    async fn fetch_url(&self, url: Url) -> FetchOutcome {
        let (bytes, file_type) = match url.scheme() {
            "http" | "https" => match self.download(&url).await {
                Ok(fetched) => fetched,
                Err(failure) => return FetchOutcome::Failed(failure),
            },
            "file" => match self.read_local(&url).await {
                Ok(fetched) => fetched,
                Err(failure) => return FetchOutcome::Failed(failure),
            },
            other => return FetchOutcome::Failed(FetchFailure::UnsupportedScheme(other.to_string())),
        };

        debug!("Fetched {} bytes from {} as {:?}", bytes.len(), url, file_type);
        extract_text(bytes, file_type).await
    }

    async fn download(&self, url: &Url) -> std::result::Result<(Vec<u8>, FileType), FetchFailure> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        if response.content_length().is_some_and(|len| len > self.max_bytes as u64) {
            return Err(FetchFailure::TooLarge { limit: self.max_bytes });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchFailure::Network(e.to_string()))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchFailure::TooLarge { limit: self.max_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        Ok((body, FileType::detect(content_type.as_deref(), url.path())))
    }

    async fn read_local(&self, url: &Url) -> std::result::Result<(Vec<u8>, FileType), FetchFailure> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchFailure::InvalidLocator(format!("not a local file path: {}", url)))?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| FetchFailure::Io(e.to_string()))?;
        if metadata.len() > self.max_bytes as u64 {
            return Err(FetchFailure::TooLarge { limit: self.max_bytes });
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| FetchFailure::Io(e.to_string()))?;

        Ok((bytes, FileType::detect(None, &path.to_string_lossy())))
    }
}

impl DocumentSource for HttpDocumentFetcher {
    async fn fetch(&self, locator: Option<&str>) -> FetchOutcome {
        let Some(locator) = locator.map(str::trim).filter(|l| !l.is_empty()) else {
            return FetchOutcome::Failed(FetchFailure::MissingLocator);
        };

        let url = match Url::parse(locator) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Failed(FetchFailure::InvalidLocator(e.to_string())),
        };

        info!("Fetching document: {}", url);
        match tokio::time::timeout(self.timeout, self.fetch_url(url)).await {
            Ok(outcome) => outcome,
            Err(_) => FetchOutcome::Failed(FetchFailure::Timeout(self.timeout)),
        }
    }
}

/// PDF parsing runs on the blocking pool so a slow or panicking parser cannot stall the runtime.
async fn extract_text(bytes: Vec<u8>, file_type: FileType) -> FetchOutcome {
    let extracted = match file_type {
        FileType::Pdf | FileType::Unknown => {
            match tokio::task::spawn_blocking(move || PdfExtractor.extract(&bytes)).await {
                Ok(result) => result,
                Err(e) => return FetchOutcome::Failed(FetchFailure::Extraction(format!("PDF parser aborted: {}", e))),
            }
        }
        FileType::Text => PlainTextExtractor.extract(&bytes),
        FileType::Markdown => MarkdownExtractor.extract(&bytes),
    };

    match extracted {
        Ok(text) => FetchOutcome::Text(text),
        Err(e) => FetchOutcome::Failed(FetchFailure::Extraction(e.to_string())),
    }
}
