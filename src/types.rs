// (C) Coralbits SL 2025
// This file is part of Scrapbox and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapboxError>;

#[derive(Error, Debug)]
pub enum ScrapboxError {
    #[error("BaseURL must have a trailing slash, but {url:?} does not")]
    InvalidBaseUrl { url: String },
    #[error("failed to build request for {path}: {message}")]
    RequestConstruction { path: String, message: String },
    #[error("request to {url} was cancelled")]
    Cancelled { url: String },
    #[error("failed to http request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("not found: {url}")]
    NotFound { url: String },
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },
    #[error("failed to decode http response body from {url} to json: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode icon from {url}: {message}")]
    ImageDecode { url: String, message: String },
    #[error("{operation} failed for {url}: {source}")]
    Operation {
        operation: &'static str,
        url: String,
        #[source]
        source: Box<ScrapboxError>,
    },
}

impl ScrapboxError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ScrapboxError::InvalidBaseUrl { .. } => "INVALID_BASE_URL",
            ScrapboxError::RequestConstruction { .. } => "REQUEST_CONSTRUCTION",
            ScrapboxError::Cancelled { .. } => "CANCELLED",
            ScrapboxError::Transport { .. } => "TRANSPORT_ERROR",
            ScrapboxError::NotFound { .. } => "NOT_FOUND",
            ScrapboxError::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            ScrapboxError::Decode { .. } => "DECODE_ERROR",
            ScrapboxError::ImageDecode { .. } => "IMAGE_DECODE_ERROR",
            ScrapboxError::Operation { source, .. } => source.error_code(),
        }
    }

    /// Wraps the error with the accessor operation and the url it was run against.
    pub fn context(self, operation: &'static str, url: impl Into<String>) -> Self {
        ScrapboxError::Operation {
            operation,
            url: url.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any operation wrappers.
    pub fn root(&self) -> &ScrapboxError {
        match self {
            ScrapboxError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), ScrapboxError::Cancelled { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), ScrapboxError::NotFound { .. })
    }
}
