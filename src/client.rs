// (C) Coralbits SL 2025
// This file is part of Scrapbox and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::time::Duration;

use reqwest::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::{pages::PagesService, Config, Result, ScrapboxError};

pub const DEFAULT_BASE_URL: &str = "https://scrapbox.io/";

/// Bytes read from a discarded error body before the connection is dropped.
const DRAIN_LIMIT: usize = 512;

/// Manages communication with the Scrapbox API.
///
/// Holds only immutable state: the base URL and the reqwest connection pool.
/// Cloning is cheap and clones share the pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client({})", self.base_url)
    }
}

impl Client {
    /// A client against the production API using a default reqwest client.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Relative request paths are resolved against `base_url`, which must
    /// end with a `/`.
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let invalid = || ScrapboxError::InvalidBaseUrl {
            url: base_url.to_string(),
        };
        if !base_url.ends_with('/') {
            return Err(invalid());
        }
        let parsed = Url::parse(base_url).map_err(|_| invalid())?;
        if parsed.cannot_be_a_base() || !parsed.path().ends_with('/') {
            return Err(invalid());
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let http = builder
            .build()
            .map_err(|e| ScrapboxError::RequestConstruction {
                path: config.base_url.clone(),
                message: format!("failed to build http client: {}", e),
            })?;
        Self::with_http_client(http, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn pages(&self) -> PagesService<'_> {
        PagesService::new(self)
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ScrapboxError::RequestConstruction {
                path: path.to_string(),
                message: format!(
                    "failed to parse URL for http request. BaseURL: {}: {}",
                    self.base_url, e
                ),
            })
    }

    /// Creates an API request for `path`, resolved against the base URL.
    /// Paths should be given without a leading slash. A body, if given, is
    /// JSON encoded and sent as `application/json`.
    pub fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            let encoded =
                serde_json::to_vec(body).map_err(|e| ScrapboxError::RequestConstruction {
                    path: path.to_string(),
                    message: format!("failed to encode request body: {}", e),
                })?;
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(encoded);
        }
        builder
            .build()
            .map_err(|e| ScrapboxError::RequestConstruction {
                path: path.to_string(),
                message: format!("failed to create new http request: {}", e),
            })
    }

    pub fn get_request(&self, path: &str) -> Result<reqwest::Request> {
        self.build_request::<()>(Method::GET, path, None)
    }

    /// Sends the request and decodes the body as JSON. An empty body yields
    /// `T::default()`.
    pub async fn fetch_json<T>(
        &self,
        ctx: &CancellationToken,
        request: reqwest::Request,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = request.url().to_string();
        let body = self.execute(ctx, request).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty response body from url={}", url);
            return Ok(T::default());
        }
        serde_json::from_slice(&body).map_err(|source| ScrapboxError::Decode { url, source })
    }

    /// Sends the request and returns the raw body.
    pub async fn fetch_bytes(
        &self,
        ctx: &CancellationToken,
        request: reqwest::Request,
    ) -> Result<Vec<u8>> {
        self.execute(ctx, request).await
    }

    async fn execute(&self, ctx: &CancellationToken, request: reqwest::Request) -> Result<Vec<u8>> {
        let url = request.url().to_string();
        debug!("Sending {} request to url={}", request.method(), url);

        let response = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ScrapboxError::Cancelled { url }),
            res = self.http.execute(request) => match res {
                Ok(response) => response,
                // a send failing while the caller cancels is reported as the cancellation
                Err(_) if ctx.is_cancelled() => return Err(ScrapboxError::Cancelled { url }),
                Err(source) => return Err(ScrapboxError::Transport { url, source }),
            },
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Request to url={} returned status={}", url, status);
            tokio::select! {
                _ = ctx.cancelled() => {}
                _ = drain(response) => {}
            }
            return Err(if status == StatusCode::NOT_FOUND {
                ScrapboxError::NotFound { url }
            } else {
                ScrapboxError::UnexpectedStatus {
                    url,
                    status: status.as_u16(),
                }
            });
        }

        let body = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(ScrapboxError::Cancelled { url }),
            body = response.bytes() => match body {
                Ok(body) => body,
                Err(_) if ctx.is_cancelled() => return Err(ScrapboxError::Cancelled { url }),
                Err(source) => return Err(ScrapboxError::Transport { url, source }),
            },
        };
        debug!("Received status={} length={} from url={}", status, body.len(), url);
        Ok(body.to_vec())
    }
}

async fn drain(mut response: reqwest::Response) {
    let mut drained = 0;
    while drained < DRAIN_LIMIT {
        match response.chunk().await {
            Ok(Some(chunk)) => drained += chunk.len(),
            _ => break,
        }
    }
}
