// (C) Coralbits SL 2025
// This file is part of Scrapbox and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use async_trait::async_trait;
use image::DynamicImage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::pages::endpoints::{get_endpoint, icon_endpoint, list_endpoint, text_endpoint};
use crate::pages::icon::{decode_icon, IconFormat};
use crate::pages::traits::PageOperations;
use crate::pages::types::{ListOptions, Page, PageListResult};
use crate::{Client, Result};

/// Handles the page related methods of the Scrapbox API.
pub struct PagesService<'a> {
    client: &'a Client,
}

impl<'a> PagesService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    async fn request_bytes(
        &self,
        ctx: &CancellationToken,
        operation: &'static str,
        endpoint: &str,
    ) -> Result<(String, Vec<u8>)> {
        let request = self
            .client
            .get_request(endpoint)
            .map_err(|e| e.context(operation, endpoint))?;
        let url = request.url().to_string();
        let bytes = self
            .client
            .fetch_bytes(ctx, request)
            .await
            .map_err(|e| e.context(operation, url.as_str()))?;
        Ok((url, bytes))
    }
}

#[async_trait]
impl PageOperations for PagesService<'_> {
    #[instrument(skip(self, ctx))]
    async fn list(
        &self,
        ctx: &CancellationToken,
        project: &str,
        options: Option<&ListOptions>,
    ) -> Result<PageListResult> {
        const OPERATION: &str = "PagesService.ListByProject";
        let endpoint = list_endpoint(project, options);
        let request = self
            .client
            .get_request(&endpoint)
            .map_err(|e| e.context(OPERATION, endpoint.as_str()))?;
        let url = request.url().to_string();
        let result: PageListResult = self
            .client
            .fetch_json(ctx, request)
            .await
            .map_err(|e| e.context(OPERATION, url.as_str()))?;
        debug!(
            "Listed project={} count={} returned={}",
            project,
            result.count,
            result.pages.len()
        );
        Ok(result)
    }

    #[instrument(skip(self, ctx))]
    async fn get(&self, ctx: &CancellationToken, project: &str, title: &str) -> Result<Page> {
        const OPERATION: &str = "PagesService.Get";
        let endpoint = get_endpoint(project, title);
        let request = self
            .client
            .get_request(&endpoint)
            .map_err(|e| e.context(OPERATION, endpoint.as_str()))?;
        let url = request.url().to_string();
        self.client
            .fetch_json(ctx, request)
            .await
            .map_err(|e| e.context(OPERATION, url.as_str()))
    }

    #[instrument(skip(self, ctx))]
    async fn get_text(
        &self,
        ctx: &CancellationToken,
        project: &str,
        title: &str,
    ) -> Result<String> {
        let endpoint = text_endpoint(project, title);
        let (_, bytes) = self
            .request_bytes(ctx, "PagesService.GetText", &endpoint)
            .await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    #[instrument(skip(self, ctx))]
    async fn get_icon(
        &self,
        ctx: &CancellationToken,
        project: &str,
        title: &str,
    ) -> Result<(DynamicImage, IconFormat)> {
        const OPERATION: &str = "PagesService.GetIcon";
        let endpoint = icon_endpoint(project, title);
        let (url, bytes) = self.request_bytes(ctx, OPERATION, &endpoint).await?;
        let (icon, format) =
            decode_icon(&url, &bytes).map_err(|e| e.context(OPERATION, url.as_str()))?;
        debug!(
            "Decoded icon format={} size={}x{}",
            format,
            icon.width(),
            icon.height()
        );
        Ok((icon, format))
    }
}
