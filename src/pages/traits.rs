use async_trait::async_trait;
use image::DynamicImage;
use tokio_util::sync::CancellationToken;

use crate::pages::types::{ListOptions, Page, PageListResult};
use crate::pages::IconFormat;
use crate::Result;

/// Read operations on the pages of a project
#[async_trait]
pub trait PageOperations {
    /// List one page of results, with the pagination echo
    async fn list(
        &self,
        ctx: &CancellationToken,
        project: &str,
        options: Option<&ListOptions>,
    ) -> Result<PageListResult>;

    /// List pages of a project, in API ranking order
    async fn list_by_project(
        &self,
        ctx: &CancellationToken,
        project: &str,
        options: Option<&ListOptions>,
    ) -> Result<Vec<Page>> {
        Ok(self.list(ctx, project, options).await?.pages)
    }

    /// Get a single page
    async fn get(&self, ctx: &CancellationToken, project: &str, title: &str) -> Result<Page>;

    /// Get the raw text of a page
    async fn get_text(&self, ctx: &CancellationToken, project: &str, title: &str)
        -> Result<String>;

    /// Get and decode the icon of a page
    async fn get_icon(
        &self,
        ctx: &CancellationToken,
        project: &str,
        title: &str,
    ) -> Result<(DynamicImage, IconFormat)>;
}
