//! Raw listing pages and the sources that produce them

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One page of listing records exactly as the remote index returned it.
pub type Page = Vec<Value>;

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the zero-based `page`. An empty page marks the end of the listing.
    async fn fetch_page(&self, page: u32) -> Result<Page>;
}
