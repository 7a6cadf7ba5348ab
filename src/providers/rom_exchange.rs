use crate::core::page::{Page, PageSource};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

/// Fixed listing filter: every card, fuzzy name match, slim records.
const LISTING_QUERY: &str = "item=card&exact=false&slim=true";

/// Paged card listings from the ROM exchange price index.
pub struct RomExchangeProvider {
    base_url: String,
    client: reqwest::Client,
}

impl RomExchangeProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("cardcraft/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}/api?{}&page={}", self.base_url, LISTING_QUERY, page)
    }
}

#[async_trait]
impl PageSource for RomExchangeProvider {
    async fn fetch_page(&self, page: u32) -> Result<Page> {
        let url = self.page_url(page);
        debug!("Requesting listing page from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request for page {page}"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for page {page}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "HTTP error: {} for page {}: {}",
                status,
                page,
                response_text
            ));
        }

        let records: Page = serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse JSON response for page {page}"))?;
        debug!("Page {} returned {} records", page, records.len());
        Ok(records)
    }
}
