//! Cache-or-fetch of today's pages and the full analysis over them

use super::config::AppConfig;
use super::item::PriceCatalog;
use super::page::{Page, PageSource};
use super::profit::ProfitEngine;
use super::recipe::Recipe;
use super::{dust, recipe};
use crate::store::DailyCache;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Everything the reports need from one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub catalog: PriceCatalog,
    pub unit_dust_price: Option<f64>,
    pub recipes: Vec<Recipe>,
}

/// Requests pages `0, 1, 2, ...` until one comes back empty, persisting each
/// non-empty page before asking for the next. Fails on the first error, or
/// when `max_pages` non-empty pages have arrived and the listing continues.
/// A listing cut off by the ceiling leaves nothing cached for `date`.
pub async fn fetch_all(
    source: &dyn PageSource,
    cache: &DailyCache,
    date: NaiveDate,
    max_pages: u32,
    on_page: &dyn Fn(u32),
) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    let mut index = 0;
    loop {
        let page = source.fetch_page(index).await?;
        if page.is_empty() {
            debug!("Page {} is empty, listing complete", index);
            break;
        }
        if index >= max_pages {
            cache.clear(date)?;
            bail!("Listing did not end within {max_pages} pages");
        }
        cache.write_page(date, index, &page)?;
        pages.push(page);
        on_page(index);
        index += 1;
    }
    info!("Fetched {} pages", pages.len());
    Ok(pages)
}

/// Returns the pages for `date`, from the cache when it already holds any,
/// otherwise from `source`. `refresh` discards the cached day first.
pub async fn load_pages(
    config: &AppConfig,
    source: &dyn PageSource,
    date: NaiveDate,
    refresh: bool,
    on_page: &dyn Fn(u32),
) -> Result<Vec<Page>> {
    let cache = DailyCache::new(&config.cache_dir);
    if refresh {
        cache.clear(date)?;
    }
    if cache.has_cache(date) {
        info!("Using cached pages for {}", date);
        return cache.read_all_pages(date);
    }
    info!("No cache for {}, fetching from remote", date);
    fetch_all(source, &cache, date, config.max_pages, on_page).await
}

/// Builds the catalog, merges dust yields and prices every recipe.
pub fn analyze(config: &AppConfig, pages: &[Page]) -> Result<Analysis> {
    let mut catalog = PriceCatalog::from_pages(pages);
    catalog.apply_dust_yields(&dust::load(&config.dust_table)?);

    let unit_dust_price = ProfitEngine::price_one_dust(&catalog);
    debug!(?unit_dust_price, "Priced one dust");

    let engine = ProfitEngine::new(config.sale_tax)?;
    let mut recipes: Vec<Recipe> = recipe::load(&config.recipe_table)?
        .into_values()
        .collect();
    engine.evaluate_all(recipes.iter_mut(), &catalog, unit_dust_price);

    Ok(Analysis {
        catalog,
        unit_dust_price,
        recipes,
    })
}
