pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::report::{self, Section};
use crate::core::config::AppConfig;
use crate::core::pipeline;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Report,
    Items,
    Dust,
    Recipes,
}

impl AppCommand {
    fn sections(&self) -> &'static [Section] {
        match self {
            AppCommand::Report => &Section::ALL,
            AppCommand::Items => &[Section::CheapestItems],
            AppCommand::Dust => &[Section::BestDustValue],
            AppCommand::Recipes => &[Section::ProfitableRecipes],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Discard today's cached pages and fetch again.
    pub refresh: bool,
    /// Overrides the configured display count.
    pub top_n: Option<usize>,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: RunOptions,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    run_with_config(command, &config, &options, Local::now().date_naive()).await
}

/// Runs the whole pipeline for the cache day `date` and prints the requested sections.
pub async fn run_with_config(
    command: AppCommand,
    config: &AppConfig,
    options: &RunOptions,
    date: NaiveDate,
) -> Result<()> {
    info!("cardcraft starting for {}", date);

    let top_n = options.top_n.unwrap_or(config.top_n);
    if top_n == 0 {
        anyhow::bail!("top must be at least 1");
    }

    let source = providers::RomExchangeProvider::new(&config.providers.rom_exchange.base_url)?;

    let pb = cli::ui::new_spinner("Loading prices...");
    let pages = pipeline::load_pages(config, &source, date, options.refresh, &|index| {
        pb.set_message(format!("Fetched page: {index}"))
    })
    .await;
    pb.finish_and_clear();

    let analysis = pipeline::analyze(config, &pages?)?;
    report::run(command.sections(), &analysis, top_n);
    Ok(())
}
