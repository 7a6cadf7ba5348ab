use crate::core::page::Page;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw pages partitioned by calendar day: `<root>/<YYYY-MM-DD>/<page>.json`.
///
/// A day directory holding at least one entry counts as a hit, whether or
/// not the fetch that wrote it ran to completion.
#[derive(Debug, Clone)]
pub struct DailyCache {
    root: PathBuf,
}

impl DailyCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn day_dir(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date.format("%Y-%m-%d").to_string())
    }

    pub fn has_cache(&self, date: NaiveDate) -> bool {
        let hit = fs::read_dir(self.day_dir(date))
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        debug!(%date, hit, "Daily cache lookup");
        hit
    }

    /// Creates the day directory if needed. An existing directory is fine,
    /// anything else that stops creation is an error.
    fn ensure_day_dir(&self, date: NaiveDate) -> Result<PathBuf> {
        let dir = self.day_dir(date);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory: {}", dir.display()))?;
        Ok(dir)
    }

    pub fn write_page(&self, date: NaiveDate, index: u32, page: &Page) -> Result<()> {
        let path = self.ensure_day_dir(date)?.join(format!("{index}.json"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create cache file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, page)
            .with_context(|| format!("Failed to write cache file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write cache file: {}", path.display()))?;
        debug!("Cache PUT page {} at {}", index, path.display());
        Ok(())
    }

    /// Every page stored for `date`, in directory traversal order.
    pub fn read_all_pages(&self, date: NaiveDate) -> Result<Vec<Page>> {
        let mut files = Vec::new();
        collect_files(&self.day_dir(date), &mut files)?;

        files
            .iter()
            .map(|path| {
                debug!("Cache HIT {}", path.display());
                let file = File::open(path)
                    .with_context(|| format!("Failed to open cache file: {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("Failed to parse cache file: {}", path.display()))
            })
            .collect()
    }

    /// Drops everything stored for `date` so the day can be fetched again.
    pub fn clear(&self, date: NaiveDate) -> Result<()> {
        let dir = self.day_dir(date);
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .with_context(|| format!("Failed to clear cache directory: {}", dir.display()))?;
            debug!("Cleared cache at {}", dir.display());
        }
        Ok(())
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read cache directory: {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
