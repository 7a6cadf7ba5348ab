//! Salvage yields per item, loaded from the dust table

use super::table::{data_lines, read_table};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Loads `name,dustYield` rows from `path`.
pub fn load(path: &Path) -> Result<HashMap<String, u32>> {
    let text = read_table(path)?;
    parse(&text).with_context(|| format!("Invalid dust table: {}", path.display()))
}

/// Rows with an empty yield column are skipped; a non-integer yield is an error.
pub fn parse(text: &str) -> Result<HashMap<String, u32>> {
    let mut yields = HashMap::new();
    for (line_no, line) in data_lines(text) {
        let mut fields = line.split(',');
        let name = fields.next().unwrap_or_default().trim();
        let raw_yield = fields.next().unwrap_or_default().trim();
        if raw_yield.is_empty() {
            debug!("No dust yield for {} on line {}", name, line_no);
            continue;
        }
        let dust_yield: u32 = raw_yield
            .parse()
            .with_context(|| format!("Line {line_no}: invalid dust yield '{raw_yield}'"))?;
        yields.insert(name.to_string(), dust_yield);
    }
    Ok(yields)
}
