//! Crafting recipes, loaded from the recipe table

use super::table::{data_lines, read_table};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

const DUST_TAG: char = '@';
const CURRENCY_TAG: char = '$';

/// Turns `inputs` plus dust and currency into one `output` item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recipe {
    pub output: String,
    /// Duplicates are allowed and each one is paid for.
    pub inputs: Vec<String>,
    pub dust_needed: u32,
    pub currency_needed: u64,
    pub cost: Option<f64>,
    pub profit: Option<f64>,
}

impl Recipe {
    /// Parses `output,field,...` where fields are item names, `@<dust>` or `$<currency>`.
    /// A repeated `@` or `$` field overwrites the earlier one.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.split(',').map(str::trim);
        let output = fields.next().unwrap_or_default().to_string();
        let mut recipe = Recipe {
            output,
            ..Recipe::default()
        };

        for field in fields.filter(|f| !f.is_empty()) {
            if let Some(dust) = field.strip_prefix(DUST_TAG) {
                recipe.dust_needed = dust
                    .parse()
                    .with_context(|| format!("Invalid dust amount '{field}'"))?;
            } else if let Some(currency) = field.strip_prefix(CURRENCY_TAG) {
                recipe.currency_needed = currency
                    .parse()
                    .with_context(|| format!("Invalid currency amount '{field}'"))?;
            } else {
                recipe.inputs.push(field.to_string());
            }
        }
        Ok(recipe)
    }

    /// Only recipes with a positive cost and profit are worth crafting.
    pub fn is_profitable(&self) -> bool {
        matches!((self.cost, self.profit), (Some(c), Some(p)) if c > 0.0 && p > 0.0)
    }
}

/// Recipes keyed by output name; a later row for the same output replaces the earlier one.
pub fn load(path: &Path) -> Result<BTreeMap<String, Recipe>> {
    let text = read_table(path)?;
    parse(&text).with_context(|| format!("Invalid recipe table: {}", path.display()))
}

pub fn parse(text: &str) -> Result<BTreeMap<String, Recipe>> {
    let mut recipes = BTreeMap::new();
    for (line_no, line) in data_lines(text) {
        let recipe = Recipe::parse(line).with_context(|| format!("Line {line_no}"))?;
        recipes.insert(recipe.output.clone(), recipe);
    }
    Ok(recipes)
}
