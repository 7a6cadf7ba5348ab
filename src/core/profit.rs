//! Dust pricing and recipe cost/profit derivation

use super::item::{Item, PriceCatalog};
use super::recipe::Recipe;
use anyhow::{Context, Result};
use rust_decimal::{Decimal, prelude::*};
use std::str::FromStr;
use tracing::debug;

pub struct ProfitEngine {
    sale_tax: Decimal,
}

impl ProfitEngine {
    pub fn new(sale_tax: f64) -> Result<Self> {
        // Shortest decimal form of the float, so 0.11 stays exactly 0.11
        let sale_tax = Decimal::from_str(&sale_tax.to_string())
            .with_context(|| format!("Sale tax is not representable: {sale_tax}"))?;
        Ok(Self { sale_tax })
    }

    /// Salvage-capable items ordered by ascending dust value, ties by name.
    pub fn cheapest_dust(catalog: &PriceCatalog) -> Vec<&Item> {
        let mut items: Vec<&Item> = catalog.items().filter(|i| i.is_salvageable()).collect();
        items.sort_by(|a, b| {
            a.dust_value
                .unwrap_or_default()
                .total_cmp(&b.dust_value.unwrap_or_default())
                .then_with(|| a.name.cmp(&b.name))
        });
        items
    }

    /// Market price of one unit of dust: the dust value of the single best
    /// salvage target. `None` when nothing in the catalog can be salvaged.
    pub fn price_one_dust(catalog: &PriceCatalog) -> Option<f64> {
        Self::cheapest_dust(catalog)
            .first()
            .and_then(|item| item.dust_value)
    }

    /// What a sale of `price` brings in after tax, rounded down.
    pub fn net_proceeds(&self, price: i64) -> i64 {
        let net = Decimal::from(price) * (Decimal::ONE - self.sale_tax);
        net.floor().to_i64().unwrap_or(i64::MAX)
    }

    /// Fills in `cost` and `profit`, or clears them when any referenced item
    /// has no price. Recipes needing dust stay unpriced without a dust price.
    pub fn cost_and_profit(
        &self,
        recipe: &mut Recipe,
        catalog: &PriceCatalog,
        unit_dust_price: Option<f64>,
    ) {
        recipe.cost = None;
        recipe.profit = None;

        let Some(output) = catalog.get(&recipe.output) else {
            debug!("No market price for recipe output: {}", recipe.output);
            return;
        };

        let mut inputs_cost: i64 = 0;
        for input in &recipe.inputs {
            match catalog.get(input) {
                Some(item) => inputs_cost += item.price,
                None => {
                    debug!(
                        "No market price for input {} of recipe {}",
                        input, recipe.output
                    );
                    return;
                }
            }
        }

        let dust_cost = match (recipe.dust_needed, unit_dust_price) {
            (0, _) => 0.0,
            (needed, Some(unit)) => unit * needed as f64,
            (_, None) => {
                debug!("No dust price available for recipe {}", recipe.output);
                return;
            }
        };

        let cost = inputs_cost as f64 + dust_cost + recipe.currency_needed as f64;
        recipe.cost = Some(cost);
        recipe.profit = Some(self.net_proceeds(output.price) as f64 - cost);
    }

    pub fn evaluate_all<'a>(
        &self,
        recipes: impl IntoIterator<Item = &'a mut Recipe>,
        catalog: &PriceCatalog,
        unit_dust_price: Option<f64>,
    ) {
        for recipe in recipes {
            self.cost_and_profit(recipe, catalog, unit_dust_price);
        }
    }
}
