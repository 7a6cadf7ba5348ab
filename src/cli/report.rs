use super::ui;
use crate::core::{Item, PriceCatalog, ProfitEngine, Recipe, pipeline::Analysis};
use comfy_table::Cell;

/// Which ranked views to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    CheapestItems,
    BestDustValue,
    ProfitableRecipes,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::CheapestItems,
        Section::BestDustValue,
        Section::ProfitableRecipes,
    ];

    fn title(&self) -> &'static str {
        match self {
            Section::CheapestItems => "Cheapest items",
            Section::BestDustValue => "Best dust value",
            Section::ProfitableRecipes => "Profit opportunities",
        }
    }
}

/// The `top_n` cheapest items by price, ties by name.
pub fn cheapest_items(catalog: &PriceCatalog, top_n: usize) -> Vec<&Item> {
    let mut items: Vec<&Item> = catalog.items().collect();
    items.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
    items.truncate(top_n);
    items
}

/// The `top_n` salvage targets with the lowest price per dust.
pub fn best_dust_value(catalog: &PriceCatalog, top_n: usize) -> Vec<&Item> {
    let mut items = ProfitEngine::cheapest_dust(catalog);
    items.truncate(top_n);
    items
}

/// Recipes with positive cost and profit, most profitable first.
pub fn profitable_recipes(recipes: &[Recipe]) -> Vec<&Recipe> {
    let mut profitable: Vec<&Recipe> = recipes.iter().filter(|r| r.is_profitable()).collect();
    profitable.sort_by(|a, b| {
        b.profit
            .unwrap_or_default()
            .total_cmp(&a.profit.unwrap_or_default())
            .then_with(|| a.output.cmp(&b.output))
    });
    profitable
}

pub fn display_cheapest_items(items: &[&Item]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Price")]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.name),
            ui::number_cell(item.price.to_string()),
        ]);
    }
    table.to_string()
}

pub fn display_best_dust_value(items: &[&Item], unit_dust_price: Option<f64>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Item"),
        ui::header_cell("Price"),
        ui::header_cell("Dust"),
        ui::header_cell("Price / Dust"),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.name),
            ui::number_cell(item.price.to_string()),
            ui::number_cell(item.dust_yield.to_string()),
            ui::format_optional_cell(item.dust_value, |v| format!("{v:.2}")),
        ]);
    }

    let unit = unit_dust_price.map_or("N/A".to_string(), |v| format!("{v:.2}"));
    format!(
        "{}\n\n{}: {}",
        table,
        ui::style_text("Price of one dust", ui::StyleType::TotalLabel),
        ui::style_text(&unit, ui::StyleType::TotalValue)
    )
}

pub fn display_profitable_recipes(recipes: &[&Recipe]) -> String {
    if recipes.is_empty() {
        return ui::style_text("No profitable recipes right now.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Output"),
        ui::header_cell("Inputs"),
        ui::header_cell("Dust"),
        ui::header_cell("Currency"),
        ui::header_cell("Cost"),
        ui::header_cell("Profit"),
    ]);
    for recipe in recipes {
        table.add_row(vec![
            Cell::new(&recipe.output),
            Cell::new(recipe.inputs.join(", ")),
            ui::number_cell(recipe.dust_needed.to_string()),
            ui::number_cell(recipe.currency_needed.to_string()),
            ui::format_optional_cell(recipe.cost, |c| format!("{c:.0}")),
            ui::profit_cell(recipe.profit.unwrap_or_default()),
        ]);
    }
    table.to_string()
}

/// Renders one section with its title.
pub fn render(section: Section, analysis: &Analysis, top_n: usize) -> String {
    let body = match section {
        Section::CheapestItems => display_cheapest_items(&cheapest_items(&analysis.catalog, top_n)),
        Section::BestDustValue => display_best_dust_value(
            &best_dust_value(&analysis.catalog, top_n),
            analysis.unit_dust_price,
        ),
        Section::ProfitableRecipes => {
            display_profitable_recipes(&profitable_recipes(&analysis.recipes))
        }
    };
    format!(
        "{}\n\n{}",
        ui::style_text(section.title(), ui::StyleType::Title),
        body
    )
}

pub fn run(sections: &[Section], analysis: &Analysis, top_n: usize) {
    let count = sections.len();
    for (i, section) in sections.iter().enumerate() {
        println!("{}", render(*section, analysis, top_n));
        if i < count - 1 {
            ui::print_separator();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn analysis() -> Analysis {
        let mut catalog = PriceCatalog::default();
        for (name, price) in [("A", 100), ("B", 50), ("C", 50), ("X", 200), ("Y", 20)] {
            catalog.insert(Item::new(name, price));
        }
        catalog.apply_dust_yields(&HashMap::from([
            ("A".to_string(), 10),
            ("B".to_string(), 2),
            ("Y".to_string(), 4),
        ]));

        let engine = ProfitEngine::new(0.11).unwrap();
        let unit_dust_price = ProfitEngine::price_one_dust(&catalog);
        let mut recipes = vec![
            Recipe::parse("X,A,B,@2,$5").unwrap(),
            Recipe::parse("X2,A").unwrap(),
            Recipe::parse("A,Y,Y").unwrap(),
            Recipe::parse("Y,B").unwrap(),
        ];
        engine.evaluate_all(recipes.iter_mut(), &catalog, unit_dust_price);

        Analysis {
            catalog,
            unit_dust_price,
            recipes,
        }
    }

    #[test]
    fn test_cheapest_items() {
        let analysis = analysis();
        let names: Vec<_> = cheapest_items(&analysis.catalog, 3)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Y", "B", "C"]);
        assert_eq!(cheapest_items(&analysis.catalog, 100).len(), 5);
    }

    #[test]
    fn test_best_dust_value() {
        let analysis = analysis();
        let names: Vec<_> = best_dust_value(&analysis.catalog, 2)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Y", "A"]);
        assert_eq!(analysis.unit_dust_price, Some(5.0));
    }

    #[test]
    fn test_profitable_recipes_sorted_and_filtered() {
        let analysis = analysis();
        // X: 100 + 50 + 2 * 5 + 5 = 165, 178 - 165 = 13
        // A: 20 + 20 = 40, 89 - 40 = 49
        // Y: 50, 17 - 50 < 0
        let ranked: Vec<_> = profitable_recipes(&analysis.recipes)
            .iter()
            .map(|r| (r.output.as_str(), r.profit.unwrap()))
            .collect();
        assert_eq!(ranked, vec![("A", 49.0), ("X", 13.0)]);
    }

    #[test]
    fn test_render_sections() {
        let analysis = analysis();

        let items = render(Section::CheapestItems, &analysis, 2);
        assert!(items.contains("Cheapest items"));
        assert!(items.contains("Y"));
        assert!(!items.contains("200"));

        let dust = render(Section::BestDustValue, &analysis, 10);
        assert!(dust.contains("Price of one dust"));
        assert!(dust.contains("5.00"));

        let recipes = render(Section::ProfitableRecipes, &analysis, 10);
        assert!(recipes.contains("Profit opportunities"));
        assert!(recipes.contains("49"));
        assert!(!recipes.contains("X2"));
    }

    #[test]
    fn test_display_without_profitable_recipes() {
        let output = display_profitable_recipes(&[]);
        assert!(output.contains("No profitable recipes"));
    }
}
