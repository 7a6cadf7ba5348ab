//! Core business logic: prices, salvage yields, recipes and profit

pub mod config;
pub mod dust;
pub mod item;
pub mod log;
pub mod page;
pub mod pipeline;
pub mod profit;
pub mod recipe;
pub mod table;

// Re-export main types for cleaner imports
pub use item::{Item, PriceCatalog};
pub use page::{Page, PageSource};
pub use profit::ProfitEngine;
pub use recipe::Recipe;
