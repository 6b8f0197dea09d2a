//! Product catalog: joins users, products and categories, filters products
//! by a live search term and resolves the rows of the product table.

pub mod catalog;
pub mod data;
pub mod digest;
pub mod filter;
pub mod fixtures;
pub mod join;
pub mod rows;
pub mod view;

pub use catalog::{Catalog, CatalogPage};
pub use fixtures::{FixtureError, FixtureStore};
