//! SeaORM entities for the catalog: users, categories, products and the
//! `categories_products` association, plus connection helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod category;
pub mod product;
pub mod category_product;

#[cfg(test)]
mod tests;
