//! Data module - Product model and SQLite storage

mod product;
mod store;

pub use product::{NewProduct, Product, ProductOrder};
pub use store::{ProductStore, StoreError};
