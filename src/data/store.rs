//! Product Store Module
//! SQLite persistence for products using rusqlite.

use crate::data::{NewProduct, Product, ProductOrder};
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS producto (
    id INTEGER PRIMARY KEY,
    nombre TEXT,
    stock INTEGER,
    precio REAL
)";

/// Owns the single database connection for the process lifetime.
pub struct ProductStore {
    conn: Connection,
}

impl ProductStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let store = Self { conn };
        store.ensure_schema()?;

        tracing::info!(path = %path.display(), "Product store opened");
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the `producto` table if absent. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Insert a product and return the id assigned by SQLite.
    pub fn insert_product(&self, product: &NewProduct) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO producto (nombre, stock, precio) VALUES (?1, ?2, ?3)",
            params![product.name, product.stock, product.price],
        )?;
        let id = self.conn.last_insert_rowid();

        tracing::info!(id, name = %product.name, "Product inserted");
        Ok(id)
    }

    /// Return every product in the requested order.
    pub fn list_products(&self, order: ProductOrder) -> Result<Vec<Product>, StoreError> {
        let sql = format!(
            "SELECT id, nombre, stock, precio FROM producto{}",
            order.order_clause()
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], |row| {
            Ok(Product {
                id: row.get(0)?,
                name: row.get(1)?,
                stock: row.get(2)?,
                price: row.get(3)?,
            })
        })?;

        let products = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = products.len(), ?order, "Products listed");
        Ok(products)
    }

    /// Number of stored products.
    pub fn count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM producto", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> ProductStore {
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();
        store.insert_product(&NewProduct::new("Gadget", 42, 9.99)).unwrap();
        store.insert_product(&NewProduct::new("Bolt", -3, 0.1)).unwrap();
        store.insert_product(&NewProduct::new("Nut", 42, 0.05)).unwrap();
        store
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let store = ProductStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = ProductStore::open_in_memory().unwrap();
        let first = store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();
        let second = store.insert_product(&NewProduct::new("", 0, 0.0)).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn inserted_values_are_read_back() {
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();

        let products = store.list_products(ProductOrder::Natural).unwrap();
        assert_eq!(
            products,
            vec![Product {
                id: 1,
                name: "Widget".to_string(),
                stock: 10,
                price: 2.5,
            }]
        );
    }

    #[test]
    fn stock_desc_is_non_increasing() {
        let store = seeded_store();
        let products = store.list_products(ProductOrder::StockDesc).unwrap();

        assert_eq!(products.len(), 4);
        assert!(products.windows(2).all(|pair| pair[0].stock >= pair[1].stock));
        assert_eq!(products.last().map(|p| p.stock), Some(-3));
    }

    #[test]
    fn id_asc_follows_insertion() {
        let store = seeded_store();
        let ids: Vec<i64> = store
            .list_products(ProductOrder::IdAsc)
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erp_database.db");

        {
            let store = ProductStore::open(&path).unwrap();
            store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();
        }

        let store = ProductStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        let next = store.insert_product(&NewProduct::new("Gadget", 1, 1.0)).unwrap();
        assert_eq!(next, 2);
    }

    #[test]
    fn open_reports_unreachable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("db.sqlite");

        assert!(ProductStore::open(&path).is_err());
    }
}
