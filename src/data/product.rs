//! Product Model
//! The single persisted entity and the query orderings used across the app.

/// A stored product row.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub price: f64,
}

/// Insert payload. The id is always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub stock: i64,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, stock: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            stock,
            price,
        }
    }
}

/// Row ordering for `ProductStore::list_products`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrder {
    /// Whatever order SQLite returns for a plain select (table, export, pie)
    Natural,
    /// Highest stock first (bar chart)
    StockDesc,
    /// Insertion order by id (line chart)
    IdAsc,
}

impl Default for ProductOrder {
    fn default() -> Self {
        ProductOrder::Natural
    }
}

impl ProductOrder {
    pub(crate) fn order_clause(self) -> &'static str {
        match self {
            ProductOrder::Natural => "",
            ProductOrder::StockDesc => " ORDER BY stock DESC",
            ProductOrder::IdAsc => " ORDER BY id",
        }
    }
}
