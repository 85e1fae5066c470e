//! Product Table Window
//! Read-only snapshot of the product table, taken when the window opens.

use crate::data::{Product, ProductOrder, ProductStore, StoreError};
use egui::{RichText, ScrollArea};

const COLUMN_HEADERS: [&str; 4] = ["ID", "Name", "Stock", "Price"];

pub struct TableView {
    id: usize,
    products: Vec<Product>,
    open: bool,
}

impl TableView {
    /// Query the store once; the window never refreshes afterwards.
    pub fn load(id: usize, store: &ProductStore) -> Result<Self, StoreError> {
        let products = store.list_products(ProductOrder::Natural)?;
        Ok(Self {
            id,
            products,
            open: true,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Cell texts in display order: id, name, stock, price.
    pub fn row_cells(product: &Product) -> [String; 4] {
        [
            product.id.to_string(),
            product.name.clone(),
            product.stock.to_string(),
            product.price.to_string(),
        ]
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let title = if self.id == 0 {
            "Product Table".to_string()
        } else {
            format!("Product Table ({})", self.id + 1)
        };

        egui::Window::new(title)
            .id(egui::Id::new(("product_table", self.id)))
            .open(&mut self.open)
            .default_size([420.0, 320.0])
            .show(ctx, |ui| {
                if self.products.is_empty() {
                    ui.label(RichText::new("No products yet").italics());
                    return;
                }

                ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    egui::Grid::new(("product_table_grid", self.id))
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for header in COLUMN_HEADERS {
                                ui.label(RichText::new(header).strong());
                            }
                            ui.end_row();

                            for product in &self.products {
                                for cell in Self::row_cells(product) {
                                    ui.label(cell);
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NewProduct;

    #[test]
    fn snapshot_is_not_refreshed() {
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();

        let view = TableView::load(0, &store).unwrap();
        store.insert_product(&NewProduct::new("Gadget", 1, 1.0)).unwrap();

        assert_eq!(view.products.len(), 1);
        assert!(view.is_open());
        assert_eq!(TableView::load(1, &store).unwrap().products.len(), 2);
    }

    #[test]
    fn row_cells_follow_column_order() {
        let product = Product {
            id: 1,
            name: "Widget".to_string(),
            stock: 10,
            price: 2.5,
        };
        assert_eq!(TableView::row_cells(&product), ["1", "Widget", "10", "2.5"]);
    }
}
