//! Add Product Form
//! Window with name / stock / price inputs. Stock and price must parse as numbers.

use crate::data::{NewProduct, ProductStore, StoreError};
use egui::RichText;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Please enter valid values for stock and price. Stock must be a whole number, got {0:?}.")]
    InvalidStock(String),
    #[error("Please enter valid values for stock and price. Price must be a number, got {0:?}.")]
    InvalidPrice(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Actions triggered by the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

/// Entered values survive a failed submit.
#[derive(Default)]
pub struct ProductForm {
    pub name: String,
    pub stock: String,
    pub price: String,
    open: bool,
    /// Raise the window above the others on the next frame
    focus_requested: bool,
}

impl ProductForm {
    pub fn new() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Parse the numeric fields. The name is taken as-is.
    pub fn validate(&self) -> Result<NewProduct, FormError> {
        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidStock(self.stock.clone()))?;

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FormError::InvalidPrice(self.price.clone()))?;

        Ok(NewProduct::new(self.name.clone(), stock, price))
    }

    /// Validate and insert. Nothing is written when validation fails.
    pub fn submit(&self, store: &ProductStore) -> Result<i64, SubmitError> {
        let product = self.validate()?;
        Ok(store.insert_product(&product)?)
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Bring the already open form to the front.
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    /// Draw the form window
    pub fn show(&mut self, ctx: &egui::Context) -> FormAction {
        let mut action = FormAction::None;

        let shown = egui::Window::new("Add Product")
            .open(&mut self.open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("product_form_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Name:");
                        ui.text_edit_singleline(&mut self.name);
                        ui.end_row();

                        ui.label("Stock:");
                        ui.text_edit_singleline(&mut self.stock);
                        ui.end_row();

                        ui.label("Price:");
                        ui.text_edit_singleline(&mut self.price);
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(RichText::new("Add").strong()).clicked() {
                        action = FormAction::Submit;
                    }
                    if ui.button("Cancel").clicked() {
                        action = FormAction::Cancel;
                    }
                });
            });

        if let Some(window) = shown {
            if std::mem::take(&mut self.focus_requested) {
                ctx.move_to_top(window.response.layer_id);
            }
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Product, ProductOrder};

    fn form(name: &str, stock: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            stock: stock.to_string(),
            price: price.to_string(),
            ..ProductForm::new()
        }
    }

    #[test]
    fn valid_input_is_parsed() {
        let product = form("Widget", "10", "2.50").validate().unwrap();
        assert_eq!(product, NewProduct::new("Widget", 10, 2.5));
    }

    #[test]
    fn whitespace_and_negative_stock_are_accepted() {
        let product = form("", " -4 ", " 3 ").validate().unwrap();
        assert_eq!(product, NewProduct::new("", -4, 3.0));
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert_eq!(
            form("Bad", "abc", "2.50").validate(),
            Err(FormError::InvalidStock("abc".to_string()))
        );
        assert_eq!(
            form("Bad", "1.5", "2.50").validate(),
            Err(FormError::InvalidStock("1.5".to_string()))
        );
        assert_eq!(
            form("Bad", "3", "two").validate(),
            Err(FormError::InvalidPrice("two".to_string()))
        );
        assert_eq!(
            form("Bad", "3", "NaN").validate(),
            Err(FormError::InvalidPrice("NaN".to_string()))
        );
    }

    #[test]
    fn invalid_submit_writes_nothing() {
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Existing", 1, 1.0)).unwrap();

        let bad = form("Bad", "abc", "2.50");
        assert!(matches!(bad.submit(&store), Err(SubmitError::Invalid(_))));
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(bad.stock, "abc");
        assert!(bad.is_open());
    }

    #[test]
    fn valid_submit_adds_exactly_one_row() {
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Existing", 1, 1.0)).unwrap();

        let id = form("Widget", "10", "2.50").submit(&store).unwrap();
        assert_eq!(id, 2);
        assert_eq!(store.count().unwrap(), 2);

        let products = store.list_products(ProductOrder::IdAsc).unwrap();
        assert_eq!(
            products.last(),
            Some(&Product {
                id: 2,
                name: "Widget".to_string(),
                stock: 10,
                price: 2.5,
            })
        );
    }

    #[test]
    fn insert_failure_keeps_form_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erp_database.db");
        let store = ProductStore::open(&path).unwrap();
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE producto")
            .unwrap();

        let form = form("Widget", "10", "2.50");
        assert!(matches!(form.submit(&store), Err(SubmitError::Store(_))));
        assert!(form.is_open());
        assert_eq!(form.name, "Widget");
    }

    #[test]
    fn focus_request_is_consumed_when_drawn() {
        let ctx = egui::Context::default();
        let mut form = ProductForm::new();
        form.request_focus();
        assert!(form.focus_requested);

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            form.show(ctx);
        });
        assert!(!form.focus_requested);
        assert!(form.is_open());
    }

    #[test]
    fn close_marks_form_closed() {
        let mut form = ProductForm::new();
        assert!(form.is_open());
        form.close();
        assert!(!form.is_open());
    }
}
