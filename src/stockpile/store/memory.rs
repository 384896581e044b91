use super::DataStore;
use crate::error::{Result, StockpileError};
use crate::model::Product;
use std::io;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: Vec<Product>,
    saves: usize,
    simulate_read_error: bool,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose next load returns `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_simulate_read_error(&mut self, simulate: bool) {
        self.simulate_read_error = simulate;
    }

    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl DataStore for InMemoryStore {
    fn load_products(&self) -> Result<Vec<Product>> {
        if self.simulate_read_error {
            return Err(StockpileError::Io(io::Error::other("simulated read error")));
        }
        Ok(self.products.clone())
    }

    fn save_products(&mut self, products: &[Product]) -> Result<()> {
        if self.simulate_write_error {
            return Err(StockpileError::Io(io::Error::other("simulated write error")));
        }
        self.products = products.to_vec();
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{NewProduct, Product};

    /// The two-product store used throughout the tests.
    pub fn mouse_and_keyboard() -> Vec<Product> {
        vec![
            Product::new(1, NewProduct::new("Mouse", "Electronics", 10, 50.0)),
            Product::new(2, NewProduct::new("Keyboard", "Electronics", 3, 80.0)),
        ]
    }

    pub fn product(id: u32, name: &str, category: &str, quantity: u32, price: f64) -> Product {
        Product::new(id, NewProduct::new(name, category, quantity, price))
    }
}
