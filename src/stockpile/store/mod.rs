//! # Storage Layer
//!
//! Persistence for the product list sits behind the [`DataStore`] trait so the
//! inventory logic never touches the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one pretty-printed JSON array
//!   - Missing or blank file reads as an empty list
//!   - Writes go to a temporary file that is renamed over the data file
//!
//! - [`memory::InMemoryStore`]: Storage for tests
//!   - Counts saves, can simulate read and write failures
//!
//! ## Storage Format
//!
//! ```text
//! .stockpile/
//! ├── products.json     # [{"id":1,"name":..,"category":..,"quantity":..,"price":..}, ...]
//! └── config.json       # StockpileConfig
//! ```
//!
//! The store always reads and writes the whole list. There is no versioning
//! and no partial update.

use crate::error::Result;
use crate::model::Product;

pub mod fs;
pub mod memory;

/// Abstract interface for product persistence.
pub trait DataStore {
    /// Read every persisted product, in stored order.
    fn load_products(&self) -> Result<Vec<Product>>;

    /// Replace the persisted products with `products`.
    fn save_products(&mut self, products: &[Product]) -> Result<()>;
}
