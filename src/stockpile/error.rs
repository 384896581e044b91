use crate::validation::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockpileError {
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    #[error("Invalid product: {}", crate::validation::messages(.0).join("; "))]
    Validation(Vec<Violation>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid data file: {0}")]
    InvalidData(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, StockpileError>;
