use super::DataStore;
use crate::error::{Result, StockpileError};
use crate::model::Product;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStore {
    data_file: PathBuf,
}

impl FileStore {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StockpileError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_file(&self) -> PathBuf {
        let name = self
            .data_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "products.json".to_string());
        self.data_file
            .with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
    }
}

impl DataStore for FileStore {
    fn load_products(&self) -> Result<Vec<Product>> {
        if !self.data_file.exists() {
            debug!(path = %self.data_file.display(), "No data file, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.data_file).map_err(StockpileError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(StockpileError::Serialization)?;
        debug!(count = products.len(), path = %self.data_file.display(), "Loaded products");
        Ok(products)
    }

    fn save_products(&mut self, products: &[Product]) -> Result<()> {
        self.ensure_parent_dir()?;
        let content =
            serde_json::to_string_pretty(products).map_err(StockpileError::Serialization)?;

        let tmp_file = self.tmp_file();
        fs::write(&tmp_file, content).map_err(StockpileError::Io)?;
        fs::rename(&tmp_file, &self.data_file).map_err(StockpileError::Io)?;

        debug!(count = products.len(), path = %self.data_file.display(), "Saved products");
        Ok(())
    }
}
