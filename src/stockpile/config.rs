use crate::error::{Result, StockpileError};
use crate::stats::LOW_STOCK_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "products.json";

/// Configuration for stockpile, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockpileConfig {
    /// Name of the products file inside the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Products with fewer units than this are reported as low stock
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_low_stock_threshold() -> u32 {
    LOW_STOCK_THRESHOLD
}

impl Default for StockpileConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl StockpileConfig {
    pub const KEYS: [&'static str; 2] = ["data-file", "low-stock-threshold"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockpileError::Io)?;
        let mut config: StockpileConfig =
            serde_json::from_str(&content).map_err(StockpileError::Serialization)?;
        let data_file = config.data_file.clone();
        config
            .set("data-file", &data_file)
            .map_err(StockpileError::InvalidData)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockpileError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockpileError::Serialization)?;
        fs::write(config_path, content).map_err(StockpileError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "low-stock-threshold" => Some(self.low_stock_threshold.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "data-file" => {
                let value = value.trim();
                if value.is_empty()
                    || value == "."
                    || value == ".."
                    || value.contains(['/', '\\'])
                    || value.eq_ignore_ascii_case(CONFIG_FILENAME)
                {
                    return Err(format!("Invalid data file name: {:?}", value));
                }
                self.data_file = value.to_string();
                Ok(())
            }
            "low-stock-threshold" => {
                self.low_stock_threshold = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid threshold: {:?}", value))?;
                Ok(())
            }
            other => Err(format!("Unknown config key: {}", other)),
        }
    }
}
