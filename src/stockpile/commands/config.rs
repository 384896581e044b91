use crate::commands::{CmdMessage, CmdResult, StockPaths};
use crate::config::StockpileConfig;
use crate::error::Result;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &StockPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    let mut result = CmdResult::default();
    let mut config = load_or_default(dir, &mut result);

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result.with_config(config))
        }
    }
}

/// An unreadable config falls back to defaults, so `set` can repair it.
fn load_or_default(dir: &Path, result: &mut CmdResult) -> StockpileConfig {
    StockpileConfig::load(dir).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable config, using defaults");
        result.add_message(CmdMessage::warning(format!(
            "Config could not be read ({}), using defaults.",
            e
        )));
        StockpileConfig::default()
    })
}
