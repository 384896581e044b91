//! # Command Layer
//!
//! One module per operation. Each `run` function takes the inventory (or the
//! paths, for `config`) plus plain Rust arguments and returns a [`CmdResult`].
//!
//! Expected outcomes are data, not errors: a validation failure, an unknown id
//! or an update that changes nothing all come back as `Ok(CmdResult)` with the
//! matching [`CmdMessage`]s. `Err` is reserved for states the caller cannot
//! fix by retrying with different input.
//!
//! Commands never print, prompt, or exit.

use crate::config::StockpileConfig;
use crate::error::{Result, StockpileError};
use crate::model::{FieldChange, Product};
use crate::stats::{Statistics, Totals};
use crate::validation::{self, Violation};
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod search;
pub mod show;
pub mod stats;
pub mod update;

/// Where a session keeps its data and configuration.
#[derive(Debug, Clone)]
pub struct StockPaths {
    pub data_dir: PathBuf,
}

impl StockPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_file(&self, config: &StockpileConfig) -> PathBuf {
        self.data_dir.join(&config.data_file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_products: Vec<Product>,
    pub listed_products: Vec<Product>,
    pub changes: Vec<FieldChange>,
    pub violations: Vec<Violation>,
    pub totals: Option<Totals>,
    pub statistics: Option<Statistics>,
    pub config: Option<StockpileConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_products(mut self, products: Vec<Product>) -> Self {
        self.affected_products = products;
        self
    }

    pub fn with_listed_products(mut self, products: Vec<Product>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_totals(mut self, totals: Totals) -> Self {
        self.totals = Some(totals);
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_config(mut self, config: StockpileConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// A rejected request: one error message per violation.
    pub fn invalid(violations: Vec<Violation>) -> Self {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::error("Please fix the following errors:"));
        for reason in validation::messages(&violations) {
            result.add_message(CmdMessage::error(format!("  • {}", reason)));
        }
        result.violations = violations;
        result
    }

    pub fn not_found(id: u32) -> Self {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::error(format!(
            "Product with ID {} not found.",
            id
        )));
        result
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    /// Turns a failed automatic save into a warning.
    pub(crate) fn note_persisted(&mut self, persisted: Result<()>) {
        if let Err(e) = persisted {
            self.add_message(CmdMessage::warning(format!(
                "Change kept in memory but could not be saved: {}",
                e
            )));
        }
    }
}

/// Maps the expected store errors to a `CmdResult`, passing anything else on.
pub(crate) fn recover(err: StockpileError) -> Result<CmdResult> {
    match err {
        StockpileError::Validation(violations) => Ok(CmdResult::invalid(violations)),
        StockpileError::ProductNotFound(id) => Ok(CmdResult::not_found(id)),
        other => Err(other),
    }
}
