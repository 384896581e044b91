//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every stockpile operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the session state**: the [`Inventory`], its paths and config
//! - **Dispatches** to the matching `commands::<op>::run`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and no prompting. Confirmation before a delete, for
//! instance, is the client's job.
//!
//! ## Generic Over DataStore
//!
//! `StockApi<S: DataStore>` works with any backend:
//! - Production: `StockApi<FileStore>`
//! - Testing: `StockApi<InMemoryStore>`

use crate::commands;
use crate::config::StockpileConfig;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::model::Product;
use crate::query::ListQuery;
use crate::store::DataStore;
use tracing::debug;

/// The main API facade for stockpile operations.
pub struct StockApi<S: DataStore> {
    inventory: Inventory<S>,
    paths: commands::StockPaths,
    config: StockpileConfig,
}

impl<S: DataStore> StockApi<S> {
    /// Builds a session with an empty inventory. Call [`StockApi::load`] next.
    pub fn new(store: S, paths: commands::StockPaths, config: StockpileConfig) -> Self {
        Self {
            inventory: Inventory::new(store),
            paths,
            config,
        }
    }

    /// Reads persisted products. On error the session continues with an empty
    /// inventory; the error is returned so the client can tell the user.
    pub fn load(&mut self) -> Result<usize> {
        let count = self.inventory.load()?;
        debug!(count, "Inventory loaded");
        Ok(count)
    }

    pub fn add_product(&mut self, input: &commands::add::ProductInput) -> Result<CmdResult> {
        commands::add::run(&mut self.inventory, input)
    }

    pub fn list_products(&self, query: &ListQuery) -> Result<CmdResult> {
        commands::list::run(&self.inventory, query)
    }

    pub fn search_products(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.inventory, term)
    }

    pub fn show_product(&self, id: u32) -> Result<CmdResult> {
        commands::show::run(&self.inventory, id)
    }

    pub fn update_product(
        &mut self,
        id: u32,
        changes: &commands::update::ProductChanges,
    ) -> Result<CmdResult> {
        commands::update::run(&mut self.inventory, id, changes)
    }

    pub fn delete_product(&mut self, id: u32) -> Result<CmdResult> {
        commands::delete::run(&mut self.inventory, id)
    }

    pub fn statistics(&self) -> Result<CmdResult> {
        commands::stats::run(&self.inventory, self.config.low_stock_threshold)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    /// Looks a product up without building a `CmdResult`, e.g. to show it
    /// before asking for confirmation.
    pub fn find_product(&self, id: u32) -> Option<&Product> {
        self.inventory.find_by_id(id)
    }

    pub fn inventory(&self) -> &Inventory<S> {
        &self.inventory
    }
}

pub use crate::commands::add::ProductInput;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::update::ProductChanges;
pub use crate::query::SortKey;
pub use commands::{CmdMessage, CmdResult, MessageLevel, StockPaths};
