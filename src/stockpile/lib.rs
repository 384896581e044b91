//! # Stockpile Architecture
//!
//! Stockpile is a **UI-agnostic inventory library** with a command line client.
//! It keeps a list of products (name, category, quantity, price) in one local
//! JSON file and offers add, list, search, update, delete and statistics.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints tables, asks for confirmation   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: inventory, paths, config               │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validates raw input, calls the inventory                 │
//! │  - Turns expected failures into messages (CmdResult)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - validation: sanitizing and field rules                   │
//! │  - inventory: ordered record store, saves on every change   │
//! │  - ids, query, stats: pure functions over a snapshot        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never reads
//! stdin, and never exits the process. Diagnostics go through `tracing`; what
//! the user should see comes back as [`commands::CmdMessage`]s.
//!
//! ## Session Model
//!
//! One process, one user, one [`api::StockApi`]. The inventory is loaded once
//! at startup. A load failure (corrupt file, unreadable file) leaves an empty
//! inventory and is reported, never fatal. Every mutation is written back
//! immediately.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`inventory`]: The record store
//! - [`validation`]: Sanitizing and field constraints
//! - [`ids`]: Lowest-free id allocation
//! - [`query`]: Filtering, sorting and search
//! - [`stats`]: Totals and inventory statistics
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Product`, `ProductPatch`, ...)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod model;
pub mod query;
pub mod stats;
pub mod store;
pub mod validation;
