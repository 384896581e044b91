//! # CLI Layer
//!
//! This module is **one possible UI client** for stockpile. It is the only
//! place that reads stdin, writes to the terminal, or decides exit codes.
//!
//! ## Structure
//!
//! - `run()`: parses arguments, sets up logging, dispatches
//! - `init_context()`: resolves the data directory, loads config and products
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! Handlers return an [`ExitCode`]: failure when the command reported an
//! error message (invalid input, unknown id). `Err` is left for I/O and
//! other unexpected failures, which `main` prints as `Error: ...`.

use super::print::{
    print_config, print_messages, print_product_details, print_products,
    print_statistics, print_totals,
};
use super::setup::{Cli, Commands, CoreCommands, MiscCommands, ProductCommands, SortArg};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use stockpile::api::{
    CmdResult, ConfigAction, ProductChanges, ProductInput, SortKey, StockApi, StockPaths,
};
use stockpile::config::StockpileConfig;
use stockpile::error::{Result, StockpileError};
use stockpile::query::ListQuery;
use stockpile::store::fs::FileStore;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Overrides where data and config live, for scripts and tests.
const HOME_ENV: &str = "STOCKPILE_HOME";
/// Log filter, e.g. `STOCKPILE_LOG=stockpile=debug`.
const LOG_ENV: &str = "STOCKPILE_LOG";
const PROJECT_DIR: &str = ".stockpile";

struct AppContext {
    api: StockApi<FileStore>,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Add {
                name,
                category,
                quantity,
                price,
            } => handle_add(
                &mut ctx,
                ProductInput {
                    name,
                    category,
                    quantity,
                    price,
                },
            ),
            CoreCommands::List { category, sort } => handle_list(&ctx, category, sort),
            CoreCommands::Search { term } => handle_search(&ctx, term.join(" ")),
            CoreCommands::Stats => handle_stats(&ctx),
        },
        Some(Commands::Product(cmd)) => match cmd {
            ProductCommands::Show { id } => handle_show(&ctx, id),
            ProductCommands::Update {
                id,
                name,
                category,
                quantity,
                price,
            } => handle_update(
                &mut ctx,
                id,
                ProductChanges {
                    name,
                    category,
                    quantity,
                    price,
                },
            ),
            ProductCommands::Delete { id, yes } => handle_delete(&mut ctx, id, yes),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
        },
        None => handle_list(&ctx, None, None),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "stockpile=debug" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_data_dir(global: bool) -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    if global {
        let dirs = ProjectDirs::from("com", "stockpile", "stockpile").ok_or_else(|| {
            StockpileError::Api("Could not determine the user data directory".into())
        })?;
        return Ok(dirs.data_dir().to_path_buf());
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Ok(cwd.join(PROJECT_DIR))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.global)?;

    let config = StockpileConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable config, using defaults");
        StockpileConfig::default()
    });

    let paths = StockPaths::new(data_dir);
    let store = FileStore::new(paths.data_file(&config));
    debug!(file = %store.data_file().display(), "Using data file");
    let mut api = StockApi::new(store, paths, config);

    if let Err(e) = api.load() {
        eprintln!(
            "{}",
            format!(
                "Could not load products ({}). Starting with an empty inventory.",
                e
            )
            .yellow()
        );
    }

    Ok(AppContext { api })
}

fn finish(result: &CmdResult) -> ExitCode {
    if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn handle_add(ctx: &mut AppContext, input: ProductInput) -> Result<ExitCode> {
    let result = ctx.api.add_product(&input)?;
    print_messages(&result.messages);
    print_product_details(&result.affected_products);
    Ok(finish(&result))
}

fn handle_list(
    ctx: &AppContext,
    category: Option<String>,
    sort: Option<SortArg>,
) -> Result<ExitCode> {
    let query = ListQuery {
        category,
        sort: sort.map(SortKey::from).unwrap_or_default(),
    };
    let result = ctx.api.list_products(&query)?;
    print_products(&result.listed_products);
    if let (false, Some(totals)) = (result.listed_products.is_empty(), &result.totals) {
        print_totals(totals);
    }
    print_messages(&result.messages);
    Ok(finish(&result))
}

fn handle_search(ctx: &AppContext, term: String) -> Result<ExitCode> {
    let result = ctx.api.search_products(&term)?;
    print_messages(&result.messages);
    print_product_details(&result.listed_products);
    Ok(finish(&result))
}

fn handle_show(ctx: &AppContext, id: u32) -> Result<ExitCode> {
    let result = ctx.api.show_product(id)?;
    print_product_details(&result.listed_products);
    print_messages(&result.messages);
    Ok(finish(&result))
}

fn handle_update(ctx: &mut AppContext, id: u32, changes: ProductChanges) -> Result<ExitCode> {
    let result = ctx.api.update_product(id, &changes)?;
    print_messages(&result.messages);
    Ok(finish(&result))
}

fn handle_delete(ctx: &mut AppContext, id: u32, yes: bool) -> Result<ExitCode> {
    if !yes {
        let Some(product) = ctx.api.find_product(id) else {
            let result = CmdResult::not_found(id);
            print_messages(&result.messages);
            return Ok(finish(&result));
        };

        print_product_details(std::slice::from_ref(product));
        if !confirm("Delete this product? (y/n): ")? {
            println!("{}", "Deletion cancelled.".yellow());
            return Ok(ExitCode::SUCCESS);
        }
    }

    let result = ctx.api.delete_product(id)?;
    print_messages(&result.messages);
    Ok(finish(&result))
}

fn handle_stats(ctx: &AppContext) -> Result<ExitCode> {
    let result = ctx.api.statistics()?;
    if let Some(stats) = &result.statistics {
        print_statistics(stats);
    }
    print_messages(&result.messages);
    Ok(finish(&result))
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<ExitCode> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if let (true, Some(config)) = (show_all, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(finish(&result))
}

/// Asks a yes/no question on stdin. Anything but "y"/"yes" (or end of input) is a no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
        assert!(!is_yes("yep"));
    }
}
