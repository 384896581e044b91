use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::query;
use crate::store::DataStore;
use crate::validation::sanitize;

pub fn run<S: DataStore>(inventory: &Inventory<S>, term: &str) -> Result<CmdResult> {
    let term = sanitize(term);
    let mut result = CmdResult::default();
    if term.is_empty() {
        result.add_message(CmdMessage::error("Search term is empty."));
        return Ok(result);
    }

    let found = query::search(inventory.find_all(), &term);
    if found.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No products found for \"{}\".",
            term
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "{} product(s) found.",
            found.len()
        )));
    }
    Ok(result.with_listed_products(found))
}
