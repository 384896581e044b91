use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::query::ListQuery;
use crate::stats::Totals;
use crate::store::DataStore;

pub fn run<S: DataStore>(inventory: &Inventory<S>, query: &ListQuery) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if inventory.is_empty() {
        result.add_message(CmdMessage::warning("No products registered."));
        return Ok(result);
    }

    let listed = query.apply(inventory.find_all());
    if listed.is_empty() {
        if let Some(category) = &query.category {
            result.add_message(CmdMessage::warning(format!(
                "No products found in category \"{}\".",
                category
            )));
        }
    }

    let totals = Totals::of(&listed);
    Ok(result.with_listed_products(listed).with_totals(totals))
}
