use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::stats::Statistics;
use crate::store::DataStore;

pub fn run<S: DataStore>(inventory: &Inventory<S>, low_stock_threshold: u32) -> Result<CmdResult> {
    if inventory.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(
            "No products registered to compute statistics.",
        ));
        return Ok(result);
    }

    let statistics = Statistics::compute(inventory.find_all(), low_stock_threshold);
    Ok(CmdResult::default().with_statistics(statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::inventory_with;
    use crate::store::memory::fixtures::mouse_and_keyboard;

    #[test]
    fn computes_with_configured_threshold() {
        let inventory = inventory_with(mouse_and_keyboard());

        let default = run(&inventory, 5).unwrap().statistics.unwrap();
        assert_eq!(default.low_stock.len(), 1);

        let strict = run(&inventory, 11).unwrap().statistics.unwrap();
        assert_eq!(strict.low_stock.len(), 2);
    }

    #[test]
    fn empty_inventory_has_no_statistics() {
        let inventory = inventory_with(Vec::new());
        let result = run(&inventory, 5).unwrap();
        assert!(result.statistics.is_none());
        assert_eq!(result.messages.len(), 1);
    }
}
