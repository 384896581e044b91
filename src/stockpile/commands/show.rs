use crate::commands::CmdResult;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::DataStore;

pub fn run<S: DataStore>(inventory: &Inventory<S>, id: u32) -> Result<CmdResult> {
    match inventory.find_by_id(id) {
        Some(product) => Ok(CmdResult::default().with_listed_products(vec![product.clone()])),
        None => Ok(CmdResult::not_found(id)),
    }
}
