use crate::commands::{recover, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::DataStore;

pub fn run<S: DataStore>(inventory: &mut Inventory<S>, id: u32) -> Result<CmdResult> {
    let applied = match inventory.delete(id) {
        Ok(applied) => applied,
        Err(e) => return recover(e),
    };

    let removed = applied.value;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product deleted (ID {}): {}",
        removed.id, removed.name
    )));
    result.note_persisted(applied.persisted);
    Ok(result.with_affected_products(vec![removed]))
}
