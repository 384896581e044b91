use crate::commands::{recover, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::DataStore;
use crate::validation;

/// Raw, unvalidated input for a new product.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
}

pub fn run<S: DataStore>(inventory: &mut Inventory<S>, input: &ProductInput) -> Result<CmdResult> {
    let fields = match validation::parse_new_product(
        &input.name,
        &input.category,
        &input.quantity,
        &input.price,
    ) {
        Ok(fields) => fields,
        Err(violations) => return Ok(CmdResult::invalid(violations)),
    };

    let applied = match inventory.add(fields) {
        Ok(applied) => applied,
        Err(e) => return recover(e),
    };

    let product = applied.value;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product added (ID {}): {}",
        product.id, product.name
    )));
    result.note_persisted(applied.persisted);
    Ok(result.with_affected_products(vec![product]))
}
