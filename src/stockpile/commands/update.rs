use crate::commands::{recover, CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::model::{ProductPatch, UpdateOutcome};
use crate::store::DataStore;
use crate::validation;

/// Raw replacement values. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

pub fn run<S: DataStore>(
    inventory: &mut Inventory<S>,
    id: u32,
    changes: &ProductChanges,
) -> Result<CmdResult> {
    let Some(current) = inventory.find_by_id(id) else {
        return Ok(CmdResult::not_found(id));
    };

    // Validate the record as it would look after the update.
    let quantity = current.quantity.to_string();
    let price = current.price.to_string();
    let merged = validation::parse_new_product(
        changes.name.as_deref().unwrap_or(&current.name),
        changes.category.as_deref().unwrap_or(&current.category),
        changes.quantity.as_deref().unwrap_or(&quantity),
        changes.price.as_deref().unwrap_or(&price),
    );
    let fields = match merged {
        Ok(fields) => fields,
        Err(violations) => return Ok(CmdResult::invalid(violations)),
    };

    let patch = ProductPatch {
        name: changes.name.as_ref().map(|_| fields.name.clone()),
        category: changes.category.as_ref().map(|_| fields.category.clone()),
        quantity: changes.quantity.as_ref().map(|_| fields.quantity),
        price: changes.price.as_ref().map(|_| fields.price),
    };

    let applied = match inventory.update(id, &patch) {
        Ok(applied) => applied,
        Err(e) => return recover(e),
    };

    let mut result = CmdResult::default();
    match applied.value {
        UpdateOutcome::Changed { product, changes } => {
            result.add_message(CmdMessage::success(format!(
                "Product updated (ID {}): {}",
                product.id, product.name
            )));
            for change in &changes {
                result.add_message(CmdMessage::info(format!("  • {}", change)));
            }
            result.note_persisted(applied.persisted);
            result.changes = changes;
            Ok(result.with_affected_products(vec![product]))
        }
        UpdateOutcome::Unchanged(product) => {
            result.add_message(CmdMessage::warning("No changes were made."));
            Ok(result.with_listed_products(vec![product]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::inventory_with;
    use crate::model::FieldChange;
    use crate::store::memory::fixtures::mouse_and_keyboard;

    #[test]
    fn changes_only_supplied_fields() {
        let mut inventory = inventory_with(mouse_and_keyboard());
        let changes = ProductChanges {
            price: Some("75".into()),
            ..Default::default()
        };

        let result = run(&mut inventory, 2, &changes).unwrap();
        assert_eq!(
            result.changes,
            vec![FieldChange::Price {
                before: 80.0,
                after: 75.0
            }]
        );
        let keyboard = inventory.find_by_id(2).unwrap();
        assert_eq!(keyboard.name, "Keyboard");
        assert_eq!(keyboard.quantity, 3);
        assert_eq!(keyboard.price, 75.0);
    }

    #[test]
    fn identical_values_are_a_noop() {
        let mut inventory = inventory_with(mouse_and_keyboard());
        let changes = ProductChanges {
            name: Some("Keyboard".into()),
            quantity: Some("3".into()),
            price: Some("80.00".into()),
            ..Default::default()
        };

        let result = run(&mut inventory, 2, &changes).unwrap();
        assert!(result.changes.is_empty());
        assert!(!result.has_errors());
        assert_eq!(result.messages[0].content, "No changes were made.");
        assert_eq!(inventory.store().save_count(), 0);
    }

    #[test]
    fn invalid_value_blocks_whole_update() {
        let mut inventory = inventory_with(mouse_and_keyboard());
        let changes = ProductChanges {
            name: Some("Mechanical keyboard".into()),
            quantity: Some("-4".into()),
            ..Default::default()
        };

        let result = run(&mut inventory, 2, &changes).unwrap();
        assert!(result.has_errors());
        assert_eq!(result.violations.len(), 1);
        assert_eq!(inventory.find_by_id(2).unwrap().name, "Keyboard");
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut inventory = inventory_with(mouse_and_keyboard());
        let result = run(&mut inventory, 42, &ProductChanges::default()).unwrap();
        assert!(result.has_errors());
    }
}
