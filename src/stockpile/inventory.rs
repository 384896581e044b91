//! # Record Store
//!
//! [`Inventory`] owns the ordered product list for one session and mirrors it
//! to a [`DataStore`] after every mutation.
//!
//! ## Guarantees
//!
//! - Ids are unique. New products take [`next_id`], so freed ids come back.
//! - No product in the list breaks a field constraint: `add` and `update`
//!   re-check the fields they are given.
//! - Listing order is insertion order.
//!
//! ## Persistence
//!
//! `add`, `update` (when something changed) and `delete` save immediately.
//! The in-memory change always stands; the outcome of the save is reported in
//! [`Applied::persisted`] so the caller can warn without losing the result.
//!
//! A failed [`Inventory::load`] leaves the inventory empty and returns the
//! error. Callers are expected to report it and carry on.

use crate::error::{Result, StockpileError};
use crate::ids::next_id;
use crate::model::{FieldChange, NewProduct, Product, ProductPatch, UpdateOutcome};
use crate::store::DataStore;
use crate::validation;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A mutation that has been applied in memory, plus the result of saving it.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub persisted: Result<()>,
}

impl<T> Applied<T> {
    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }
}

pub struct Inventory<S: DataStore> {
    store: S,
    products: Vec<Product>,
}

impl<S: DataStore> Inventory<S> {
    /// An empty inventory backed by `store`. Call [`Inventory::load`] to read
    /// persisted products.
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: Vec::new(),
        }
    }

    /// Replaces the in-memory list with the persisted one and returns how many
    /// products were loaded. On failure the inventory is left empty.
    pub fn load(&mut self) -> Result<usize> {
        self.products.clear();
        let products = self.store.load_products().inspect_err(|e| {
            warn!(error = %e, "Could not read products, starting empty");
        })?;
        let products = check_loaded(products).inspect_err(|e| {
            warn!(error = %e, "Rejected persisted products, starting empty");
        })?;
        self.products = products;
        Ok(self.products.len())
    }

    /// Writes the full list to the backing store.
    pub fn save(&mut self) -> Result<()> {
        self.store.save_products(&self.products).inspect_err(|e| {
            warn!(error = %e, "Could not save products");
        })
    }

    pub fn add(&mut self, fields: NewProduct) -> Result<Applied<Product>> {
        let fields = validation::check_product(fields).map_err(StockpileError::Validation)?;
        let id = next_id(self.products.iter().map(|p| p.id));
        if self.find_by_id(id).is_some() {
            return Err(StockpileError::Invariant(format!(
                "allocated id {} is already in use",
                id
            )));
        }

        let product = Product::new(id, fields);
        debug!(id = product.id, name = %product.name, "Adding product");
        self.products.push(product.clone());

        let persisted = self.save();
        Ok(Applied {
            value: product,
            persisted,
        })
    }

    /// Applies the fields of `patch` that differ from the stored product.
    ///
    /// The merged record is validated before anything changes. When no field
    /// differs the result is [`UpdateOutcome::Unchanged`] and nothing is saved.
    pub fn update(&mut self, id: u32, patch: &ProductPatch) -> Result<Applied<UpdateOutcome>> {
        let index = self.position(id)?;
        let current = &self.products[index];
        if patch.is_empty() {
            debug!(id, "Update has no fields");
            return Ok(Applied {
                value: UpdateOutcome::Unchanged(current.clone()),
                persisted: Ok(()),
            });
        }

        let merged = validation::check_product(patch.merged_with(current))
            .map_err(StockpileError::Validation)?;

        let changes = diff(current, &merged, patch);
        if changes.is_empty() {
            debug!(id, "Update changed nothing");
            return Ok(Applied {
                value: UpdateOutcome::Unchanged(current.clone()),
                persisted: Ok(()),
            });
        }

        let product = &mut self.products[index];
        product.name = merged.name;
        product.category = merged.category;
        product.quantity = merged.quantity;
        product.price = merged.price;
        let product = product.clone();
        let fields: Vec<_> = changes.iter().map(FieldChange::field).collect();
        debug!(id, ?fields, "Updated product");

        let persisted = self.save();
        Ok(Applied {
            value: UpdateOutcome::Changed { product, changes },
            persisted,
        })
    }

    pub fn delete(&mut self, id: u32) -> Result<Applied<Product>> {
        let index = self.position(id)?;
        let removed = self.products.remove(index);
        debug!(id, name = %removed.name, "Deleted product");

        let persisted = self.save();
        Ok(Applied {
            value: removed,
            persisted,
        })
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The current snapshot, in insertion order.
    pub fn find_all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn position(&self, id: u32) -> Result<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StockpileError::ProductNotFound(id))
    }
}

/// Changes between `current` and `merged`, limited to fields present in `patch`.
fn diff(current: &Product, merged: &NewProduct, patch: &ProductPatch) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if patch.name.is_some() && merged.name != current.name {
        changes.push(FieldChange::Name {
            before: current.name.clone(),
            after: merged.name.clone(),
        });
    }
    if patch.category.is_some() && merged.category != current.category {
        changes.push(FieldChange::Category {
            before: current.category.clone(),
            after: merged.category.clone(),
        });
    }
    if patch.quantity.is_some() && merged.quantity != current.quantity {
        changes.push(FieldChange::Quantity {
            before: current.quantity,
            after: merged.quantity,
        });
    }
    if patch.price.is_some() && merged.price != current.price {
        changes.push(FieldChange::Price {
            before: current.price,
            after: merged.price,
        });
    }
    changes
}

/// Persisted data must satisfy the same invariants as the live list. Text
/// that was stored unsanitized is cleaned up rather than rejected.
fn check_loaded(products: Vec<Product>) -> Result<Vec<Product>> {
    let mut seen = HashSet::with_capacity(products.len());
    let mut checked = Vec::with_capacity(products.len());
    for product in products {
        if product.id == 0 {
            return Err(StockpileError::InvalidData("product id 0".to_string()));
        }
        if !seen.insert(product.id) {
            return Err(StockpileError::InvalidData(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        let fields = NewProduct::from(&product);
        let clean = validation::check_product(fields.clone()).map_err(|violations| {
            StockpileError::InvalidData(format!(
                "product {}: {}",
                product.id,
                validation::messages(&violations).join("; ")
            ))
        })?;
        if clean != fields {
            debug!(id = product.id, name = %clean.name, "Sanitized stored product text");
        }
        checked.push(Product::new(product.id, clean));
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{mouse_and_keyboard, product};
    use crate::store::memory::InMemoryStore;
    use crate::validation::Violation;

    fn loaded(products: Vec<Product>) -> Inventory<InMemoryStore> {
        let mut inventory = Inventory::new(InMemoryStore::with_products(products));
        inventory.load().unwrap();
        inventory
    }

    fn ids(inventory: &Inventory<InMemoryStore>) -> Vec<u32> {
        inventory.find_all().iter().map(|p| p.id).collect()
    }

    #[test]
    fn add_then_find_returns_submitted_fields() {
        let mut inventory = loaded(Vec::new());
        let fields = NewProduct::new("Monitor", "Displays", 4, 899.9);

        let added = inventory.add(fields.clone()).unwrap();
        assert!(added.is_persisted());

        let found = inventory.find_by_id(added.value.id).unwrap();
        assert_eq!(found, &Product::new(1, fields));
    }

    #[test]
    fn add_saves_immediately() {
        let mut inventory = loaded(Vec::new());
        inventory
            .add(NewProduct::new("Monitor", "Displays", 4, 899.9))
            .unwrap();

        assert_eq!(inventory.store().save_count(), 1);
        assert_eq!(inventory.store().products().len(), 1);
    }

    #[test]
    fn deleted_id_is_reused() {
        let mut inventory = loaded(vec![
            product(1, "Mouse", "Electronics", 1, 1.0),
            product(2, "Pen", "Office", 1, 1.0),
            product(3, "Desk", "Furniture", 1, 1.0),
        ]);
        inventory.delete(2).unwrap();

        let added = inventory
            .add(NewProduct::new("Lamp", "Lighting", 2, 30.0))
            .unwrap();
        assert_eq!(added.value.id, 2);
        assert_eq!(ids(&inventory), vec![1, 3, 2]);
    }

    #[test]
    fn add_rejects_invalid_fields_without_mutating() {
        let mut inventory = loaded(mouse_and_keyboard());
        let err = inventory
            .add(NewProduct::new("M", "Electronics", 1, 1.0))
            .unwrap_err();

        assert!(matches!(err, StockpileError::Validation(_)));
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.store().save_count(), 0);
    }

    #[test]
    fn update_applies_only_differing_fields() {
        let mut inventory = loaded(mouse_and_keyboard());
        let patch = ProductPatch {
            name: Some("Mouse".into()),
            quantity: Some(12),
            price: Some(50.0),
            ..Default::default()
        };

        let applied = inventory.update(1, &patch).unwrap();
        match applied.value {
            UpdateOutcome::Changed { product, changes } => {
                assert_eq!(product.quantity, 12);
                assert_eq!(
                    changes,
                    vec![FieldChange::Quantity {
                        before: 10,
                        after: 12
                    }]
                );
            }
            other => panic!("expected a change, got {:?}", other),
        }
        assert_eq!(inventory.store().save_count(), 1);
    }

    #[test]
    fn update_without_differences_is_a_noop_and_does_not_save() {
        let mut inventory = loaded(mouse_and_keyboard());
        let patch = ProductPatch {
            name: Some("  Mouse ".into()),
            category: Some("Electronics".into()),
            ..Default::default()
        };

        let applied = inventory.update(1, &patch).unwrap();
        assert!(!applied.value.is_changed());
        assert_eq!(inventory.store().save_count(), 0);
    }

    #[test]
    fn empty_patch_is_unchanged_without_saving() {
        let mut inventory = loaded(mouse_and_keyboard());
        let applied = inventory.update(2, &ProductPatch::default()).unwrap();

        assert!(!applied.value.is_changed());
        assert_eq!(applied.value.product().name, "Keyboard");
        assert_eq!(inventory.store().save_count(), 0);
    }

    #[test]
    fn update_validates_merged_record() {
        let mut inventory = loaded(mouse_and_keyboard());
        let patch = ProductPatch {
            price: Some(0.0),
            ..Default::default()
        };

        match inventory.update(2, &patch) {
            Err(StockpileError::Validation(v)) => assert_eq!(v, vec![Violation::NonPositivePrice]),
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(inventory.find_by_id(2).unwrap().price, 80.0);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let mut inventory = loaded(mouse_and_keyboard());
        assert!(matches!(
            inventory.update(9, &ProductPatch::default()),
            Err(StockpileError::ProductNotFound(9))
        ));
        assert!(matches!(
            inventory.delete(9),
            Err(StockpileError::ProductNotFound(9))
        ));
        assert_eq!(inventory.store().save_count(), 0);
    }

    #[test]
    fn delete_returns_removed_product_and_saves() {
        let mut inventory = loaded(mouse_and_keyboard());
        let applied = inventory.delete(1).unwrap();

        assert_eq!(applied.value.name, "Mouse");
        assert_eq!(ids(&inventory), vec![2]);
        assert_eq!(inventory.store().products().len(), 1);
    }

    #[test]
    fn failed_save_keeps_in_memory_change() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        let mut inventory = Inventory::new(store);

        let applied = inventory
            .add(NewProduct::new("Mouse", "Electronics", 1, 9.0))
            .unwrap();
        assert!(!applied.is_persisted());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn failed_load_leaves_inventory_empty() {
        let mut store = InMemoryStore::with_products(mouse_and_keyboard());
        store.set_simulate_read_error(true);
        let mut inventory = Inventory::new(store);

        assert!(inventory.load().is_err());
        assert!(inventory.is_empty());
    }

    #[test]
    fn duplicate_ids_on_disk_are_rejected() {
        let mut inventory = Inventory::new(InMemoryStore::with_products(vec![
            product(1, "Mouse", "Electronics", 1, 1.0),
            product(1, "Pen", "Office", 1, 1.0),
        ]));
        assert!(matches!(
            inventory.load(),
            Err(StockpileError::InvalidData(_))
        ));
        assert!(inventory.is_empty());
    }

    #[test]
    fn unsanitized_text_on_disk_is_cleaned_on_load() {
        let mut inventory = Inventory::new(InMemoryStore::with_products(vec![
            product(1, "Mouse", "Electronics", 10, 49.9),
            product(2, "Keyboard ", "Desk ,oak", 3, 120.0),
        ]));

        assert_eq!(inventory.load().unwrap(), 2);
        let keyboard = inventory.find_by_id(2).unwrap();
        assert_eq!(keyboard.name, "Keyboard");
        assert_eq!(keyboard.category, "Desk, oak");
        assert_eq!(keyboard.quantity, 3);

        inventory
            .add(NewProduct::new("Lamp", "Lighting", 1, 1.0))
            .unwrap();
        let names: Vec<_> = inventory
            .store()
            .products()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["Mouse", "Keyboard", "Lamp"]);
    }

    #[test]
    fn invalid_records_on_disk_are_rejected() {
        let mut inventory = Inventory::new(InMemoryStore::with_products(vec![product(
            1,
            "Mouse",
            "Electronics",
            1,
            -5.0,
        )]));
        assert!(inventory.load().is_err());
    }

    #[test]
    fn ids_stay_unique_across_mixed_operations() {
        let mut inventory = loaded(Vec::new());
        for i in 0..6 {
            inventory
                .add(NewProduct::new(format!("Item {}", i), "Misc", i, 1.0))
                .unwrap();
        }
        inventory.delete(2).unwrap();
        inventory.delete(5).unwrap();
        inventory
            .update(
                3,
                &ProductPatch {
                    quantity: Some(40),
                    ..Default::default()
                },
            )
            .unwrap();
        inventory
            .add(NewProduct::new("Late", "Misc", 1, 1.0))
            .unwrap();
        inventory
            .add(NewProduct::new("Later", "Misc", 1, 1.0))
            .unwrap();

        let mut seen = ids(&inventory);
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
        for p in inventory.find_all() {
            assert!(validation::check_product(NewProduct::from(p)).is_ok());
        }
    }
}
