use serde::{Deserialize, Serialize};
use std::fmt;

/// A product record as it lives in the store and on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: f64,
}

impl Product {
    pub fn new(id: u32, fields: NewProduct) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            quantity: fields.quantity,
            price: fields.price,
        }
    }

    /// Value of the units currently in stock.
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Validated fields for a product that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: f64,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            price,
        }
    }
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            quantity: product.quantity,
            price: product.price,
        }
    }
}

/// A partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }

    /// The fields `product` would have once this patch is applied.
    pub fn merged_with(&self, product: &Product) -> NewProduct {
        NewProduct {
            name: self.name.clone().unwrap_or_else(|| product.name.clone()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| product.category.clone()),
            quantity: self.quantity.unwrap_or(product.quantity),
            price: self.price.unwrap_or(product.price),
        }
    }
}

/// One field changed by an update, with its previous and new value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Name { before: String, after: String },
    Category { before: String, after: String },
    Quantity { before: u32, after: u32 },
    Price { before: f64, after: f64 },
}

impl FieldChange {
    pub fn field(&self) -> &'static str {
        match self {
            FieldChange::Name { .. } => "name",
            FieldChange::Category { .. } => "category",
            FieldChange::Quantity { .. } => "quantity",
            FieldChange::Price { .. } => "price",
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldChange::Name { before, after } => {
                write!(f, "Name: \"{}\" → \"{}\"", before, after)
            }
            FieldChange::Category { before, after } => {
                write!(f, "Category: \"{}\" → \"{}\"", before, after)
            }
            FieldChange::Quantity { before, after } => {
                write!(f, "Quantity: {} → {}", before, after)
            }
            FieldChange::Price { before, after } => {
                write!(f, "Price: {:.2} → {:.2}", before, after)
            }
        }
    }
}

/// Result of applying a [`ProductPatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Changed {
        product: Product,
        changes: Vec<FieldChange>,
    },
    /// Every supplied field already had the requested value.
    Unchanged(Product),
}

impl UpdateOutcome {
    pub fn product(&self) -> &Product {
        match self {
            UpdateOutcome::Changed { product, .. } => product,
            UpdateOutcome::Unchanged(product) => product,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, UpdateOutcome::Changed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> Product {
        Product::new(1, NewProduct::new("Mouse", "Electronics", 10, 50.0))
    }

    #[test]
    fn stock_value_multiplies_price_by_quantity() {
        assert_eq!(mouse().stock_value(), 500.0);
    }

    #[test]
    fn merged_with_keeps_absent_fields() {
        let patch = ProductPatch {
            quantity: Some(3),
            ..Default::default()
        };
        let merged = patch.merged_with(&mouse());
        assert_eq!(merged, NewProduct::new("Mouse", "Electronics", 3, 50.0));
    }

    #[test]
    fn serializes_with_flat_fields() {
        let json = serde_json::to_value(mouse()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Mouse",
                "category": "Electronics",
                "quantity": 10,
                "price": 50.0
            })
        );
    }
}
