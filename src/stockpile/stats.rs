//! # Statistics Aggregator
//!
//! Summary figures derived from a snapshot of the inventory. Nothing here
//! mutates the store.
//!
//! | Figure | Definition |
//! |--------|------------|
//! | `total_quantity` | Sum of quantities |
//! | `total_value` | Sum of `price × quantity` |
//! | `average_unit_value` | `total_value / total_quantity`, 0 when no units |
//! | `categories` | Distinct categories in first-seen order, with share of products |
//! | `low_stock` | Quantity below the configured threshold |
//! | `out_of_stock` | Quantity of zero |
//! | `most_expensive` / `cheapest` | First product in store order holding the extreme price |

use crate::model::Product;

/// Default for [`crate::config::StockpileConfig::low_stock_threshold`].
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Count, units and value of a list of products.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub products: usize,
    pub quantity: u64,
    pub value: f64,
}

impl Totals {
    pub fn of(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |acc, p| Self {
            products: acc.products + 1,
            quantity: acc.quantity + u64::from(p.quantity),
            value: acc.value + p.stock_value(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub products: usize,
    /// Share of all products, 0 to 100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub totals: Totals,
    pub average_unit_value: f64,
    pub categories: Vec<CategoryShare>,
    pub low_stock_threshold: u32,
    pub low_stock: Vec<Product>,
    pub out_of_stock: Vec<Product>,
    pub most_expensive: Option<Product>,
    pub cheapest: Option<Product>,
}

impl Statistics {
    pub fn compute(products: &[Product], low_stock_threshold: u32) -> Self {
        let totals = Totals::of(products);
        let average_unit_value = if totals.quantity > 0 {
            totals.value / totals.quantity as f64
        } else {
            0.0
        };

        Self {
            totals,
            average_unit_value,
            categories: category_shares(products),
            low_stock_threshold,
            low_stock: products
                .iter()
                .filter(|p| p.quantity < low_stock_threshold)
                .cloned()
                .collect(),
            out_of_stock: products
                .iter()
                .filter(|p| p.quantity == 0)
                .cloned()
                .collect(),
            most_expensive: first_by(products, |candidate, best| candidate.price > best.price),
            cheapest: first_by(products, |candidate, best| candidate.price < best.price),
        }
    }
}

fn category_shares(products: &[Product]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    for product in products {
        match shares.iter_mut().find(|s| s.name == product.category) {
            Some(share) => share.products += 1,
            None => shares.push(CategoryShare {
                name: product.category.clone(),
                products: 1,
                percentage: 0.0,
            }),
        }
    }
    let total = products.len() as f64;
    for share in &mut shares {
        share.percentage = share.products as f64 / total * 100.0;
    }
    shares
}

/// Left-to-right reduction: a later product only wins when strictly better.
fn first_by<F>(products: &[Product], better: F) -> Option<Product>
where
    F: Fn(&Product, &Product) -> bool,
{
    products
        .iter()
        .reduce(|best, candidate| if better(candidate, best) { candidate } else { best })
        .cloned()
}
