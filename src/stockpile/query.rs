//! # Query Engine
//!
//! Read-only views over a snapshot of the inventory. Every function takes the
//! products in store order and returns a new list; nothing is mutated.
//!
//! ## Search
//!
//! [`search`] has two modes. A term that parses completely as a number is an
//! id lookup and matches at most one product, even when names or categories
//! contain that number. Any other term is a case-insensitive substring match
//! against name or category.
//!
//! ## Sorting
//!
//! All sorts are ascending and stable: products that compare equal keep their
//! store order.

use crate::model::Product;
use crate::validation::parse_number;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordering applied by [`ListQuery`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Insertion,
    Name,
    Quantity,
    Price,
}

/// A category filter plus a sort, as used by `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub sort: SortKey,
}

impl ListQuery {
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let filtered = match &self.category {
            Some(term) => filter_by_category(products, term),
            None => products.to_vec(),
        };
        match self.sort {
            SortKey::Insertion => filtered,
            SortKey::Name => sort_by_name(&filtered),
            SortKey::Quantity => sort_by_quantity(&filtered),
            SortKey::Price => sort_by_price(&filtered),
        }
    }
}

/// Products whose category contains `term`, ignoring case.
pub fn filter_by_category(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.category.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn sort_by_name(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| compare_names(&a.name, &b.name));
    sorted
}

pub fn sort_by_quantity(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by_key(|p| p.quantity);
    sorted
}

pub fn sort_by_price(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    sorted
}

/// Id lookup for numeric terms, name/category substring match otherwise.
///
/// A numeric term is a finite decimal such as `2`, `2.0` or ` 7 `; forms like
/// `Infinity` or `0x1F` are searched as text.
pub fn search(products: &[Product], term: &str) -> Vec<Product> {
    if let Some(number) = parse_number(term) {
        return products
            .iter()
            .filter(|p| f64::from(p.id) == number)
            .cloned()
            .collect();
    }

    let needle = term.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Dictionary-style comparison, in three passes: base letters (accents and
/// case ignored), then accents, then case with lowercase first.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
