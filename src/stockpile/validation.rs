//! Product field validation.
//!
//! Free text goes through [`sanitize`] before it is measured or stored:
//! - Leading and trailing whitespace is trimmed
//! - Quotes (`'`, `"`, `` ` ``) and angle brackets (`<`, `>`) are stripped
//! - Whitespace runs collapse to a single space
//! - Commas are followed by exactly one space and preceded by none
//!
//! Numeric fields arrive as raw text and must parse completely: `"10abc"` is
//! not a quantity.
//!
//! ```
//! use stockpile::validation::{validate, Violation};
//!
//! assert!(validate("Mouse", "Electronics", "10", "49.90").is_empty());
//! assert_eq!(
//!     validate("Mouse", "Electronics", "-1", "49.90"),
//!     vec![Violation::NegativeQuantity]
//! );
//! ```

use crate::model::NewProduct;
use std::fmt;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const CATEGORY_MIN_LEN: usize = 2;
pub const CATEGORY_MAX_LEN: usize = 50;
pub const MAX_QUANTITY: u32 = 1_000_000;
pub const MAX_PRICE: f64 = 1_000_000.0;

const STRIPPED_CHARS: [char; 5] = ['\'', '"', '`', '<', '>'];

/// The product field a [`Violation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Quantity,
    Price,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Category => "Category",
            Field::Quantity => "Quantity",
            Field::Price => "Price",
        };
        f.write_str(label)
    }
}

/// A broken field constraint. `Display` gives the message shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    TooShort { field: Field, min: usize },
    TooLong { field: Field, max: usize },
    NotANumber(Field),
    NegativeQuantity,
    QuantityTooHigh,
    FractionalQuantity,
    NonPositivePrice,
    PriceTooHigh,
}

impl Violation {
    pub fn field(&self) -> Field {
        match self {
            Violation::TooShort { field, .. }
            | Violation::TooLong { field, .. }
            | Violation::NotANumber(field) => *field,
            Violation::NegativeQuantity
            | Violation::QuantityTooHigh
            | Violation::FractionalQuantity => Field::Quantity,
            Violation::NonPositivePrice | Violation::PriceTooHigh => Field::Price,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TooShort { field, min } => {
                write!(f, "{} must have at least {} characters", field, min)
            }
            Violation::TooLong { field, max } => {
                write!(f, "{} is too long (max. {} characters)", field, max)
            }
            Violation::NotANumber(field) => write!(f, "{} must be a number", field),
            Violation::NegativeQuantity => write!(f, "Quantity cannot be negative"),
            Violation::QuantityTooHigh => write!(f, "Quantity is too high (max. 1,000,000)"),
            Violation::FractionalQuantity => write!(f, "Quantity must be a whole number"),
            Violation::NonPositivePrice => write!(f, "Price must be greater than zero"),
            Violation::PriceTooHigh => write!(f, "Price is too high (max. 1,000,000)"),
        }
    }
}

impl std::error::Error for Violation {}

/// Renders violations as the human-readable reasons, in order.
pub fn messages(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(ToString::to_string).collect()
}

/// Cleans free text before validation or storage. Idempotent.
pub fn sanitize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    space_commas(&collapsed).trim().to_string()
}

fn space_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ',' {
            out.push(c);
            continue;
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push_str(", ");
        while chars.peek().is_some_and(|next| next.is_whitespace()) {
            chars.next();
        }
    }
    out
}

fn validate_text(raw: &str, field: Field, min: usize, max: usize) -> Result<String, Violation> {
    let clean = sanitize(raw);
    let len = clean.chars().count();
    if len < min {
        return Err(Violation::TooShort { field, min });
    }
    if len > max {
        return Err(Violation::TooLong { field, max });
    }
    Ok(clean)
}

/// Parses text that must be a finite number in its entirety.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Returns the sanitized name.
pub fn validate_name(raw: &str) -> Result<String, Violation> {
    validate_text(raw, Field::Name, NAME_MIN_LEN, NAME_MAX_LEN)
}

/// Returns the sanitized category.
pub fn validate_category(raw: &str) -> Result<String, Violation> {
    validate_text(raw, Field::Category, CATEGORY_MIN_LEN, CATEGORY_MAX_LEN)
}

pub fn validate_quantity(raw: &str) -> Result<u32, Violation> {
    let value = parse_number(raw).ok_or(Violation::NotANumber(Field::Quantity))?;
    if value < 0.0 {
        return Err(Violation::NegativeQuantity);
    }
    if value > f64::from(MAX_QUANTITY) {
        return Err(Violation::QuantityTooHigh);
    }
    if value.fract() != 0.0 {
        return Err(Violation::FractionalQuantity);
    }
    // Bounded to 0..=MAX_QUANTITY and integral above.
    Ok(value as u32)
}

pub fn validate_price(raw: &str) -> Result<f64, Violation> {
    let value = parse_number(raw).ok_or(Violation::NotANumber(Field::Price))?;
    if value <= 0.0 {
        return Err(Violation::NonPositivePrice);
    }
    if value > MAX_PRICE {
        return Err(Violation::PriceTooHigh);
    }
    Ok(value)
}

/// Runs every field check and returns the violations in field order.
/// An empty list means the input is valid.
pub fn validate(name: &str, category: &str, quantity: &str, price: &str) -> Vec<Violation> {
    match parse_new_product(name, category, quantity, price) {
        Ok(_) => Vec::new(),
        Err(violations) => violations,
    }
}

/// Validates raw input and converts it into typed product fields.
pub fn parse_new_product(
    name: &str,
    category: &str,
    quantity: &str,
    price: &str,
) -> Result<NewProduct, Vec<Violation>> {
    let name = validate_name(name);
    let category = validate_category(category);
    let quantity = validate_quantity(quantity);
    let price = validate_price(price);

    match (name, category, quantity, price) {
        (Ok(name), Ok(category), Ok(quantity), Ok(price)) => Ok(NewProduct {
            name,
            category,
            quantity,
            price,
        }),
        (name, category, quantity, price) => Err([
            name.err(),
            category.err(),
            quantity.err(),
            price.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

/// Checks already-typed fields, returning them with text fields sanitized.
pub fn check_product(fields: NewProduct) -> Result<NewProduct, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = validate_name(&fields.name).map_err(|v| violations.push(v)).ok();
    let category = validate_category(&fields.category)
        .map_err(|v| violations.push(v))
        .ok();
    if fields.quantity > MAX_QUANTITY {
        violations.push(Violation::QuantityTooHigh);
    }
    if !fields.price.is_finite() {
        violations.push(Violation::NotANumber(Field::Price));
    } else if fields.price <= 0.0 {
        violations.push(Violation::NonPositivePrice);
    } else if fields.price > MAX_PRICE {
        violations.push(Violation::PriceTooHigh);
    }

    match (name, category) {
        (Some(name), Some(category)) if violations.is_empty() => Ok(NewProduct {
            name,
            category,
            ..fields
        }),
        _ => Err(violations),
    }
}
