use colored::Colorize;
use stockpile::api::{CmdMessage, MessageLevel};
use stockpile::config::StockpileConfig;
use stockpile::model::Product;
use stockpile::stats::{Statistics, Totals};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 5;
const NAME_WIDTH: usize = 30;
const CATEGORY_WIDTH: usize = 20;
const QUANTITY_WIDTH: usize = 9;
const PRICE_WIDTH: usize = 12;
const RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_products(products: &[Product]) {
    if products.is_empty() {
        return;
    }

    println!(
        "{} {} {} {} {}",
        pad_right("ID", ID_WIDTH).bold(),
        pad_right("Name", NAME_WIDTH).bold(),
        pad_right("Category", CATEGORY_WIDTH).bold(),
        pad_left("Qty", QUANTITY_WIDTH).bold(),
        pad_left("Price", PRICE_WIDTH).bold(),
    );
    println!("{}", RULE.dimmed());

    for product in products {
        let quantity = pad_left(&product.quantity.to_string(), QUANTITY_WIDTH);
        let quantity = if product.quantity == 0 {
            quantity.red()
        } else {
            quantity.normal()
        };

        println!(
            "{} {} {} {} {}",
            pad_right(&product.id.to_string(), ID_WIDTH).yellow(),
            pad_right(&truncate_to_width(&product.name, NAME_WIDTH), NAME_WIDTH),
            pad_right(
                &truncate_to_width(&product.category, CATEGORY_WIDTH),
                CATEGORY_WIDTH
            )
            .dimmed(),
            quantity,
            pad_left(&format!("{:.2}", product.price), PRICE_WIDTH),
        );
    }
}

pub(super) fn print_totals(totals: &Totals) {
    println!("{}", RULE.dimmed());
    println!(
        "{} product(s), {} unit(s) in stock, stock value {:.2}",
        totals.products, totals.quantity, totals.value
    );
}

pub(super) fn print_product_details(products: &[Product]) {
    for (i, product) in products.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            format!("#{}", product.id).yellow(),
            product.name.bold()
        );
        println!("  Category:    {}", product.category);
        println!("  Quantity:    {}", product.quantity);
        println!("  Unit price:  {:.2}", product.price);
        println!("  Stock value: {:.2}", product.stock_value());
    }
}

pub(super) fn print_statistics(stats: &Statistics) {
    println!("{}", "Inventory".bold());
    println!("  Products:            {}", stats.totals.products);
    println!("  Units in stock:      {}", stats.totals.quantity);
    println!("  Stock value:         {:.2}", stats.totals.value);
    println!("  Average unit value:  {:.2}", stats.average_unit_value);

    if let Some(product) = &stats.most_expensive {
        println!(
            "  Most expensive:      {} ({:.2})",
            product.name, product.price
        );
    }
    if let Some(product) = &stats.cheapest {
        println!("  Cheapest:            {} ({:.2})", product.name, product.price);
    }

    println!();
    println!("{}", "Categories".bold());
    for category in &stats.categories {
        println!(
            "  {} {:>4} product(s) {:>6.1}%",
            pad_right(
                &truncate_to_width(&category.name, CATEGORY_WIDTH),
                CATEGORY_WIDTH
            ),
            category.products,
            category.percentage
        );
    }

    println!();
    if stats.out_of_stock.is_empty() {
        println!("{}", "No products out of stock.".green());
    } else {
        println!(
            "{}",
            format!("Out of stock ({}):", stats.out_of_stock.len())
                .red()
                .bold()
        );
        print_products(&stats.out_of_stock);
    }

    println!();
    if stats.low_stock.is_empty() {
        println!(
            "{}",
            format!("No products below {} units.", stats.low_stock_threshold).green()
        );
    } else {
        println!(
            "{}",
            format!(
                "Low stock, below {} units ({}):",
                stats.low_stock_threshold,
                stats.low_stock.len()
            )
            .yellow()
            .bold()
        );
        print_products(&stats.low_stock);
    }
}

pub(super) fn print_config(config: &StockpileConfig) {
    for key in StockpileConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(s.width())), s)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept() {
        assert_eq!(truncate_to_width("Mouse", 30), "Mouse");
    }

    #[test]
    fn long_text_ends_with_ellipsis_within_width() {
        let name = "Extra long mechanical keyboard with RGB lighting";
        let cut = truncate_to_width(name, 30);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.width(), 30);
    }

    #[test]
    fn wide_characters_count_double() {
        let cut = truncate_to_width("日本語のキーボード", 8);
        assert!(cut.width() <= 8);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
