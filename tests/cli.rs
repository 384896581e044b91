use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn stockpile(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stockpile").unwrap();
    cmd.env("STOCKPILE_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("STOCKPILE_LOG");
    cmd
}

fn add(home: &Path, name: &str, category: &str, quantity: &str, price: &str) {
    stockpile(home)
        .args(["add", name, category, quantity, price])
        .assert()
        .success();
}

fn read_products(home: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(home.join("products.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn add_then_list_shows_product_and_totals() {
    let temp = tempfile::tempdir().unwrap();

    stockpile(temp.path())
        .args(["add", "Wireless Mouse", "Electronics", "10", "49.90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product added (ID 1): Wireless Mouse"))
        .stdout(predicate::str::contains("Stock value: 499.00"));

    stockpile(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wireless Mouse"))
        .stdout(predicate::str::contains("49.90"))
        .stdout(predicate::str::contains("1 product(s), 10 unit(s) in stock"));
}

#[test]
fn data_file_is_a_json_array_of_records() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Keyboard", "Electronics", "3", "120");

    let products = read_products(temp.path());
    let first = &products.as_array().unwrap()[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Keyboard");
    assert_eq!(first["category"], "Electronics");
    assert_eq!(first["quantity"], 3);
    assert_eq!(first["price"], 120.0);
}

#[test]
fn invalid_input_is_rejected_with_every_reason() {
    let temp = tempfile::tempdir().unwrap();

    stockpile(temp.path())
        .args(["add", "M", "Electronics", "-1", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please fix the following errors:"))
        .stdout(predicate::str::contains("Name must have at least 2 characters"))
        .stdout(predicate::str::contains("Quantity cannot be negative"))
        .stdout(predicate::str::contains("Price must be greater than zero"));

    assert!(!temp.path().join("products.json").exists());
}

#[test]
fn deleted_id_is_reused() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Lamp one", "Lighting", "1", "10");
    add(temp.path(), "Lamp two", "Lighting", "1", "10");
    add(temp.path(), "Lamp three", "Lighting", "1", "10");

    stockpile(temp.path())
        .args(["delete", "2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product deleted (ID 2): Lamp two"));

    stockpile(temp.path())
        .args(["add", "Lamp four", "Lighting", "1", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product added (ID 2): Lamp four"));
}

#[test]
fn delete_asks_for_confirmation() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Desk lamp", "Lighting", "2", "15");

    stockpile(temp.path())
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled."));
    assert_eq!(read_products(temp.path()).as_array().unwrap().len(), 1);

    stockpile(temp.path())
        .args(["delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Product deleted (ID 1)"));
    assert_eq!(read_products(temp.path()).as_array().unwrap().len(), 0);
}

#[test]
fn unknown_id_fails() {
    let temp = tempfile::tempdir().unwrap();

    stockpile(temp.path())
        .args(["show", "42"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Product with ID 42 not found."));

    stockpile(temp.path())
        .args(["delete", "42", "-y"])
        .assert()
        .failure();
}

#[test]
fn search_by_id_and_by_text() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Wireless Mouse", "Electronics", "10", "49.90");
    add(temp.path(), "Coffee beans", "Groceries", "4", "12.5");

    stockpile(temp.path())
        .args(["search", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee beans"))
        .stdout(predicate::str::contains("Wireless Mouse").not());

    stockpile(temp.path())
        .args(["search", "ELECTRO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 product(s) found."))
        .stdout(predicate::str::contains("Wireless Mouse"));

    stockpile(temp.path())
        .args(["search", "nothing here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found"));
}

#[test]
fn update_reports_changes_and_no_op() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Keyboard", "Electronics", "3", "120");

    stockpile(temp.path())
        .args(["update", "1", "--quantity", "7", "--price", "99.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product updated (ID 1): Keyboard"))
        .stdout(predicate::str::contains("Quantity: 3 → 7"));

    stockpile(temp.path())
        .args(["update", "1", "--quantity", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes were made."));

    stockpile(temp.path())
        .args(["update", "1", "--quantity", "2.5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Quantity must be a whole number"));

    let products = read_products(temp.path());
    assert_eq!(products[0]["quantity"], 7);
    assert_eq!(products[0]["price"], 99.5);
}

#[test]
fn list_filters_and_sorts() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Zebra pen", "Office", "50", "2");
    add(temp.path(), "Apple", "Groceries", "5", "1");
    add(temp.path(), "Monitor", "Electronics", "2", "300");

    let output = stockpile(temp.path())
        .args(["list", "--sort", "name"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let apple = stdout.find("Apple").unwrap();
    let monitor = stdout.find("Monitor").unwrap();
    let zebra = stdout.find("Zebra pen").unwrap();
    assert!(apple < monitor && monitor < zebra);

    stockpile(temp.path())
        .args(["list", "--category", "office"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zebra pen"))
        .stdout(predicate::str::contains("Monitor").not());

    stockpile(temp.path())
        .args(["list", "-c", "garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found in category"));
}

#[test]
fn stats_summarize_inventory() {
    let temp = tempfile::tempdir().unwrap();

    stockpile(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No products registered"));

    add(temp.path(), "Monitor", "Electronics", "2", "300");
    add(temp.path(), "Cable", "Electronics", "0", "5");
    add(temp.path(), "Apple", "Groceries", "40", "1");

    stockpile(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Products:            3"))
        .stdout(predicate::str::contains("Stock value:         640.00"))
        .stdout(predicate::str::contains("Most expensive:      Monitor"))
        .stdout(predicate::str::contains("Cheapest:            Apple"))
        .stdout(predicate::str::contains("Out of stock (1):"))
        .stdout(predicate::str::contains("Low stock, below 5 units (2):"));
}

#[test]
fn corrupt_data_file_still_starts_empty() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("products.json"), "{ not json").unwrap();

    stockpile(temp.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not load products"))
        .stdout(predicate::str::contains("No products registered."));
}

#[test]
fn config_threshold_changes_stats() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Apple", "Groceries", "40", "1");

    stockpile(temp.path())
        .args(["config", "low-stock-threshold", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("low-stock-threshold set to 50"));

    stockpile(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("data-file = products.json"))
        .stdout(predicate::str::contains("low-stock-threshold = 50"));

    stockpile(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Low stock, below 50 units (1):"));

    stockpile(temp.path())
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn config_file_is_never_used_as_data_file() {
    let temp = tempfile::tempdir().unwrap();

    stockpile(temp.path())
        .args(["config", "data-file", "config.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid data file name"));

    add(temp.path(), "Mouse", "Electronics", "10", "49.90");

    stockpile(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("data-file = products.json"));
    assert_eq!(read_products(temp.path()).as_array().unwrap().len(), 1);
}
