mod common;

use common::record;
use menuiq::domain::model::DEFAULT_CATEGORY;
use menuiq::domain::validation::record::{
    AVAILABILITY_INVALID, COST_INVALID, NAME_REQUIRED, PRICE_REQUIRED, SALES_COUNT_INVALID,
};
use menuiq::domain::validation::{validate, validate_all};
use serde_json::json;

#[test]
fn blank_name_reports_only_the_name_rule() {
    let errors = validate(&record(json!({"name": "", "price": "5"}))).unwrap_err();
    assert_eq!(errors, vec![NAME_REQUIRED.to_string()]);
}

#[test]
fn minimal_item_is_accepted_with_defaults() {
    let item = validate(&record(json!({"name": "Soup", "price": "5.00"}))).expect("valid item");

    assert_eq!(item.name, "Soup");
    assert_eq!(item.price, 5.0);
    assert_eq!(item.cost, 0.0);
    assert_eq!(item.category, DEFAULT_CATEGORY);
    assert!(item.tags.is_empty());
    assert_eq!(item.sales_count, 0);
    assert!(item.is_available);
    assert_eq!(item.description, None);
}

#[test]
fn all_violations_are_collected_in_rule_order() {
    let errors = validate(&record(json!({
        "name": "   ",
        "price": "free",
        "cost": "-1",
        "sales_count": "2.5",
        "is_available": "maybe"
    })))
    .unwrap_err();

    assert_eq!(
        errors,
        vec![
            NAME_REQUIRED.to_string(),
            PRICE_REQUIRED.to_string(),
            COST_INVALID.to_string(),
            SALES_COUNT_INVALID.to_string(),
            AVAILABILITY_INVALID.to_string(),
        ]
    );
}

#[test]
fn price_must_be_positive_and_finite() {
    for price in [json!("0"), json!(-3), json!("inf"), json!("NaN"), json!(true), json!(null)] {
        let errors = validate(&record(json!({"name": "Soup", "price": price}))).unwrap_err();
        assert_eq!(errors, vec![PRICE_REQUIRED.to_string()], "price {price}");
    }
}

#[test]
fn sub_cent_price_is_not_a_price() {
    let errors = validate(&record(json!({"name": "Mint", "price": "0.001", "cost": "0.0005"})))
        .unwrap_err();
    assert_eq!(errors, vec![PRICE_REQUIRED.to_string()]);
}

#[test]
fn amounts_are_rounded_to_cents() {
    let item = validate(&record(json!({"name": "Mint", "price": "2.006", "cost": "0.004"})))
        .expect("valid item");

    assert_eq!(item.price, 2.01);
    assert_eq!(item.cost, 0.0);
    assert_eq!(item.profit_margin(), 0.0);
}

#[test]
fn name_must_be_text() {
    let errors = validate(&record(json!({"name": 42, "price": 5}))).unwrap_err();
    assert_eq!(errors, vec![NAME_REQUIRED.to_string()]);
}

#[test]
fn csv_style_strings_are_normalized() {
    let item = validate(&record(json!({
        "name": "  Grilled Atlantic Salmon ",
        "description": "  ",
        "price": " 28.99",
        "cost": "12.50",
        "category": " Main Course ",
        "tags": "seafood, healthy,, gluten-free ",
        "sales_count": "89",
        "is_available": "No"
    })))
    .expect("valid item");

    assert_eq!(item.name, "Grilled Atlantic Salmon");
    assert_eq!(item.description, None);
    assert_eq!(item.category, "Main Course");
    assert_eq!(item.tags, vec!["seafood", "healthy", "gluten-free"]);
    assert_eq!(item.sales_count, 89);
    assert!(!item.is_available);
    assert!((item.profit_margin() - 56.88).abs() < 0.01);
}

#[test]
fn json_arrays_and_booleans_are_accepted() {
    let item = validate(&record(json!({
        "name": "Tiramisu",
        "price": 10.99,
        "cost": 3.25,
        "tags": [" dessert", "italian", ""],
        "sales_count": 62,
        "is_available": true
    })))
    .expect("valid item");

    assert_eq!(item.tags, vec!["dessert", "italian"]);
    assert_eq!(item.sales_count, 62);
}

#[test]
fn sales_count_bounds() {
    for bad in [json!(-1), json!("1e12"), json!(1.5)] {
        let errors = validate(&record(json!({"name": "A", "price": 1, "sales_count": bad})))
            .unwrap_err();
        assert_eq!(errors, vec![SALES_COUNT_INVALID.to_string()]);
    }
    let item = validate(&record(json!({"name": "A", "price": 1, "sales_count": ""}))).unwrap();
    assert_eq!(item.sales_count, 0);
}

#[test]
fn rows_are_partitioned_with_one_based_positions() {
    let records = vec![
        record(json!({"name": "A", "price": "1"})),
        record(json!({"name": "", "price": "1"})),
        record(json!({"name": "C", "price": "3"})),
        record(json!({"price": "x"})),
    ];
    let partition = validate_all(&records);

    assert_eq!(partition.valid.len(), 2);
    let rows: Vec<usize> = partition.errors.iter().map(|e| e.row_index).collect();
    assert_eq!(rows, vec![2, 4]);
    assert_eq!(
        partition.errors[1].errors,
        vec![NAME_REQUIRED.to_string(), PRICE_REQUIRED.to_string()]
    );
}
