//! Tests for covid-model summary types.

use covid_model::{
    CategoryCount, CategoryOrder, Condition, ConditionalCount, GroupedCount, ICU_CONDITIONS,
};

#[test]
fn age_bucket_order_uses_lower_bound() {
    let table = CategoryCount::new(
        "AGE_GROUP",
        [("100+", 1), ("20-29", 4), ("0-9", 2), ("10-19", 3)],
    );
    let sorted = table.sorted(CategoryOrder::AgeBucket);
    assert_eq!(
        sorted.values().collect::<Vec<_>>(),
        vec!["0-9", "10-19", "20-29", "100+"]
    );
    assert_eq!(sorted.total(), table.total());
}

#[test]
fn category_count_serializes_entries() {
    let table = CategoryCount::new("SEX", [("FEMALE", 2), ("MALE", 1)]);
    let json = serde_json::to_value(&table).expect("serialize table");
    assert_eq!(json["field"], "SEX");
    assert_eq!(json["entries"][0]["value"], "FEMALE");
    assert_eq!(json["entries"][0]["count"], 2);
    assert_eq!(json["entries"][1]["count"], 1);
}

#[test]
fn grouped_count_serializes_sparse_entries() {
    let table = GroupedCount::new("AGE_GROUP", "SEX", [(("30-39", "MALE"), 7)]);
    let json = serde_json::to_value(&table).expect("serialize table");
    assert_eq!(json["field_a"], "AGE_GROUP");
    assert_eq!(json["entries"].as_array().map(Vec::len), Some(1));
}

#[test]
fn empty_tables_report_empty() {
    let category = CategoryCount::new("SEX", Vec::<(String, u64)>::new());
    assert!(category.is_empty());
    assert_eq!(category.total(), 0);

    let grouped = GroupedCount::new("A", "B", Vec::<((String, String), u64)>::new());
    assert!(grouped.is_empty());
    assert!(grouped.dense_grid().is_empty());

    let conditional = ConditionalCount::new(
        "ICU == YES",
        0,
        Condition::columns(&ICU_CONDITIONS)
            .into_iter()
            .map(|column| (column, 0)),
    );
    assert_eq!(conditional.len(), 9);
    assert!(conditional.is_all_zero());
}
