#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn sample() -> Vec<Subscription> {
    vec![
        Subscription {
            id: 1,
            user_id: 1,
            name: "Netflix".into(),
            monthly_cost: dec!(1490),
            annual_plan_cost: dec!(14900),
            annual_savings: dec!(2980),
            created_at: "2024-01-01T00:00:00+00:00".into(),
        },
        Subscription {
            id: 2,
            user_id: 1,
            name: "Disney, Plus".into(),
            monthly_cost: dec!(990),
            annual_plan_cost: dec!(20000),
            annual_savings: dec!(-8120),
            created_at: "2024-01-02T00:00:00+00:00".into(),
        },
    ]
}

#[test]
fn test_export_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subs.csv");
    let count = export_subscriptions(&path, &sample()).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "id,name,monthly_cost,annual_plan_cost,annualized_cost,annual_savings,created_at"
    );
    assert_eq!(
        lines[1],
        "1,Netflix,1490,14900,17880,2980,2024-01-01T00:00:00+00:00"
    );
    // Commas in names are quoted, negative savings kept verbatim
    assert_eq!(
        lines[2],
        "2,\"Disney, Plus\",990,20000,11880,-8120,2024-01-02T00:00:00+00:00"
    );
}

#[test]
fn test_export_empty_list_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(export_subscriptions(&path, &[]).unwrap(), 0);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn test_export_bad_path_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("subs.csv");
    assert!(export_subscriptions(&path, &sample()).is_err());
}
