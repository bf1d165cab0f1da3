#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn signed_in_db() -> (Database, i64) {
    let mut db = Database::open_in_memory().unwrap();
    let session = db.sign_up("me@example.com", "hunter22").unwrap();
    (db, session.user_id)
}

fn make_sub(id: i64, user_id: i64, name: &str, monthly: Decimal) -> Subscription {
    Subscription {
        id,
        user_id,
        name: name.into(),
        monthly_cost: monthly,
        annual_plan_cost: Decimal::ZERO,
        annual_savings: Decimal::ZERO,
        created_at: format!("2024-01-01T00:00:{:02}+00:00", id % 60),
    }
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_current_version() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
    assert_eq!(db.get_subscription_count().unwrap(), 0);
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.migrate().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

// ── Auth ──────────────────────────────────────────────────────

#[test]
fn test_sign_up_starts_session() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(db.session().is_none());
    let session = db.sign_up("  Me@Example.com ", "hunter22").unwrap();
    assert_eq!(session.email, "me@example.com");
    assert_eq!(db.session(), Some(&session));
}

#[test]
fn test_sign_up_rejects_duplicate_email() {
    let (mut db, _) = signed_in_db();
    let err = db.sign_up("ME@example.com", "another1").unwrap_err();
    assert!(matches!(err, BackendError::EmailTaken(_)));
}

#[test]
fn test_sign_up_validates_email() {
    let mut db = Database::open_in_memory().unwrap();
    for bad in ["", "no-at-sign", "@example.com", "me@"] {
        let err = db.sign_up(bad, "hunter22").unwrap_err();
        assert!(matches!(err, BackendError::InvalidEmail(_)), "{bad}");
    }
    assert!(db.session().is_none());
}

#[test]
fn test_sign_up_validates_password_length() {
    let mut db = Database::open_in_memory().unwrap();
    let err = db.sign_up("me@example.com", "12345").unwrap_err();
    assert!(matches!(err, BackendError::WeakPassword(MIN_PASSWORD_LEN)));
}

#[test]
fn test_password_is_hashed() {
    let (db, user_id) = signed_in_db();
    let hash: String = db
        .conn
        .query_row(
            "SELECT password_hash FROM users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(!hash.contains("hunter22"));
}

#[test]
fn test_sign_in_and_out() {
    let (mut db, user_id) = signed_in_db();
    db.sign_out().unwrap();
    assert!(db.session().is_none());

    let session = db.sign_in("me@example.com", "hunter22").unwrap();
    assert_eq!(session.user_id, user_id);
    assert!(db.session().is_some());
}

#[test]
fn test_sign_in_wrong_password_or_email() {
    let (mut db, _) = signed_in_db();
    db.sign_out().unwrap();
    assert!(matches!(
        db.sign_in("me@example.com", "wrong-password"),
        Err(BackendError::InvalidCredentials)
    ));
    assert!(matches!(
        db.sign_in("nobody@example.com", "hunter22"),
        Err(BackendError::InvalidCredentials)
    ));
    assert!(db.session().is_none());
}

#[test]
fn test_sign_out_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.sign_out().unwrap();
    db.sign_out().unwrap();
    assert!(db.session().is_none());
}

#[test]
fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subsave.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.sign_up("me@example.com", "hunter22").unwrap();
    }
    let mut db = Database::open(&path).unwrap();
    assert_eq!(db.session().unwrap().email, "me@example.com");

    db.sign_out().unwrap();
    drop(db);
    let db = Database::open(&path).unwrap();
    assert!(db.session().is_none());
}

// ── Subscriptions ─────────────────────────────────────────────

#[test]
fn test_subscription_calls_require_session() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.list_subscriptions(1),
        Err(BackendError::Unauthenticated)
    ));
    assert!(matches!(
        db.create_subscription(&make_sub(1, 1, "Netflix", dec!(1490))),
        Err(BackendError::Unauthenticated)
    ));
    assert!(matches!(
        db.delete_subscription(1),
        Err(BackendError::Unauthenticated)
    ));
}

#[test]
fn test_create_and_list_subscriptions() {
    let (mut db, user_id) = signed_in_db();
    let mut netflix = make_sub(10, user_id, "Netflix", dec!(1490));
    netflix.annual_plan_cost = dec!(14900);
    netflix.annual_savings = dec!(2980);
    let stored = db.create_subscription(&netflix).unwrap();
    assert_eq!(stored, netflix);

    db.create_subscription(&make_sub(11, user_id, "Spotify", dec!(980)))
        .unwrap();

    let all = db.list_subscriptions(user_id).unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Netflix", "Spotify"]);
    assert_eq!(all[0].annual_savings, dec!(2980));
}

#[test]
fn test_negative_savings_roundtrip() {
    let (mut db, user_id) = signed_in_db();
    let mut sub = make_sub(1, user_id, "X", dec!(1000));
    sub.annual_plan_cost = dec!(20000);
    sub.annual_savings = dec!(-8000);
    db.create_subscription(&sub).unwrap();
    let all = db.list_subscriptions(user_id).unwrap();
    assert_eq!(all[0].annual_savings, dec!(-8000));
}

#[test]
fn test_fractional_costs_roundtrip() {
    let (mut db, user_id) = signed_in_db();
    db.create_subscription(&make_sub(1, user_id, "App", dec!(9.99)))
        .unwrap();
    let all = db.list_subscriptions(user_id).unwrap();
    assert_eq!(all[0].monthly_cost, dec!(9.99));
}

#[test]
fn test_list_ordered_by_creation_time() {
    let (mut db, user_id) = signed_in_db();
    let mut late = make_sub(1, user_id, "Late", dec!(1));
    late.created_at = "2024-02-01T00:00:00+00:00".into();
    let mut early = make_sub(2, user_id, "Early", dec!(1));
    early.created_at = "2024-01-01T00:00:00+00:00".into();
    db.create_subscription(&late).unwrap();
    db.create_subscription(&early).unwrap();

    let names: Vec<String> = db
        .list_subscriptions(user_id)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Early", "Late"]);
}

#[test]
fn test_duplicate_id_is_storage_error() {
    let (mut db, user_id) = signed_in_db();
    db.create_subscription(&make_sub(1, user_id, "A", dec!(1)))
        .unwrap();
    let err = db
        .create_subscription(&make_sub(1, user_id, "B", dec!(2)))
        .unwrap_err();
    assert!(matches!(err, BackendError::Storage(_)));
    assert_eq!(db.list_subscriptions(user_id).unwrap().len(), 1);
}

#[test]
fn test_delete_subscription() {
    let (mut db, user_id) = signed_in_db();
    db.create_subscription(&make_sub(1, user_id, "A", dec!(1)))
        .unwrap();
    db.create_subscription(&make_sub(2, user_id, "B", dec!(2)))
        .unwrap();

    db.delete_subscription(1).unwrap();
    let all = db.list_subscriptions(user_id).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "B");

    // Unknown id is not an error
    db.delete_subscription(1).unwrap();
    db.delete_subscription(999).unwrap();
    assert_eq!(db.list_subscriptions(user_id).unwrap().len(), 1);
}

#[test]
fn test_users_are_isolated() {
    let (mut db, alice) = signed_in_db();
    db.create_subscription(&make_sub(1, alice, "Alice's", dec!(1)))
        .unwrap();
    db.sign_out().unwrap();

    let bob = db.sign_up("bob@example.com", "bobbobbob").unwrap().user_id;
    assert!(db.list_subscriptions(bob).unwrap().is_empty());
    assert!(matches!(
        db.list_subscriptions(alice),
        Err(BackendError::Forbidden)
    ));
    assert!(matches!(
        db.create_subscription(&make_sub(2, alice, "Sneaky", dec!(1))),
        Err(BackendError::Forbidden)
    ));

    // Bob cannot delete Alice's row
    db.delete_subscription(1).unwrap();
    assert_eq!(db.get_subscription_count().unwrap(), 1);
}

#[test]
fn test_max_subscription_id_spans_users() {
    let (mut db, user_id) = signed_in_db();
    assert_eq!(db.max_subscription_id().unwrap(), None);
    db.create_subscription(&make_sub(70, user_id, "Netflix", dec!(1490)))
        .unwrap();
    db.sign_out().unwrap();
    db.sign_up("other@example.com", "hunter22").unwrap();
    assert_eq!(db.max_subscription_id().unwrap(), Some(70));
}
