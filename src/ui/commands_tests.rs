#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::config::Config;

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let app = App::new(&Config::default());
    (app, db)
}

fn run(input: &str, app: &mut App, db: &mut Database) {
    handle_command(input, app, db).unwrap();
}

#[test]
fn test_split_add_args() {
    assert_eq!(
        split_add_args("Netflix, 15.49, 149"),
        ("Netflix".into(), "15.49".into(), "149".into())
    );
    assert_eq!(
        split_add_args("Office 365,9.99"),
        ("Office 365".into(), "9.99".into(), String::new())
    );
    assert_eq!(
        split_add_args(", 10"),
        (String::new(), "10".into(), String::new())
    );
    assert_eq!(
        split_add_args("Odd, 1, 2, 3"),
        ("Odd".into(), "1".into(), "2, 3".into())
    );
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("budget", "budget"), 0);
    assert_eq!(levenshtein("budgte", "budget"), 2);
    assert_eq!(levenshtein("", "abc"), 3);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    run("sigin", &mut app, &mut db);
    assert!(app.status_message.starts_with("Unknown command: :sigin"));
    assert!(app.status_message.contains(":signin"));
}

#[test]
fn test_navigation_commands() {
    let (mut app, mut db) = setup();
    run("subs", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Subscriptions);
    run("account", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Account);
    run("d", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Dashboard);
    run("help", &mut app, &mut db);
    assert!(app.show_help);
    run("q", &mut app, &mut db);
    assert!(!app.running);
}

#[test]
fn test_signup_signin_signout() {
    let (mut app, mut db) = setup();
    run("signup me@example.com hunter22", &mut app, &mut db);
    assert_eq!(app.session.as_ref().unwrap().email, "me@example.com");

    run("signout", &mut app, &mut db);
    assert!(app.session.is_none());
    assert_eq!(app.status_message, "Signed out");

    run("signin me@example.com wrong-password", &mut app, &mut db);
    assert!(app.session.is_none());
    assert!(app.status_message.starts_with("Sign in failed"));

    run("signin me@example.com hunter22", &mut app, &mut db);
    assert!(app.session.is_some());
    assert!(app.status_message.contains("0 subscriptions"));
}

#[test]
fn test_signin_usage() {
    let (mut app, mut db) = setup();
    run("signin me@example.com", &mut app, &mut db);
    assert_eq!(app.status_message, "Usage: :signin <email> <password>");
}

#[test]
fn test_add_requires_session() {
    let (mut app, mut db) = setup();
    run("add Netflix, 15", &mut app, &mut db);
    assert!(app.tracker.subscriptions().is_empty());
    assert!(app.status_message.starts_with("Sign in first"));
}

#[test]
fn test_add_with_args_and_summary() {
    let (mut app, mut db) = setup();
    run("signup me@example.com hunter22", &mut app, &mut db);
    run("add Netflix, 15, 150", &mut app, &mut db);
    run("a Spotify, 10", &mut app, &mut db);

    assert_eq!(app.screen, Screen::Add);
    let summary = app.tracker.summary();
    assert_eq!(summary.total_monthly, dec!(25));
    assert_eq!(summary.total_savings_opportunity, dec!(30));
}

#[test]
fn test_add_without_args_opens_form() {
    let (mut app, mut db) = setup();
    run("signup me@example.com hunter22", &mut app, &mut db);
    run("add", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Add);
    assert_eq!(app.input_mode, InputMode::Editing);
}

#[test]
fn test_budget_command() {
    let (mut app, mut db) = setup();
    run("budget 5000", &mut app, &mut db);
    assert_eq!(app.tracker.budget(), dec!(5000));
    assert_eq!(app.status_message, "Monthly budget set to ¥5,000");

    run("budget -1", &mut app, &mut db);
    assert_eq!(app.tracker.budget(), dec!(5000));
    assert!(app.status_message.starts_with("Budget unchanged"));

    run("budget abc", &mut app, &mut db);
    assert_eq!(app.tracker.budget(), dec!(5000));
}

#[test]
fn test_policy_command() {
    let (mut app, mut db) = setup();
    run("policy raw", &mut app, &mut db);
    assert_eq!(app.tracker.policy(), SavingsPolicy::Raw);
    run("policy bogus", &mut app, &mut db);
    assert_eq!(app.tracker.policy(), SavingsPolicy::Raw);
    assert!(app.status_message.starts_with("Unknown policy"));
}

#[test]
fn test_delete_needs_list_screen() {
    let (mut app, mut db) = setup();
    run("signup me@example.com hunter22", &mut app, &mut db);
    run("add Netflix, 15", &mut app, &mut db);

    run("delete", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Normal);

    run("subs", &mut app, &mut db);
    run("delete", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(app.pending_action.is_some());
}

#[test]
fn test_export_command() {
    let (mut app, mut db) = setup();
    run("signup me@example.com hunter22", &mut app, &mut db);
    run("add Netflix, 15", &mut app, &mut db);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subs.csv");
    run(&format!("export {}", path.display()), &mut app, &mut db);
    assert!(app.status_message.starts_with("Exported 1 subscriptions"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Netflix"));
}
