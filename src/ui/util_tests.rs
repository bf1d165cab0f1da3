#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("netflix", 10), "netflix");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("adobe creative cloud", 8), "adobe c…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("anything", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("会员订阅服务", 4), "会员订…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_whole_value_has_no_fraction() {
    assert_eq!(format_amount(dec!(1490), "¥"), "¥1,490");
}

#[test]
fn test_format_amount_fraction_two_places() {
    assert_eq!(format_amount(dec!(12.5), "$"), "$12.50");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0), "¥"), "¥0");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-200), "¥"), "-¥200");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.89), "$"), "$1,234,567.89");
}

#[test]
fn test_format_amount_empty_symbol() {
    assert_eq!(format_amount(dec!(10000), ""), "10,000");
}

// ── mask_secret ────────────────────────────────────────────

#[test]
fn test_mask_secret_hides_password() {
    assert_eq!(mask_secret("signin a@b.io hunter2"), "signin a@b.io *******");
    assert_eq!(mask_secret("signup a@b.io abc"), "signup a@b.io ***");
}

#[test]
fn test_mask_secret_leaves_other_commands() {
    assert_eq!(mask_secret("budget 5000"), "budget 5000");
    assert_eq!(mask_secret("signin a@b.io"), "signin a@b.io");
}

// ── shellexpand ────────────────────────────────────────────

#[test]
fn test_shellexpand_plain_path_unchanged() {
    assert_eq!(shellexpand("/tmp/subs.csv"), "/tmp/subs.csv");
}

#[test]
fn test_shellexpand_home_prefix() {
    let expanded = shellexpand("~/subs.csv");
    assert!(expanded.ends_with("/subs.csv"));
    assert!(!expanded.starts_with('~'));
}

// ── donut_points ───────────────────────────────────────────

#[test]
fn test_donut_empty_and_full() {
    let (filled, empty) = donut_points(0.0, 3, 40);
    assert!(filled.is_empty());
    assert_eq!(empty.len(), 120);

    let (filled, empty) = donut_points(1.0, 3, 40);
    assert_eq!(filled.len(), 120);
    assert!(empty.is_empty());
}

#[test]
fn test_donut_half_and_clamped() {
    let (filled, empty) = donut_points(0.5, 2, 40);
    assert_eq!(filled.len(), 40);
    assert_eq!(empty.len(), 40);

    let (filled, _) = donut_points(3.0, 2, 10);
    assert_eq!(filled.len(), 20);
}

#[test]
fn test_donut_points_stay_on_ring() {
    let (filled, empty) = donut_points(0.3, 4, 24);
    for (x, y) in filled.iter().chain(empty.iter()) {
        let r = (x * x + y * y).sqrt();
        assert!((0.59..=1.01).contains(&r), "radius {r}");
    }
}

#[test]
fn test_donut_starts_at_top() {
    let (filled, _) = donut_points(0.1, 1, 20);
    let (x, y) = filled[0];
    assert!(x.abs() < 1e-9);
    assert!((y - 1.0).abs() < 1e-9);
}

// ── scroll ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut idx, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut idx, &mut scroll, 10, 3);
    }
    assert_eq!(idx, 5);
    assert_eq!(scroll, 3);
    scroll_up(&mut idx, &mut scroll);
    assert_eq!(idx, 4);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_stops_at_bounds() {
    let (mut idx, mut scroll) = (0, 0);
    scroll_up(&mut idx, &mut scroll);
    assert_eq!((idx, scroll), (0, 0));
    scroll_to_bottom(&mut idx, &mut scroll, 4, 10);
    assert_eq!((idx, scroll), (3, 0));
    scroll_down(&mut idx, &mut scroll, 4, 10);
    assert_eq!(idx, 3);
    scroll_to_top(&mut idx, &mut scroll);
    assert_eq!((idx, scroll), (0, 0));
}
