use rust_decimal::Decimal;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Format an amount with thousand separators, dropping the fraction for whole
/// amounts. e.g. `1234567` → `"¥1,234,567"`, `-9.5` → `"-¥9.50"`
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs();
    let formatted = if abs.fract().is_zero() {
        format!("{abs:.0}")
    } else {
        format!("{abs:.2}")
    };
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    match dec_part {
        Some(dec) => format!("{sign}{symbol}{with_commas}.{dec}"),
        None => format!("{sign}{symbol}{with_commas}"),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Hide the password argument of `signin`/`signup` while it is being typed.
pub(crate) fn mask_secret(input: &str) -> String {
    let parts: Vec<&str> = input.splitn(3, ' ').collect();
    match parts.as_slice() {
        [cmd, email, secret] if matches!(*cmd, "signin" | "signup" | "login") => {
            format!("{cmd} {email} {}", "*".repeat(secret.chars().count()))
        }
        _ => input.to_string(),
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// Points of a ring of radius 0.6..=1.0 around the origin, split into the
/// part covered by `ratio` (clockwise from 12 o'clock) and the rest.
pub(crate) fn donut_points(
    ratio: f64,
    rings: usize,
    steps: usize,
) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let ratio = ratio.clamp(0.0, 1.0);
    let mut filled = Vec::new();
    let mut empty = Vec::new();
    for ring in 0..rings {
        let r = if rings > 1 {
            0.6 + 0.4 * ring as f64 / (rings - 1) as f64
        } else {
            1.0
        };
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            let angle = FRAC_PI_2 - t * TAU;
            let point = (r * angle.cos(), r * angle.sin());
            if t < ratio {
                filled.push(point);
            } else {
                empty.push(point);
            }
        }
    }
    (filled, empty)
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
