#![allow(clippy::unwrap_used)]

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(180.0), "180.00");
    assert_eq!(format_amount(0.5), "0.50");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(1234567.891), "1,234,567.89");
    assert_eq!(format_amount(1000.0), "1,000.00");
    assert_eq!(format_amount(999.0), "999.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(-42.5), "-42.50");
    assert_eq!(format_amount(-1234.0), "-1,234.00");
}

#[test]
fn test_format_amount_rounds_to_zero_without_sign() {
    assert_eq!(format_amount(-0.001), "0.00");
    assert_eq!(format_amount(0.0), "0.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Food", 10), "Food");
    assert_eq!(truncate("Food", 4), "Food");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Transport and travel", 9), "Transpor…");
}

#[test]
fn test_truncate_edges() {
    assert_eq!(truncate("", 5), "");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── bar ───────────────────────────────────────────────────────

#[test]
fn test_bar_scales_to_width() {
    assert_eq!(bar(100.0, 100.0, 10), "██████████");
    assert_eq!(bar(50.0, 100.0, 10), "█████");
    assert_eq!(bar(0.0, 100.0, 10), "");
}

#[test]
fn test_bar_negative_uses_light_glyph() {
    assert_eq!(bar(-30.0, 100.0, 10), "░░░");
}

#[test]
fn test_bar_degenerate_inputs() {
    assert_eq!(bar(10.0, 0.0, 10), "");
    assert_eq!(bar(10.0, 10.0, 0), "");
}
