#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;
use crate::errors::LedgerError;

fn make_expense(category: &str, amount: f64) -> Expense {
    Expense {
        id: "abc".into(),
        date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
        category: category.into(),
        amount,
        currency: "INR".into(),
        payment_method: String::new(),
        notes: String::new(),
    }
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_date_parts() {
    let e = make_expense("Food", 10.0);
    assert_eq!(e.year(), 2025);
    assert_eq!(e.month(), 11);
    assert_eq!(e.day(), 5);
}

#[test]
fn test_in_category_ignores_case() {
    let e = make_expense("Food", 10.0);
    assert!(e.in_category("food"));
    assert!(e.in_category("FOOD"));
    assert!(!e.in_category("Transport"));
}

// ── NewExpense ────────────────────────────────────────────────

#[test]
fn test_normalize_defaults() {
    let input = NewExpense::new("2025-11-01".into(), "Food".into(), "100".into());
    let e = input.normalize("id-1".into(), "INR").unwrap();
    assert_eq!(e.id, "id-1");
    assert_eq!(e.date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
    assert_eq!(e.amount, 100.0);
    assert_eq!(e.currency, "INR");
    assert!(e.payment_method.is_empty());
    assert!(e.notes.is_empty());
}

#[test]
fn test_normalize_keeps_given_currency() {
    let input = NewExpense {
        currency: "EUR".into(),
        payment_method: "card".into(),
        notes: "lunch, with \"friends\"".into(),
        ..NewExpense::new("2025-11-01".into(), " Food ".into(), " 12.5 ".into())
    };
    let e = input.normalize("id-2".into(), "INR").unwrap();
    assert_eq!(e.currency, "EUR");
    assert_eq!(e.category, "Food");
    assert_eq!(e.amount, 12.5);
    assert_eq!(e.payment_method, "card");
    assert_eq!(e.notes, "lunch, with \"friends\"");
}

#[test]
fn test_normalize_rejects_bad_date() {
    let input = NewExpense::new("2025-13-01".into(), "Food".into(), "1".into());
    let err = input.normalize("x".into(), "INR").unwrap_err();
    assert!(matches!(err, LedgerError::Parse { field: "date", .. }));
}

#[test]
fn test_normalize_rejects_bad_amount() {
    let input = NewExpense::new("2025-11-01".into(), "Food".into(), "ten".into());
    let err = input.normalize("x".into(), "INR").unwrap_err();
    assert!(matches!(err, LedgerError::Parse { field: "amount", .. }));
}

// ── parse helpers ─────────────────────────────────────────────

#[test]
fn test_parse_date_requires_iso() {
    assert!(parse_date("2024-02-29").is_ok());
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("11/01/2025").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("42").unwrap(), 42.0);
    assert_eq!(parse_amount("-3.25").unwrap(), -3.25);
    assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
    assert!(parse_amount("1,000").is_err());
    assert!(parse_amount("NaN").is_err());
    assert!(parse_amount("inf").is_err());
    assert!(parse_amount("").is_err());
}
