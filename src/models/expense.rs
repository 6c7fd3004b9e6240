use chrono::{Datelike, NaiveDate};

use crate::errors::{LedgerError, Result};

/// Storage form of dates: `YYYY-MM-DD`.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// One persisted expense. Every field is already normalized.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    pub(crate) id: String,
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    pub(crate) amount: f64,
    pub(crate) currency: String,
    pub(crate) payment_method: String,
    pub(crate) notes: String,
}

impl Expense {
    pub(crate) fn year(&self) -> i32 {
        self.date.year()
    }

    pub(crate) fn month(&self) -> u32 {
        self.date.month()
    }

    pub(crate) fn day(&self) -> u32 {
        self.date.day()
    }

    /// Case-insensitive category match.
    pub(crate) fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Raw field values as collected by a front end, before normalization.
#[derive(Debug, Clone, Default)]
pub(crate) struct NewExpense {
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) currency: String,
    pub(crate) payment_method: String,
    pub(crate) notes: String,
}

impl NewExpense {
    pub(crate) fn new(date: String, category: String, amount: String) -> Self {
        Self {
            date,
            category,
            amount,
            ..Self::default()
        }
    }

    /// Parse and default every field, attaching the freshly minted `id`.
    pub(crate) fn normalize(&self, id: String, default_currency: &str) -> Result<Expense> {
        let currency = self.currency.trim();
        Ok(Expense {
            id,
            date: parse_date(&self.date)?,
            category: self.category.trim().to_string(),
            amount: parse_amount(&self.amount)?,
            currency: if currency.is_empty() {
                default_currency.to_string()
            } else {
                currency.to_string()
            },
            payment_method: self.payment_method.clone(),
            notes: self.notes.clone(),
        })
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| LedgerError::Parse {
        field: "date",
        value: s.to_string(),
    })
}

/// Amounts are plain `.`-separated decimals. Non-finite values are rejected.
pub(crate) fn parse_amount(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LedgerError::Parse {
            field: "amount",
            value: s.to_string(),
        })
}
