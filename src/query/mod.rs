use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::errors::{LedgerError, Result};
use crate::models::Expense;

/// Optional criteria for [`filter`]. Date bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseFilter {
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) category: Option<String>,
    pub(crate) limit: Option<usize>,
}

impl ExpenseFilter {
    fn matches(&self, e: &Expense) -> bool {
        self.from.map_or(true, |from| e.date >= from)
            && self.to.map_or(true, |to| e.date <= to)
            && self.category.as_deref().map_or(true, |c| e.in_category(c))
    }
}

/// Matching expenses, newest first. Same-day expenses keep their input order.
pub(crate) fn filter(expenses: &[Expense], criteria: &ExpenseFilter) -> Vec<Expense> {
    let mut matched: Vec<Expense> = expenses
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = criteria.limit {
        matched.truncate(limit);
    }
    matched
}

/// Sum of every amount, in input order.
pub(crate) fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: f64,
}

/// Result of [`summarize`]. `NoData` is distinct from a period whose amounts net to zero.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Summary {
    NoData,
    Totals {
        categories: Vec<CategoryTotal>,
        grand_total: f64,
    },
}

impl Summary {
    /// Unwrap the totals, turning `NoData` into [`LedgerError::EmptyResult`].
    pub(crate) fn require_data(self) -> Result<(Vec<CategoryTotal>, f64)> {
        match self {
            Self::Totals {
                categories,
                grand_total,
            } => Ok((categories, grand_total)),
            Self::NoData => Err(LedgerError::EmptyResult(
                "no expenses for the given period".into(),
            )),
        }
    }
}

/// Per-category totals for a year, or a single month of it.
///
/// Categories are grouped by exact name and ordered by total, largest first;
/// equal totals keep the order in which each category first appeared.
pub(crate) fn summarize(expenses: &[Expense], year: i32, month: Option<u32>) -> Summary {
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grand_total = 0.0;

    let in_period = expenses
        .iter()
        .filter(|e| e.year() == year && month.map_or(true, |m| e.month() == m));

    for e in in_period {
        let slot = *index.entry(e.category.as_str()).or_insert_with(|| {
            categories.push(CategoryTotal {
                category: e.category.clone(),
                total: 0.0,
            });
            categories.len() - 1
        });
        categories[slot].total += e.amount;
        grand_total += e.amount;
    }

    if categories.is_empty() {
        return Summary::NoData;
    }

    categories.sort_by(|a, b| b.total.total_cmp(&a.total));
    Summary::Totals {
        categories,
        grand_total,
    }
}

/// Time key of a chart bucket. Ordering is chronological within one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum BucketKey {
    Day(u32),
    Month(u32),
    YearMonth(i32, u32),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(d) => write!(f, "{d}"),
            Self::Month(m) => write!(f, "{m}"),
            Self::YearMonth(y, m) => write!(f, "{y:04}-{m:02}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bucket {
    pub(crate) key: BucketKey,
    pub(crate) total: f64,
}

impl Bucket {
    pub(crate) fn label(&self) -> String {
        self.key.to_string()
    }
}

/// Sparse, ascending time buckets for charting.
///
/// With a month: one bucket per day of month. With only a year: one per month
/// of that year. With neither: one per calendar month across the whole store.
pub(crate) fn bucket_for_chart(
    expenses: &[Expense],
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<Bucket>> {
    if expenses.is_empty() {
        return Err(LedgerError::EmptyResult("the store has no expenses".into()));
    }

    let key_of = |e: &Expense| match (year, month) {
        (_, Some(_)) => BucketKey::Day(e.day()),
        (Some(_), None) => BucketKey::Month(e.month()),
        (None, None) => BucketKey::YearMonth(e.year(), e.month()),
    };

    let mut buckets: BTreeMap<BucketKey, f64> = BTreeMap::new();
    for e in expenses
        .iter()
        .filter(|e| year.map_or(true, |y| e.year() == y))
        .filter(|e| month.map_or(true, |m| e.month() == m))
    {
        *buckets.entry(key_of(e)).or_insert(0.0) += e.amount;
    }

    if buckets.is_empty() {
        return Err(LedgerError::EmptyResult(
            "no expenses for the given range".into(),
        ));
    }

    Ok(buckets
        .into_iter()
        .map(|(key, total)| Bucket { key, total })
        .collect())
}
