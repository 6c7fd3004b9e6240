mod expense;

pub(crate) use expense::{parse_amount, parse_date, Expense, NewExpense, DATE_FORMAT};

#[cfg(test)]
mod tests;
