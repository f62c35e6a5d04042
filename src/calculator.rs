use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of every amount.
    pub balance: Decimal,
    /// Sum of positive amounts.
    pub income: Decimal,
    /// Sum of the magnitudes of negative amounts.
    pub expense: Decimal,
}

/// Sums clamp at the `Decimal` range instead of panicking.
fn add(sum: Decimal, amount: Decimal) -> Decimal {
    sum.checked_add(amount).unwrap_or_else(|| {
        warn!(%sum, %amount, "total out of range, clamping");
        sum.saturating_add(amount)
    })
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    transactions.iter().fold(Totals::default(), |mut acc, t| {
        acc.balance = add(acc.balance, t.amount);
        if t.amount > Decimal::ZERO {
            acc.income = add(acc.income, t.amount);
        } else if t.amount < Decimal::ZERO {
            acc.expense = add(acc.expense, t.amount.abs());
        }
        acc
    })
}

pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut sums = BTreeMap::new();
    for t in transactions {
        let sum = sums.entry(t.category.clone()).or_insert(Decimal::ZERO);
        *sum = add(*sum, t.amount);
    }
    sums
}

/// Fixed two-place display with the currency prefix glued on, e.g. `Kes1234.50`.
pub fn format_amount(currency: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{currency}{rounded:.2}")
}

pub fn describe_category_totals(currency: &str, sums: &BTreeMap<String, Decimal>) -> String {
    sums.iter()
        .map(|(category, amount)| format!("{category}: {}", format_amount(currency, *amount)))
        .collect::<Vec<_>>()
        .join(", ")
}
