use std::str::FromStr;

use rust_decimal::Decimal;
use strum::{Display, EnumIter, EnumString};

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expense,
            Self::Expense => Self::All,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::All => Self::Expense,
            Self::Income => Self::All,
            Self::Expense => Self::Income,
        }
    }

    fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => tx.is_income(),
            Self::Expense => tx.is_expense(),
        }
    }
}

/// Search, amount range and type, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search_term: String,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub kind: TypeFilter,
}

impl Criteria {
    pub fn from_inputs(search: &str, min: &str, max: &str, kind: TypeFilter) -> Self {
        Self {
            search_term: search.to_string(),
            min_amount: parse_bound(min),
            max_amount: parse_bound(max),
            kind,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_search(tx) && self.matches_amount(tx) && self.kind.matches(tx)
    }

    fn matches_search(&self, tx: &Transaction) -> bool {
        self.search_term.is_empty()
            || tx
                .description
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    fn matches_amount(&self, tx: &Transaction) -> bool {
        let amount = tx.amount.abs();
        // A zero bound counts as no bound
        let above_min = match self.min_amount {
            Some(min) if !min.is_zero() => amount >= min,
            _ => true,
        };
        let below_max = match self.max_amount {
            Some(max) if !max.is_zero() => amount <= max,
            _ => true,
        };
        above_min && below_max
    }
}

/// Empty, unparseable and zero inputs all mean "no bound".
pub fn parse_bound(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .filter(|bound| !bound.is_zero())
}

pub fn filter(transactions: &[Transaction], criteria: &Criteria) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}
