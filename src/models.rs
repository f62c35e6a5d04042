use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A single signed entry. Positive amounts are income, negative amounts are expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Validated form data waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub tags: Vec<String>,
}

impl Draft {
    pub fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            tags: self.tags,
        }
    }
}

/// Labels offered by the category selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum CategoryLabel {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Salary,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn reads_browser_written_entries() {
        let raw = r#"[
            {"id":1700000000000,"description":"Salary","amount":1000,"category":"salary","tags":["monthly"]},
            {"id":1700000000001,"description":"Coffee","amount":-3.5,"category":"food","tags":[]}
        ]"#;

        let txs: Vec<Transaction> = serde_json::from_str(raw).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, dec!(1000));
        assert_eq!(txs[0].tags, vec!["monthly".to_string()]);
        assert_eq!(txs[1].amount, dec!(-3.5));
        assert!(txs[1].is_expense());
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let raw = r#"{"id":1,"description":"Rent","amount":-500,"category":"bills"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert!(tx.tags.is_empty());
    }

    #[test]
    fn amount_is_written_as_a_number() {
        let tx = Transaction {
            id: 7,
            description: "Bus".into(),
            amount: dec!(-2.25),
            category: "transport".into(),
            tags: vec![],
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["amount"].as_f64(), Some(-2.25));
    }

    #[test]
    fn zero_amount_is_neither_income_nor_expense() {
        let tx = Draft {
            description: "Nothing".into(),
            amount: Decimal::ZERO,
            category: "other".into(),
            tags: vec![],
        }
        .into_transaction(1);
        assert!(!tx.is_income());
        assert!(!tx.is_expense());
    }

    #[test]
    fn category_labels_round_trip_through_strings() {
        for label in CategoryLabel::iter() {
            let text = label.to_string();
            assert_eq!(text, text.to_lowercase());
            assert_eq!(CategoryLabel::from_str(&text).unwrap(), label);
        }
    }
}
