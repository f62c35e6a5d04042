use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::models::Draft;

pub const INVALID_SUBMISSION: &str = "Please add a valid description, amount, and category";

/// Largest accepted magnitude. Stays exact through the JSON number round trip
/// and leaves the sums far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Raw text as typed into the add-transaction form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub tags: String,
}

/// Checks the raw input and builds a draft. Nothing is committed on failure.
pub fn validate(input: &FormInput) -> Result<Draft> {
    let description = input.description.trim();
    let category = input.category.trim();
    let amount = parse_amount(&input.amount);

    match amount {
        Some(amount) if !description.is_empty() && !category.is_empty() => Ok(Draft {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            tags: parse_tags(&input.tags),
        }),
        _ => Err(AppError::Validation(INVALID_SUBMISSION.to_string())),
    }
}

/// Parses a complete decimal no larger than [`MAX_AMOUNT`] in magnitude.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .filter(|amount| amount.abs() <= MAX_AMOUNT)
}

/// Comma separated, trimmed, empties dropped. Order and duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(description: &str, amount: &str, category: &str, tags: &str) -> FormInput {
        FormInput {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            tags: tags.into(),
        }
    }

    #[test]
    fn salary_submission() {
        let draft = validate(&input("Salary", "1000", "work", "monthly")).unwrap();
        assert_eq!(draft.description, "Salary");
        assert_eq!(draft.amount, dec!(1000));
        assert_eq!(draft.category, "work");
        assert_eq!(draft.tags, vec!["monthly".to_string()]);
    }

    #[test]
    fn description_is_trimmed() {
        let draft = validate(&input("  Coffee ", "-3.5", "food", "")).unwrap();
        assert_eq!(draft.description, "Coffee");
        assert_eq!(draft.amount, dec!(-3.5));
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn rejects_missing_fields() {
        let cases = [
            input("   ", "10", "food", ""),
            input("Lunch", "", "food", ""),
            input("Lunch", "ten", "food", ""),
            input("Lunch", "10abc", "food", ""),
            input("Lunch", "10", "", ""),
        ];
        for case in cases {
            match validate(&case) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, INVALID_SUBMISSION),
                other => panic!("expected validation error for {case:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn amount_accepts_scientific_notation() {
        assert_eq!(parse_amount("1e3"), Some(dec!(1000)));
        assert_eq!(parse_amount(" -2.50 "), Some(dec!(-2.50)));
        assert_eq!(parse_amount("-"), None);
    }

    #[test]
    fn rejects_amounts_beyond_limit() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
        assert_eq!(parse_amount("1000000000000"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("-1000000000000"), Some(-MAX_AMOUNT));
        assert_eq!(parse_amount("1000000000000.01"), None);
        assert_eq!(parse_amount("50000000000000000000000000000"), None);
        assert_eq!(parse_amount("79228162514264337593543950335"), None);
        assert_eq!(parse_amount("1e30"), None);

        match validate(&input("Lottery", "50000000000000000000000000000", "other", "")) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, INVALID_SUBMISSION),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn tags_keep_order_and_duplicates() {
        assert_eq!(
            parse_tags(" rent, ,home,rent ,, "),
            vec!["rent".to_string(), "home".into(), "rent".into()]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }
}
