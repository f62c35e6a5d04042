use std::collections::BTreeMap;

use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::calculator::Totals;
use crate::filter::{Criteria, TypeFilter};
use crate::form::FormInput;
use crate::models::{CategoryLabel, Transaction};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Active input field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveInput {
    #[default]
    None,
    // Add form
    Description,
    Amount,
    Category,
    Tags,
    // Filter bar
    Search,
    MinAmount,
    MaxAmount,
    TypeFilter,
}

impl ActiveInput {
    /// Field that follows `self` within the fields of `tab`.
    pub fn next_in(&self, tab: ActiveTab) -> Self {
        match tab {
            ActiveTab::Transactions => match self {
                Self::Search => Self::MinAmount,
                Self::MinAmount => Self::MaxAmount,
                Self::MaxAmount => Self::TypeFilter,
                _ => Self::Search,
            },
            ActiveTab::AddTransaction => match self {
                Self::Description => Self::Amount,
                Self::Amount => Self::Category,
                Self::Category => Self::Tags,
                _ => Self::Description,
            },
        }
    }

    pub fn first_in(tab: ActiveTab) -> Self {
        Self::None.next_in(tab)
    }
}

/// Active tab/page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Transactions,
    AddTransaction,
}

impl ActiveTab {
    pub fn next(&self) -> Self {
        match self {
            Self::Transactions => Self::AddTransaction,
            Self::AddTransaction => Self::Transactions,
        }
    }

    pub fn prev(&self) -> Self {
        // Only two tabs
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Transactions => "Transactions",
            Self::AddTransaction => "Add Transaction",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Transactions, Self::AddTransaction]
    }
}

/// Shared application state
#[derive(Debug, Default)]
pub struct State {
    /// Currency prefix used by every formatted amount
    pub currency: String,
    /// Current input mode
    pub input_mode: InputMode,
    /// Which input field is active
    pub active_input: ActiveInput,
    /// Current active tab
    pub active_tab: ActiveTab,

    // Add form buffers
    pub description_input: String,
    pub amount_input: String,
    pub selected_category: Option<usize>,
    pub tags_input: String,

    // Filter buffers
    pub search_input: String,
    pub min_amount_input: String,
    pub max_amount_input: String,
    pub type_filter: TypeFilter,

    /// Transactions currently shown in the list
    pub visible: Vec<Transaction>,
    /// Highlighted row in `visible`
    pub selected_row: Option<usize>,
    pub totals: Totals,
    pub category_totals: BTreeMap<String, Decimal>,

    /// Status message to display
    pub status_message: Option<String>,
    /// Blocking notification; the next key press dismisses it
    pub alert: Option<String>,
    /// Whether to show help overlay
    pub show_help: bool,
}

impl State {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn categories() -> Vec<CategoryLabel> {
        CategoryLabel::iter().collect()
    }

    pub fn category_label(&self) -> Option<CategoryLabel> {
        self.selected_category
            .and_then(|i| Self::categories().get(i).copied())
    }

    pub fn form_input(&self) -> FormInput {
        FormInput {
            description: self.description_input.clone(),
            amount: self.amount_input.clone(),
            category: self
                .category_label()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            tags: self.tags_input.clone(),
        }
    }

    pub fn criteria(&self) -> Criteria {
        Criteria::from_inputs(
            &self.search_input,
            &self.min_amount_input,
            &self.max_amount_input,
            self.type_filter,
        )
    }

    pub fn clear_inputs(&mut self) {
        self.description_input.clear();
        self.amount_input.clear();
        self.selected_category = None;
        self.tags_input.clear();
        self.active_input = ActiveInput::None;
        self.input_mode = InputMode::Normal;
    }

    pub fn reset_filters(&mut self) {
        self.search_input.clear();
        self.min_amount_input.clear();
        self.max_amount_input.clear();
        self.type_filter = TypeFilter::All;
    }

    /// Replaces the shown list, keeping the highlight in range.
    pub fn show(&mut self, transactions: Vec<Transaction>) {
        self.visible = transactions;
        self.selected_row = match (self.selected_row, self.visible.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.selected_row.and_then(|i| self.visible.get(i))
    }

    pub fn select_up(&mut self) {
        if let Some(i) = self.selected_row {
            self.selected_row = Some(i.saturating_sub(1));
        }
    }

    pub fn select_down(&mut self) {
        if let Some(i) = self.selected_row {
            if i + 1 < self.visible.len() {
                self.selected_row = Some(i + 1);
            }
        }
    }

    pub fn category_up(&mut self) {
        self.selected_category = match self.selected_category {
            None | Some(0) => Some(0),
            Some(i) => Some(i - 1),
        };
    }

    pub fn category_down(&mut self) {
        let last = Self::categories().len().saturating_sub(1);
        self.selected_category = match self.selected_category {
            None => Some(0),
            Some(i) => Some((i + 1).min(last)),
        };
    }

    /// Buffer behind the active text field, if it takes free text.
    pub fn active_buffer(&mut self) -> Option<&mut String> {
        match self.active_input {
            ActiveInput::Description => Some(&mut self.description_input),
            ActiveInput::Amount => Some(&mut self.amount_input),
            ActiveInput::Tags => Some(&mut self.tags_input),
            ActiveInput::Search => Some(&mut self.search_input),
            ActiveInput::MinAmount => Some(&mut self.min_amount_input),
            ActiveInput::MaxAmount => Some(&mut self.max_amount_input),
            ActiveInput::None | ActiveInput::Category | ActiveInput::TypeFilter => None,
        }
    }

    pub fn is_numeric_input(&self) -> bool {
        matches!(
            self.active_input,
            ActiveInput::Amount | ActiveInput::MinAmount | ActiveInput::MaxAmount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(id: i64) -> Transaction {
        Transaction {
            id,
            description: format!("t{id}"),
            amount: dec!(1),
            category: "other".into(),
            tags: vec![],
        }
    }

    #[test]
    fn fields_cycle_within_tab() {
        let mut field = ActiveInput::first_in(ActiveTab::AddTransaction);
        let mut seen = vec![field];
        for _ in 0..4 {
            field = field.next_in(ActiveTab::AddTransaction);
            seen.push(field);
        }
        assert_eq!(
            seen,
            vec![
                ActiveInput::Description,
                ActiveInput::Amount,
                ActiveInput::Category,
                ActiveInput::Tags,
                ActiveInput::Description,
            ]
        );
        assert_eq!(ActiveInput::first_in(ActiveTab::Transactions), ActiveInput::Search);
        assert_eq!(
            ActiveInput::TypeFilter.next_in(ActiveTab::Transactions),
            ActiveInput::Search
        );
    }

    #[test]
    fn no_category_until_chosen() {
        let mut state = State::new("Kes");
        assert_eq!(state.form_input().category, "");

        state.category_down();
        assert_eq!(state.form_input().category, "food");

        for _ in 0..20 {
            state.category_down();
        }
        assert_eq!(state.category_label(), Some(CategoryLabel::Other));

        state.category_up();
        assert_eq!(state.category_label(), Some(CategoryLabel::Salary));
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let mut state = State::new("Kes");
        state.show(vec![tx(1), tx(2), tx(3)]);
        assert_eq!(state.selected_row, Some(0));

        state.select_down();
        state.select_down();
        state.select_down();
        assert_eq!(state.selected_transaction().map(|t| t.id), Some(3));

        state.show(vec![tx(1)]);
        assert_eq!(state.selected_row, Some(0));

        state.show(vec![]);
        assert_eq!(state.selected_transaction(), None);
    }

    #[test]
    fn reset_filters_restores_defaults() {
        let mut state = State::new("Kes");
        state.search_input = "rent".into();
        state.min_amount_input = "5".into();
        state.max_amount_input = "50".into();
        state.type_filter = TypeFilter::Expense;

        state.reset_filters();

        assert!(state.criteria().is_default());
    }
}
