use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info};

use crate::action::Action;
use crate::calculator::{self, format_amount};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::filter::{self, Criteria};
use crate::form;
use crate::state::{ActiveInput, ActiveTab, InputMode, State};
use crate::storage::{FileStorage, KeyValueStorage};
use crate::store::Store;
use crate::tui::{self, Tui};
use crate::ui;

/// Main application struct
pub struct App<S: KeyValueStorage> {
    store: Store<S>,
    state: State,
    should_quit: bool,
}

impl App<FileStorage> {
    pub fn new(config: &Config) -> Result<Self> {
        let storage = FileStorage::new(&config.data_dir)?;
        info!(dir = %storage.dir().display(), key = %config.storage_key, "opening store");
        let store = Store::load(storage, config.storage_key.as_str())?;
        Ok(Self::with_store(store, &config.currency))
    }
}

impl<S: KeyValueStorage> App<S> {
    pub fn with_store(store: Store<S>, currency: &str) -> Self {
        let mut app = Self {
            store,
            state: State::new(currency),
            should_quit: false,
        };
        app.reload();
        app
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = tui::restore();
            original_hook(panic_info);
        }));

        let mut terminal = tui::init()?;
        let result = self.run_loop(&mut terminal);
        tui::restore()?;
        result
    }

    fn run_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, &self.state))?;
            if let Some(action) = self.handle_events()? {
                self.update(action)?;
            }
        }
        Ok(())
    }

    fn handle_events(&self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.map_key(key));
            }
        }
        Ok(None)
    }

    /// Translates a key press into an action for the current mode and tab.
    pub fn map_key(&self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if self.state.alert.is_some() {
            return Some(Action::DismissAlert);
        }

        match self.state.input_mode {
            InputMode::Normal => self.map_normal_key(key),
            InputMode::Insert => self.map_insert_key(key),
        }
    }

    fn map_normal_key(&self, key: KeyEvent) -> Option<Action> {
        let on_list = self.state.active_tab == ActiveTab::Transactions;
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Esc if self.state.show_help => Some(Action::ToggleHelp),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Action::PrevTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::Char('i') => Some(Action::EnterInsert),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
            KeyCode::Enter if !on_list => Some(Action::SubmitTransaction),
            KeyCode::Char('d') | KeyCode::Delete if on_list => Some(Action::DeleteSelected),
            KeyCode::Char('a') if on_list => Some(Action::ApplyFilters),
            KeyCode::Char('r') if on_list => Some(Action::ResetFilters),
            KeyCode::Char('t') if on_list => Some(Action::CycleTypeFilter),
            _ => None,
        }
    }

    fn map_insert_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::EnterNormal),
            KeyCode::Enter => match self.state.active_tab {
                ActiveTab::AddTransaction => Some(Action::SubmitTransaction),
                ActiveTab::Transactions => Some(Action::ApplyFilters),
            },
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            KeyCode::Backspace | KeyCode::Delete => Some(Action::InputBackspace),
            _ => None,
        }
    }

    pub fn update(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::NextTab => {
                self.state.active_tab = self.state.active_tab.next();
                self.state.active_input = ActiveInput::None;
                self.state.input_mode = InputMode::Normal;
                self.state.clear_status();
            }
            Action::PrevTab => {
                self.state.active_tab = self.state.active_tab.prev();
                self.state.active_input = ActiveInput::None;
                self.state.input_mode = InputMode::Normal;
                self.state.clear_status();
            }
            Action::EnterInsert => {
                self.state.input_mode = InputMode::Insert;
                if self.state.active_input == ActiveInput::None {
                    self.state.active_input = ActiveInput::first_in(self.state.active_tab);
                }
            }
            Action::EnterNormal => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::NextField => {
                self.state.active_input = self.state.active_input.next_in(self.state.active_tab);
            }
            Action::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
            }
            Action::DismissAlert => {
                self.state.alert = None;
            }
            Action::Up => match (self.state.input_mode, self.state.active_input) {
                (InputMode::Insert, ActiveInput::Category) => self.state.category_up(),
                (InputMode::Insert, ActiveInput::TypeFilter) => {
                    self.state.type_filter = self.state.type_filter.prev();
                }
                _ if self.state.active_tab == ActiveTab::Transactions => self.state.select_up(),
                _ => {}
            },
            Action::Down => match (self.state.input_mode, self.state.active_input) {
                (InputMode::Insert, ActiveInput::Category) => self.state.category_down(),
                (InputMode::Insert, ActiveInput::TypeFilter) => {
                    self.state.type_filter = self.state.type_filter.next();
                }
                _ if self.state.active_tab == ActiveTab::Transactions => {
                    self.state.select_down()
                }
                _ => {}
            },
            Action::CycleTypeFilter => {
                self.state.type_filter = self.state.type_filter.next();
            }
            Action::InputChar(c) => {
                let numeric = self.state.is_numeric_input();
                if let Some(buffer) = self.state.active_buffer() {
                    if !numeric || c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') {
                        buffer.push(c);
                    }
                }
                if self.state.active_input == ActiveInput::Search {
                    self.apply_filters();
                }
            }
            Action::InputBackspace => {
                if let Some(buffer) = self.state.active_buffer() {
                    buffer.pop();
                }
                if self.state.active_input == ActiveInput::Search {
                    self.apply_filters();
                }
            }
            Action::ApplyFilters => {
                self.apply_filters();
            }
            Action::ResetFilters => {
                self.reload();
                self.state.set_status("Filters reset");
            }
            Action::SubmitTransaction => self.submit(),
            Action::DeleteSelected => self.delete_selected(),
        }
        Ok(())
    }

    fn submit(&mut self) {
        let draft = match form::validate(&self.state.form_input()) {
            Ok(draft) => draft,
            Err(AppError::Validation(msg)) => {
                info!("rejected submission: {}", msg);
                self.state.alert = Some(msg);
                return;
            }
            Err(e) => {
                self.state.alert = Some(e.to_string());
                return;
            }
        };

        match self.store.create(draft) {
            Ok(tx) => {
                let kind = if tx.is_income() {
                    "income"
                } else if tx.is_expense() {
                    "expense"
                } else {
                    "entry"
                };
                info!(id = tx.id, category = %tx.category, "added {}", kind);
                self.state.set_status(format!(
                    "Added {} {}: {}",
                    format_amount(&self.state.currency, tx.amount.abs()),
                    kind,
                    tx.description
                ));
                self.state.clear_inputs();
                self.reload();
                info!(
                    "category totals: {}",
                    calculator::describe_category_totals(
                        &self.state.currency,
                        &self.state.category_totals
                    )
                );
            }
            Err(e) => {
                error!("failed to save transaction: {}", e);
                self.state.set_status(format!("Error: {}", e));
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(tx) = self.state.selected_transaction().cloned() else {
            return;
        };

        match self.store.remove(tx.id) {
            Ok(_) => {
                info!(id = tx.id, "deleted transaction");
                self.state.set_status(format!("Deleted {}", tx.description));
                self.reload();
            }
            Err(e) => {
                error!("failed to delete transaction {}: {}", tx.id, e);
                self.state.set_status(format!("Error: {}", e));
            }
        }
    }

    /// Shows the store filtered by the current inputs. Totals are left alone.
    fn apply_filters(&mut self) {
        let criteria = self.state.criteria();
        let shown = filter::filter(self.store.transactions(), &criteria);
        info!(shown = shown.len(), total = self.store.len(), "applied filters");
        self.state.show(shown);
    }

    /// Clears the filter inputs, lists everything and recomputes the summary.
    fn reload(&mut self) {
        self.state.reset_filters();
        let all = self.store.transactions();
        self.state.totals = calculator::totals(all);
        self.state.category_totals = calculator::category_totals(all);
        self.state.show(filter::filter(all, &Criteria::default()));
    }
}
