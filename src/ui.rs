//! Drawing. Every function here takes plain data and writes widgets into a frame.

use std::collections::BTreeMap;

use ratatui::prelude::*;
use ratatui::widgets::*;
use rust_decimal::Decimal;

use crate::calculator::{Totals, format_amount};
use crate::models::Transaction;
use crate::state::{ActiveInput, ActiveTab, InputMode, State};

/// Display strings for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub amount: String,
    pub is_expense: bool,
}

impl RowView {
    pub fn new(tx: &Transaction, currency: &str) -> Self {
        let is_expense = tx.amount < Decimal::ZERO;
        let sign = if is_expense { '-' } else { '+' };
        Self {
            description: tx.description.clone(),
            category: tx.category.clone(),
            tags: tx.tags.clone(),
            amount: format!("{sign}{}", format_amount(currency, tx.amount.abs())),
            is_expense,
        }
    }

    fn to_line(&self) -> Line<'_> {
        let amount_color = if self.is_expense {
            Color::Red
        } else {
            Color::Green
        };

        let mut spans = vec![
            Span::styled(
                format!("{:<16}", self.amount),
                Style::default().fg(amount_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.description.as_str()),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", self.category),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
        ];
        for tag in &self.tags {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("#{tag}"),
                Style::default().fg(Color::Magenta),
            ));
        }
        Line::from(spans)
    }
}

pub fn draw(frame: &mut Frame, state: &State) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(frame, layout[0], state);
    match state.active_tab {
        ActiveTab::Transactions => draw_transactions_tab(frame, layout[1], state),
        ActiveTab::AddTransaction => draw_add_form(frame, layout[1], state),
    }
    draw_footer(frame, layout[2], state);

    if state.show_help {
        draw_help_overlay(frame, area);
    }
    if let Some(message) = &state.alert {
        draw_alert(frame, area, message);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, state: &State) {
    let tabs: Vec<Line> = ActiveTab::all()
        .iter()
        .map(|t| {
            if *t == state.active_tab {
                Line::from(format!(" {} ", t.title())).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!(" {} ", t.title()))
            }
        })
        .collect();

    let tabs_widget = Tabs::new(tabs)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pesa - Expense Tracker "),
        )
        .select(state.active_tab as usize)
        .highlight_style(Style::default().fg(Color::Yellow));

    frame.render_widget(tabs_widget, area);
}

fn draw_transactions_tab(frame: &mut Frame, area: Rect, state: &State) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_summary(
        frame,
        layout[0],
        &state.totals,
        &state.category_totals,
        &state.currency,
    );
    draw_filter_bar(frame, layout[1], state);
    render_list(
        frame,
        layout[2],
        &state.visible,
        state.selected_row,
        &state.currency,
    );
}

/// Balance, income and expense on the left, per-category sums on the right.
pub fn render_summary(
    frame: &mut Frame,
    area: Rect,
    totals: &Totals,
    category_totals: &BTreeMap<String, Decimal>,
    currency: &str,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let balance_color = if totals.balance >= Decimal::ZERO {
        Color::Cyan
    } else {
        Color::Red
    };

    let summary_text = vec![
        Line::from(vec![
            Span::styled("Balance: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_amount(currency, totals.balance),
                Style::default()
                    .fg(balance_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Income:  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_amount(currency, totals.income),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Expense: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_amount(currency, totals.expense),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];
    let summary = Paragraph::new(summary_text)
        .block(Block::default().borders(Borders::ALL).title(" Summary "));
    frame.render_widget(summary, layout[0]);

    let category_lines: Vec<Line> = category_totals
        .iter()
        .map(|(category, amount)| {
            Line::from(vec![
                Span::styled(format!("{category:<14}"), Style::default().fg(Color::Cyan)),
                Span::raw(format_amount(currency, *amount)),
            ])
        })
        .collect();
    let categories = Paragraph::new(category_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" By Category "));
    frame.render_widget(categories, layout[1]);
}

fn draw_filter_bar(frame: &mut Frame, area: Rect, state: &State) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let type_text = state.type_filter.to_string();
    let fields = [
        (ActiveInput::Search, " Search ", state.search_input.as_str()),
        (ActiveInput::MinAmount, " Min ", state.min_amount_input.as_str()),
        (ActiveInput::MaxAmount, " Max ", state.max_amount_input.as_str()),
        (ActiveInput::TypeFilter, " Type ", type_text.as_str()),
    ];

    for ((field, title, value), rect) in fields.into_iter().zip(layout.iter()) {
        frame.render_widget(input_box(state, field, title, value), *rect);
    }
}

/// One row per transaction, in the order given.
pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    transactions: &[Transaction],
    selected: Option<usize>,
    currency: &str,
) {
    let rows: Vec<RowView> = transactions
        .iter()
        .map(|t| RowView::new(t, currency))
        .collect();
    let items: Vec<ListItem> = rows.iter().map(|r| ListItem::new(r.to_line())).collect();

    let title = format!(" Transactions ({}) ", transactions.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_add_form(frame: &mut Frame, area: Rect, state: &State) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Transaction ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let categories = State::categories();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(categories.len() as u16 + 2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        input_box(
            state,
            ActiveInput::Description,
            " Description ",
            &state.description_input,
        ),
        layout[0],
    );
    frame.render_widget(
        input_box(
            state,
            ActiveInput::Amount,
            " Amount (negative for expense) ",
            &state.amount_input,
        ),
        layout[1],
    );

    let cat_items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let style = if Some(i) == state.selected_category {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {c} ")).style(style)
        })
        .collect();
    let cat_title = match state.category_label() {
        Some(label) => format!(" Category: {label} "),
        None => " Category: (select) ".to_string(),
    };
    let cat_list = List::new(cat_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(cat_title)
            .border_style(focus_style(state, ActiveInput::Category)),
    );
    frame.render_widget(cat_list, layout[2]);

    frame.render_widget(
        input_box(
            state,
            ActiveInput::Tags,
            " Tags (comma separated) ",
            &state.tags_input,
        ),
        layout[3],
    );

    let instructions =
        Paragraph::new("i: type | Tab: next field | Up/Down: category | Enter: submit | Esc: done")
            .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(instructions, layout[4]);
}

fn focus_style(state: &State, field: ActiveInput) -> Style {
    if state.active_input == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn input_box<'a>(
    state: &State,
    field: ActiveInput,
    title: &'a str,
    value: &'a str,
) -> Paragraph<'a> {
    Paragraph::new(value)
        .style(focus_style(state, field))
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &State) {
    let mode_str = match state.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Insert => "INSERT",
    };

    let status = state
        .status_message
        .clone()
        .unwrap_or_else(|| "Ready".to_string());

    let footer_text = Line::from(vec![
        Span::styled(
            format!(" {} ", mode_str),
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled("? for Help", Style::default().fg(Color::DarkGray)),
    ]);

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from("Navigation:"),
        Line::from("  Tab/Shift+Tab  Switch tabs"),
        Line::from("  Up/Down, j/k   Move through the list"),
        Line::from(""),
        Line::from("Transactions:"),
        Line::from("  d              Delete selected transaction"),
        Line::from("  a              Apply filters"),
        Line::from("  r              Reset filters"),
        Line::from("  t              Cycle type filter"),
        Line::from(""),
        Line::from("Input:"),
        Line::from("  i              Enter insert mode"),
        Line::from("  Tab            Next field"),
        Line::from("  Esc            Exit insert mode"),
        Line::from("  Enter          Submit form / apply filters"),
        Line::from(""),
        Line::from("General:"),
        Line::from("  ?              Toggle help"),
        Line::from("  q              Quit application"),
    ];

    let help_block = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .alignment(Alignment::Left);

    let popup_area = centered_rect(50, 70, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_block, popup_area);
}

fn draw_alert(frame: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::Gray),
        )),
    ];
    let alert = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Invalid Transaction ")
                .border_style(Style::default().fg(Color::Red)),
        );

    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(alert, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{category_totals, totals};
    use ratatui::backend::TestBackend;
    use rust_decimal_macros::dec;

    fn tx(id: i64, description: &str, amount: Decimal, tags: &[&str]) -> Transaction {
        Transaction {
            id,
            description: description.into(),
            amount,
            category: "food".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn row_shows_explicit_sign_and_magnitude() {
        let expense = RowView::new(&tx(1, "Coffee", dec!(-3.5), &[]), "Kes");
        assert_eq!(expense.amount, "-Kes3.50");
        assert!(expense.is_expense);

        let income = RowView::new(&tx(2, "Salary", dec!(1000), &["monthly"]), "Kes");
        assert_eq!(income.amount, "+Kes1000.00");
        assert_eq!(income.tags, vec!["monthly".to_string()]);

        let zero = RowView::new(&tx(3, "Nothing", Decimal::ZERO, &[]), "Kes");
        assert_eq!(zero.amount, "+Kes0.00");
    }

    #[test]
    fn row_line_only_has_tag_chips_when_tagged() {
        let plain = RowView::new(&tx(1, "Coffee", dec!(-3.5), &[]), "Kes");
        assert!(!plain.to_line().to_string().contains('#'));

        let tagged = RowView::new(&tx(1, "Rent", dec!(-500), &["home", "monthly"]), "Kes");
        let line = tagged.to_line().to_string();
        assert!(line.contains("#home"));
        assert!(line.contains("#monthly"));
        assert!(line.contains("[food]"));
    }

    #[test]
    fn summary_renders_formatted_totals() {
        let txs = vec![
            tx(1, "Salary", dec!(1000), &[]),
            tx(2, "Coffee", dec!(-3.5), &[]),
        ];
        let t = totals(&txs);
        let sums = category_totals(&txs);

        let mut terminal = Terminal::new(TestBackend::new(80, 5)).unwrap();
        terminal
            .draw(|frame| render_summary(frame, frame.area(), &t, &sums, "Kes"))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Kes996.50"));
        assert!(text.contains("Kes1000.00"));
        assert!(text.contains("Kes3.50"));
    }

    #[test]
    fn list_renders_rows_in_given_order() {
        let txs = vec![
            tx(1, "Salary", dec!(1000), &["monthly"]),
            tx(2, "Coffee", dec!(-3.5), &[]),
        ];

        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|frame| render_list(frame, frame.area(), &txs, Some(1), "Kes"))
            .unwrap();

        let text = screen_text(&terminal);
        let salary = text.find("Salary").unwrap();
        let coffee = text.find("Coffee").unwrap();
        assert!(salary < coffee);
        assert!(text.contains("+Kes1000.00"));
        assert!(text.contains("-Kes3.50"));
        assert!(text.contains("#monthly"));
        assert!(text.contains("Transactions (2)"));
    }

    #[test]
    fn alert_overlays_the_screen() {
        let mut state = State::new("Kes");
        state.alert = Some("Please add a valid description, amount, and category".into());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();

        assert!(screen_text(&terminal).contains("Invalid Transaction"));
    }
}
