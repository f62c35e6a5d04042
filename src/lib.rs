//! Terminal expense tracker: signed income/expense entries kept in a JSON-backed
//! store, summarised into balance, income and expense, and filterable by text,
//! amount range and type.

pub mod action;
pub mod app;
pub mod calculator;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod tui;
pub mod ui;
