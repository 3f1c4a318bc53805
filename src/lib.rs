pub mod config;
pub mod dashboard;
pub mod error;
pub mod indicator;
pub mod input;
pub mod market_data;
pub mod model;
pub mod risk_module;
pub mod strategy;
pub mod trade_log;
pub mod ui;
pub mod ui_handlers;
