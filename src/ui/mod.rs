pub mod chart;
pub mod dashboard;
pub mod form;

use std::collections::VecDeque;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::config::{Config, CoinConfig};
use crate::dashboard::Snapshot;
use crate::model::trade::{Trade, TradeSide};
use crate::risk_module::{assess_risk, RiskAssessment};
use crate::strategy::ma_crossover::BacktestResult;

use chart::PriceChart;
use dashboard::{
    BacktestPanel, KeybindBar, LogPanel, RiskPanel, SignalPanel, StatusBar, TradeFormPanel,
    TradesPanel,
};
use form::NumericForm;

const MAX_LOG_MESSAGES: usize = 200;

pub const RISK_ENTRY: usize = 0;
pub const RISK_STOP_LOSS: usize = 1;
pub const RISK_TAKE_PROFIT: usize = 2;
pub const TRADE_AMOUNT: usize = 0;
pub const TRADE_PRICE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Main,
    RiskForm,
    TradeForm,
}

pub struct AppState {
    pub coins: Vec<CoinConfig>,
    pub coin_index: usize,
    pub days: u32,
    pub min_days: u32,
    pub max_days: u32,
    pub show_indicators: bool,
    pub mode: Mode,
    pub snapshot: Option<Snapshot>,
    pub load_error: Option<String>,
    pub backtest: Option<BacktestResult>,
    pub risk_form: NumericForm,
    pub trade_form: NumericForm,
    pub trade_side: TradeSide,
    pub trades: Vec<Trade>,
    pub log_messages: VecDeque<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            coins: config.market.coins.clone(),
            coin_index: 0,
            days: config.chart.default_days,
            min_days: config.chart.min_days,
            max_days: config.chart.max_days,
            show_indicators: config.chart.show_indicators,
            mode: Mode::Main,
            snapshot: None,
            load_error: None,
            backtest: None,
            risk_form: NumericForm::new(&["Entry", "Stop Loss", "Take Profit"]),
            trade_form: NumericForm::new(&["Amount", "Price"]),
            trade_side: TradeSide::Buy,
            trades: Vec::new(),
            log_messages: VecDeque::new(),
        }
    }

    pub fn selected_coin(&self) -> &CoinConfig {
        &self.coins[self.coin_index.min(self.coins.len().saturating_sub(1))]
    }

    pub fn select_next_coin(&mut self) {
        if !self.coins.is_empty() {
            self.coin_index = (self.coin_index + 1) % self.coins.len();
        }
    }

    pub fn select_prev_coin(&mut self) {
        if !self.coins.is_empty() {
            self.coin_index = (self.coin_index + self.coins.len() - 1) % self.coins.len();
        }
    }

    /// Shift the lookback window; returns `true` when the window changed.
    pub fn adjust_days(&mut self, delta: i32) -> bool {
        let next = (self.days as i64 + delta as i64).clamp(self.min_days as i64, self.max_days as i64)
            as u32;
        let changed = next != self.days;
        self.days = next;
        changed
    }

    pub fn spot_price(&self) -> Option<f64> {
        self.snapshot.as_ref().map(|s| s.spot_price)
    }

    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.load_error = None;
        self.backtest = None;
    }

    pub fn set_load_error(&mut self, error: String) {
        self.push_log(format!("Load failed: {}", error));
        self.snapshot = None;
        self.backtest = None;
        self.load_error = Some(error);
    }

    pub fn open_risk_form(&mut self) {
        if self.risk_form.is_empty(RISK_ENTRY) {
            if let Some(price) = self.spot_price() {
                self.risk_form.set_value(RISK_ENTRY, price);
            }
        }
        self.mode = Mode::RiskForm;
    }

    pub fn open_trade_form(&mut self) {
        if self.trade_form.is_empty(TRADE_AMOUNT) {
            self.trade_form.set_value(TRADE_AMOUNT, 0.0);
        }
        if let Some(price) = self.spot_price() {
            self.trade_form.set_value(TRADE_PRICE, price);
        }
        self.mode = Mode::TradeForm;
    }

    pub fn risk_assessment(&self) -> RiskAssessment {
        let field = |i| self.risk_form.value(i).unwrap_or(0.0);
        assess_risk(field(RISK_ENTRY), field(RISK_STOP_LOSS), field(RISK_TAKE_PROFIT))
    }

    /// Build a trade from the trade form, or explain why it cannot be logged.
    pub fn pending_trade(&self) -> Result<Trade, String> {
        let amount = self
            .trade_form
            .value(TRADE_AMOUNT)
            .filter(|a| *a > 0.0)
            .ok_or_else(|| "amount must be a number > 0".to_string())?;
        let price = self
            .trade_form
            .value(TRADE_PRICE)
            .filter(|p| *p > 0.0)
            .ok_or_else(|| "price must be a number > 0".to_string())?;
        Ok(Trade::new(
            &self.selected_coin().label,
            self.trade_side,
            amount,
            price,
        ))
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push_back(msg);
        while self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.pop_front();
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Min(12),    // chart + side panels
            Constraint::Length(8),  // trades + log
            Constraint::Length(1),  // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            coin: state.selected_coin(),
            spot_price: state.spot_price(),
            days: state.days,
            show_indicators: state.show_indicators,
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(outer[1]);

    frame.render_widget(
        PriceChart::new(
            state.snapshot.as_ref().map(|s| &s.indicators),
            &state.selected_coin().label,
        )
        .show_indicators(state.show_indicators)
        .error(state.load_error.as_deref()),
        main_area[0],
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // signal
            Constraint::Length(6), // backtest
            Constraint::Min(7),    // risk or trade form
        ])
        .split(main_area[1]);

    frame.render_widget(
        SignalPanel::new(state.snapshot.as_ref().map(|s| &s.signal)),
        side[0],
    );
    frame.render_widget(BacktestPanel::new(state.backtest.as_ref()), side[1]);
    if state.mode == Mode::TradeForm {
        frame.render_widget(
            TradeFormPanel::new(&state.trade_form, state.trade_side, &state.selected_coin().label),
            side[2],
        );
    } else {
        frame.render_widget(
            RiskPanel::new(
                &state.risk_form,
                state.risk_assessment(),
                state.mode == Mode::RiskForm,
            ),
            side[2],
        );
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer[2]);
    frame.render_widget(TradesPanel::new(&state.trades), bottom[0]);
    frame.render_widget(LogPanel::new(&state.log_messages), bottom[1]);

    frame.render_widget(KeybindBar { mode: state.mode }, outer[3]);
}
