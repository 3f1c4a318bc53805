use crossterm::event::KeyCode;

use crate::dashboard::load_snapshot;
use crate::indicator::IndicatorParams;
use crate::input::{parse_form_command, parse_main_command, FormCommand, UiCommand};
use crate::market_data::{CachedMarketData, MarketDataSource};
use crate::model::trade::TradeSide;
use crate::strategy::ma_crossover::BacktestConfig;
use crate::strategy::score::SignalRules;
use crate::trade_log::TradeLog;
use crate::ui::{AppState, Mode};

/// Collaborators the key handlers talk to.
pub struct Services<S> {
    pub market: CachedMarketData<S>,
    pub trade_log: TradeLog,
    pub params: IndicatorParams,
    pub rules: SignalRules,
    pub backtest: BacktestConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Fetch and recompute the snapshot for the current coin and window.
pub fn reload<S: MarketDataSource>(app_state: &mut AppState, services: &Services<S>) {
    let coin = app_state.selected_coin().clone();
    match load_snapshot(
        &services.market,
        &coin,
        app_state.days,
        &services.params,
        &services.rules,
    ) {
        Ok(snapshot) => {
            let msg = match &snapshot.signal {
                Ok(reading) => format!(
                    "{} {}d: {} (score {})",
                    coin.label, app_state.days, reading.signal, reading.score
                ),
                Err(e) => format!("{} {}d: no signal, {}", coin.label, app_state.days, e),
            };
            app_state.push_log(msg);
            app_state.set_snapshot(snapshot);
        }
        Err(e) => {
            tracing::error!(coin = %coin.id, days = app_state.days, error = %e, "Snapshot load failed");
            app_state.set_load_error(e.to_string());
        }
    }
}

/// Load the persisted trade log into the state.
pub fn load_trades<S>(app_state: &mut AppState, services: &Services<S>) {
    match services.trade_log.load() {
        Ok(trades) => app_state.trades = trades,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Trade log load failed");
            app_state.push_log(format!("Trade log unreadable: {:#}", e));
        }
    }
}

pub fn handle_key<S: MarketDataSource>(
    key_code: &KeyCode,
    app_state: &mut AppState,
    services: &Services<S>,
) -> LoopControl {
    match app_state.mode {
        Mode::Main => {
            if let Some(cmd) = parse_main_command(key_code) {
                return handle_main_command(cmd, app_state, services);
            }
        }
        Mode::RiskForm => {
            if let Some(cmd) = parse_form_command(key_code) {
                handle_risk_form_command(cmd, app_state);
            }
        }
        Mode::TradeForm => {
            if let Some(cmd) = parse_form_command(key_code) {
                handle_trade_form_command(cmd, app_state, services);
            }
        }
    }
    LoopControl::Continue
}

pub fn handle_main_command<S: MarketDataSource>(
    cmd: UiCommand,
    app_state: &mut AppState,
    services: &Services<S>,
) -> LoopControl {
    match cmd {
        UiCommand::Quit => return LoopControl::Quit,
        UiCommand::NextCoin => {
            app_state.select_next_coin();
            reload(app_state, services);
        }
        UiCommand::PrevCoin => {
            app_state.select_prev_coin();
            reload(app_state, services);
        }
        UiCommand::AdjustDays(delta) => {
            if app_state.adjust_days(delta) {
                reload(app_state, services);
            }
        }
        UiCommand::ToggleIndicators => {
            app_state.show_indicators = !app_state.show_indicators;
        }
        UiCommand::RunBacktest => match &app_state.snapshot {
            Some(snapshot) => {
                let result = snapshot.backtest(&services.backtest);
                tracing::info!(
                    coin = %snapshot.coin.id,
                    days = snapshot.days,
                    final_value = result.final_value,
                    fills = result.fills.len(),
                    "Backtest finished"
                );
                let msg = format!("Backtest result: {:.2} USD", result.final_value);
                app_state.backtest = Some(result);
                app_state.push_log(msg);
            }
            None => app_state.push_log("Backtest skipped: no price data loaded".to_string()),
        },
        UiCommand::OpenRiskForm => app_state.open_risk_form(),
        UiCommand::OpenTradeForm => app_state.open_trade_form(),
        UiCommand::Refresh => {
            services.market.invalidate(&app_state.selected_coin().id);
            reload(app_state, services);
        }
    }
    LoopControl::Continue
}

pub fn handle_risk_form_command(cmd: FormCommand, app_state: &mut AppState) {
    let form = &mut app_state.risk_form;
    match cmd {
        FormCommand::NextField => form.focus_next(),
        FormCommand::PrevField => form.focus_prev(),
        FormCommand::Input(c) => form.input(c),
        FormCommand::Backspace => form.backspace(),
        FormCommand::Submit | FormCommand::Cancel => app_state.mode = Mode::Main,
        FormCommand::SetBuy | FormCommand::SetSell => {}
    }
}

pub fn handle_trade_form_command<S>(
    cmd: FormCommand,
    app_state: &mut AppState,
    services: &Services<S>,
) {
    match cmd {
        FormCommand::NextField => app_state.trade_form.focus_next(),
        FormCommand::PrevField => app_state.trade_form.focus_prev(),
        FormCommand::Input(c) => app_state.trade_form.input(c),
        FormCommand::Backspace => app_state.trade_form.backspace(),
        FormCommand::SetBuy => app_state.trade_side = TradeSide::Buy,
        FormCommand::SetSell => app_state.trade_side = TradeSide::Sell,
        FormCommand::Cancel => app_state.mode = Mode::Main,
        FormCommand::Submit => {
            let trade = match app_state.pending_trade() {
                Ok(trade) => trade,
                Err(reason) => {
                    app_state.push_log(format!("Trade not saved: {}", reason));
                    return;
                }
            };
            let summary = format!(
                "Saved {} {} {} @ {:.2}",
                trade.side, trade.amount, trade.coin, trade.price
            );
            match services.trade_log.append(trade) {
                Ok(trades) => {
                    app_state.trades = trades;
                    app_state.trade_form.clear(crate::ui::TRADE_AMOUNT);
                    app_state.mode = Mode::Main;
                    app_state.push_log(summary);
                }
                Err(e) => {
                    tracing::error!(
                        path = %services.trade_log.path().display(),
                        error = %format!("{:#}", e),
                        "Trade save failed"
                    );
                    app_state.push_log(format!("Trade save FAILED: {:#}", e));
                }
            }
        }
    }
}
