use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};

use signal_deck::config::Config;
use signal_deck::market_data::{CachedMarketData, CoinGeckoClient};
use signal_deck::strategy::score::SignalRules;
use signal_deck::trade_log::{trade_log_path, TradeLog};
use signal_deck::ui;
use signal_deck::ui::AppState;
use signal_deck::ui_handlers::{self, LoopControl, Services};

const INPUT_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists or SD_CONFIG_PATH points to a config file");
            std::process::exit(1);
        }
    };

    // Log to a file so output does not tear the TUI
    let log_file = std::fs::File::create("signal-deck.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        base_url = %config.market.base_url,
        coins = config.market.coins.len(),
        cache_ttl_secs = config.market.cache_ttl_secs,
        "Starting signal-deck"
    );

    let client = CoinGeckoClient::new(
        &config.market.base_url,
        &config.market.vs_currency,
        config.market.api_key.as_deref(),
        config.market.request_timeout(),
    )
    .context("failed to build market data client")?;
    let services = Services {
        market: CachedMarketData::new(client, config.market.cache_ttl()),
        trade_log: TradeLog::open(&trade_log_path(&config.trade_log.path)),
        params: config.indicators,
        rules: SignalRules::default(),
        backtest: config.backtest.to_backtest_config(),
    };

    let mut app_state = AppState::new(&config);
    ui_handlers::load_trades(&mut app_state, &services);

    let mut terminal = ratatui::init();
    let outcome = run_loop(&mut terminal, &mut app_state, &services);

    ratatui::restore();
    if let Err(e) = &outcome {
        tracing::error!(error = %format!("{:#}", e), "Event loop failed");
    }
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check signal-deck.log for details.");
    outcome
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app_state: &mut AppState,
    services: &Services<CoinGeckoClient>,
) -> Result<()> {
    // Show the empty layout before the first blocking fetch.
    terminal.draw(|frame| ui::render(frame, app_state))?;
    ui_handlers::reload(app_state, services);

    loop {
        terminal.draw(|frame| ui::render(frame, app_state))?;

        if !crossterm::event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        if let Event::Key(key) = crossterm::event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if ui_handlers::handle_key(&key.code, app_state, services) == LoopControl::Quit {
                tracing::info!("User quit");
                return Ok(());
            }
        }
    }
}
