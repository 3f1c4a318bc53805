use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Widget},
};

use super::form::NumericForm;
use super::Mode;
use crate::config::CoinConfig;
use crate::model::signal::{Signal, SignalReading};
use crate::model::trade::{Trade, TradeSide};
use crate::risk_module::RiskAssessment;
use crate::strategy::ma_crossover::BacktestResult;
use crate::strategy::score::SignalError;

fn panel(title: &str, highlight: bool) -> Block<'_> {
    let border = if highlight {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

pub struct StatusBar<'a> {
    pub coin: &'a CoinConfig,
    pub spot_price: Option<f64>,
    pub days: u32,
    pub show_indicators: bool,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let price = self
            .spot_price
            .map(|p| format!("${:.2}", p))
            .unwrap_or_else(|| "---".to_string());
        let indicators = if self.show_indicators {
            Span::styled("IND ON", Style::default().fg(Color::Green))
        } else {
            Span::styled("IND OFF", Style::default().fg(Color::DarkGray))
        };

        let line = Line::from(vec![
            Span::styled(
                " signal-deck ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.coin.label.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                price,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}d", self.days), Style::default().fg(Color::Yellow)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            indicators,
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct SignalPanel<'a> {
    signal: Option<&'a Result<SignalReading, SignalError>>,
}

impl<'a> SignalPanel<'a> {
    pub fn new(signal: Option<&'a Result<SignalReading, SignalError>>) -> Self {
        Self { signal }
    }
}

impl Widget for SignalPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match self.signal {
            Some(Ok(reading)) => {
                let color = match reading.signal {
                    Signal::Buy => Color::Green,
                    Signal::Sell => Color::Red,
                    Signal::Hold => Color::Yellow,
                };
                vec![
                    Line::from(Span::styled(
                        format!("{} Signal", reading.signal),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        label("Score: "),
                        Span::styled(
                            format!("{:+}", reading.score),
                            Style::default().fg(Color::White),
                        ),
                    ]),
                ]
            }
            Some(Err(e)) => vec![
                Line::from(Span::styled("NO SIGNAL", Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Red))),
            ],
            None => vec![Line::from(label("---"))],
        };

        Paragraph::new(lines)
            .block(panel(" Signal ", false))
            .render(area, buf);
    }
}

pub struct BacktestPanel<'a> {
    result: Option<&'a BacktestResult>,
}

impl<'a> BacktestPanel<'a> {
    pub fn new(result: Option<&'a BacktestResult>) -> Self {
        Self { result }
    }
}

impl Widget for BacktestPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match self.result {
            Some(r) => {
                let ret = r.return_pct();
                let color = if ret > 0.0 {
                    Color::Green
                } else if ret < 0.0 {
                    Color::Red
                } else {
                    Color::White
                };
                vec![
                    Line::from(vec![
                        label("Result: "),
                        Span::styled(
                            format!("{:.2} USD", r.final_value),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(vec![
                        label("Return: "),
                        Span::styled(format!("{:+.2}%", ret), Style::default().fg(color)),
                    ]),
                    Line::from(vec![
                        label("Fills:  "),
                        Span::raw(format!(
                            "{}{}",
                            r.fills.len(),
                            if r.holding { " (holding)" } else { "" }
                        )),
                    ]),
                ]
            }
            None => vec![Line::from(label("Press [B] to backtest SMA strategy"))],
        };

        Paragraph::new(lines)
            .block(panel(" Backtest ", false))
            .render(area, buf);
    }
}

fn form_lines(form: &NumericForm, active: bool) -> Vec<Line<'_>> {
    form.fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = active && i == form.focus();
            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            let text = if field.text.is_empty() {
                "-".to_string()
            } else {
                field.text.clone()
            };
            Line::from(vec![
                label(field.label),
                label(": "),
                Span::styled(text, value_style),
            ])
        })
        .collect()
}

pub struct RiskPanel<'a> {
    form: &'a NumericForm,
    assessment: RiskAssessment,
    active: bool,
}

impl<'a> RiskPanel<'a> {
    pub fn new(form: &'a NumericForm, assessment: RiskAssessment, active: bool) -> Self {
        Self {
            form,
            assessment,
            active,
        }
    }
}

impl Widget for RiskPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = form_lines(self.form, self.active);
        let ratio_style = match self.assessment {
            RiskAssessment::Ratio { ratio, .. } if ratio >= 1.0 => Style::default().fg(Color::Green),
            RiskAssessment::Ratio { .. } => Style::default().fg(Color::Yellow),
            RiskAssessment::UndefinedRatio { .. } => Style::default().fg(Color::Red),
            RiskAssessment::Skipped(_) => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(vec![
            label("Risk Reward: "),
            Span::styled(self.assessment.to_string(), ratio_style),
        ]));

        Paragraph::new(lines)
            .block(panel(" StopLoss / TakeProfit ", self.active))
            .render(area, buf);
    }
}

pub struct TradeFormPanel<'a> {
    form: &'a NumericForm,
    side: TradeSide,
    coin_label: &'a str,
}

impl<'a> TradeFormPanel<'a> {
    pub fn new(form: &'a NumericForm, side: TradeSide, coin_label: &'a str) -> Self {
        Self {
            form,
            side,
            coin_label,
        }
    }
}

impl Widget for TradeFormPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let side_color = match self.side {
            TradeSide::Buy => Color::Green,
            TradeSide::Sell => Color::Red,
        };
        let mut lines = vec![Line::from(vec![
            label("Coin: "),
            Span::styled(self.coin_label, Style::default().fg(Color::Cyan)),
            label("  Type: "),
            Span::styled(
                self.side.to_string(),
                Style::default().fg(side_color).add_modifier(Modifier::BOLD),
            ),
        ])];
        lines.extend(form_lines(self.form, true));

        Paragraph::new(lines)
            .block(panel(" Log Trade ", true))
            .render(area, buf);
    }
}

pub struct TradesPanel<'a> {
    trades: &'a [Trade],
}

impl<'a> TradesPanel<'a> {
    pub fn new(trades: &'a [Trade]) -> Self {
        Self { trades }
    }
}

impl Widget for TradesPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(3) as usize;
        let start = self.trades.len().saturating_sub(visible);
        let rows = self.trades[start..].iter().map(|t| {
            let side_color = match t.side {
                TradeSide::Buy => Color::Green,
                TradeSide::Sell => Color::Red,
            };
            Row::new(vec![
                Span::raw(t.coin.clone()),
                Span::styled(t.side.to_string(), Style::default().fg(side_color)),
                Span::raw(format!("{}", t.amount)),
                Span::raw(format!("{:.2}", t.price)),
            ])
        });

        let header = Row::new(vec!["coin", "type", "amount", "price"])
            .style(Style::default().fg(Color::DarkGray));
        let title = format!(" Trades ({}) ", self.trades.len());

        Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(6),
                Constraint::Length(14),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(panel(&title, false))
        .render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a VecDeque<String>,
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a VecDeque<String>) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .messages
            .iter()
            .skip(start)
            .map(|m| Line::from(Span::styled(m.as_str(), Style::default().fg(Color::Gray))))
            .collect();

        Paragraph::new(lines)
            .block(panel(" Log ", false))
            .render(area, buf);
    }
}

pub struct KeybindBar {
    pub mode: Mode,
}

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys: &[(&str, &str)] = match self.mode {
            Mode::Main => &[
                ("[Q]", "uit  "),
                ("[C]", "oin  "),
                ("[+/-]", " days  "),
                ("[I]", "ndicators  "),
                ("[B]", "acktest  "),
                ("[R]", "isk  "),
                ("[T]", "rade  "),
                ("[U]", "pdate  "),
            ],
            Mode::RiskForm => &[
                ("[Tab]", " field  "),
                ("[0-9.]", " edit  "),
                ("[Enter/Esc]", " close  "),
            ],
            Mode::TradeForm => &[
                ("[Tab]", " field  "),
                ("[B/S]", " type  "),
                ("[Enter]", " save  "),
                ("[Esc]", " cancel  "),
            ],
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, text) in keys {
            spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(*text, Style::default().fg(Color::DarkGray)));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
