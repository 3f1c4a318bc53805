use chrono::DateTime;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};

use crate::indicator::{IndicatorKind, IndicatorSeries};

pub struct PriceChart<'a> {
    indicators: Option<&'a IndicatorSeries>,
    label: &'a str,
    show_indicators: bool,
    error: Option<&'a str>,
}

impl<'a> PriceChart<'a> {
    pub fn new(indicators: Option<&'a IndicatorSeries>, label: &'a str) -> Self {
        Self {
            indicators,
            label,
            show_indicators: true,
            error: None,
        }
    }

    pub fn show_indicators(mut self, show: bool) -> Self {
        self.show_indicators = show;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

fn time_label(timestamp_ms: f64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn to_points(pairs: Vec<(i64, f64)>) -> Vec<(f64, f64)> {
    pairs.into_iter().map(|(t, v)| (t as f64, v)).collect()
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Price ({}) ", self.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let series = match (self.indicators, self.error) {
            (_, Some(err)) => {
                Paragraph::new(Span::styled(err.to_string(), Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: true })
                    .block(block)
                    .render(area, buf);
                return;
            }
            (Some(series), None) if !series.is_empty() => series,
            _ => {
                Paragraph::new(Span::styled("Loading...", Style::default().fg(Color::DarkGray)))
                    .block(block)
                    .render(area, buf);
                return;
            }
        };

        let price: Vec<(f64, f64)> = series
            .rows()
            .iter()
            .map(|r| (r.timestamp_ms as f64, r.price))
            .collect();
        let overlays: Vec<(String, Color, Vec<(f64, f64)>)> = if self.show_indicators {
            let p = series.params();
            vec![
                (
                    format!("SMA{}", p.sma_fast),
                    Color::Green,
                    to_points(series.defined(IndicatorKind::SmaFast)),
                ),
                (
                    format!("SMA{}", p.sma_slow),
                    Color::Yellow,
                    to_points(series.defined(IndicatorKind::SmaSlow)),
                ),
                (
                    format!("EMA{}", p.ema_span),
                    Color::Magenta,
                    to_points(series.defined(IndicatorKind::Ema)),
                ),
            ]
        } else {
            Vec::new()
        };

        let (x_min, x_max) = (price[0].0, price[price.len() - 1].0);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (_, v) in price.iter().chain(overlays.iter().flat_map(|(_, _, pts)| pts.iter())) {
            y_min = y_min.min(*v);
            y_max = y_max.max(*v);
        }
        let pad = ((y_max - y_min) * 0.05).max(0.01);

        let mut datasets = vec![Dataset::default()
            .name("Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&price)];
        for (name, color, points) in &overlays {
            datasets.push(
                Dataset::default()
                    .name(name.as_str())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(points),
            );
        }

        let x_mid = (x_min + x_max) / 2.0;
        let y_labels = [y_min, (y_min + y_max) / 2.0, y_max].map(|v| format!("{:.2}", v));
        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([x_min, x_max.max(x_min + 1.0)])
                    .labels([time_label(x_min), time_label(x_mid), time_label(x_max)]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([y_min - pad, y_max + pad])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}
