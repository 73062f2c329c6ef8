//! Presentation sink contract.
//!
//! The game never draws anything itself. It hands status text, chart data,
//! HUD snapshots and control states to a [`PresentationSink`].

use serde::Serialize;

use crate::{PricePoint, TradingDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

/// The single status line; each message replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl From<&PricePoint> for ChartPoint {
    fn from(point: &PricePoint) -> Self {
        Self {
            label: point.date.format_iso(),
            value: point.price,
        }
    }
}

/// Full line-chart dataset, sent when a new game replaces the old chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartPayload {
    pub fn from_points(dataset_label: impl Into<String>, points: &[PricePoint]) -> Self {
        Self {
            dataset_label: dataset_label.into(),
            labels: points.iter().map(|p| p.date.format_iso()).collect(),
            values: points.iter().map(|p| p.price).collect(),
        }
    }

    pub fn push(&mut self, point: &ChartPoint) {
        self.labels.push(point.label.clone());
        self.values.push(point.value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ticker, current day and score as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Hud {
    pub ticker: Option<String>,
    pub current_date: Option<TradingDate>,
    pub score: u32,
}

impl Hud {
    pub fn ticker_text(&self) -> &str {
        self.ticker.as_deref().unwrap_or("—")
    }

    pub fn date_text(&self) -> String {
        self.current_date
            .map(TradingDate::format_human)
            .unwrap_or_else(|| String::from("—"))
    }
}

/// Which intents the front end should currently offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Controls {
    pub start: bool,
    pub predict: bool,
    pub end: bool,
}

pub trait PresentationSink {
    fn show_status(&mut self, status: &StatusMessage);

    /// Tear down the current chart and draw `chart` from scratch.
    fn reset_chart(&mut self, chart: &ChartPayload);

    fn append_point(&mut self, point: &ChartPoint);

    fn update_hud(&mut self, hud: &Hud);

    fn update_controls(&mut self, controls: Controls) {
        let _ = controls;
    }
}

/// Sink that keeps the latest state of every surface in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    pub status: Option<StatusMessage>,
    pub chart: Option<ChartPayload>,
    pub hud: Hud,
    pub controls: Controls,
    pub chart_resets: usize,
}

impl PresentationSink for MemorySink {
    fn show_status(&mut self, status: &StatusMessage) {
        self.status = Some(status.clone());
    }

    fn reset_chart(&mut self, chart: &ChartPayload) {
        self.chart = Some(chart.clone());
        self.chart_resets += 1;
    }

    fn append_point(&mut self, point: &ChartPoint) {
        if let Some(chart) = self.chart.as_mut() {
            chart.push(point);
        }
    }

    fn update_hud(&mut self, hud: &Hud) {
        self.hud = hud.clone();
    }

    fn update_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }
}
