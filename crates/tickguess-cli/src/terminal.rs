//! Plain-text rendering of the game for an interactive terminal.
//!
//! Every surface is written as it changes: the chart is redrawn whole, the
//! HUD line only when its content differs, and the status as one tagged line.
//! Write failures are parked and surfaced through [`TerminalSink::take_error`]
//! because sink callbacks cannot return errors.

use std::io::{self, Write};

use tickguess_core::{
    ChartPayload, ChartPoint, Controls, Hud, PresentationSink, Severity, StatusMessage,
};

const CHART_HEIGHT: usize = 10;
const CHART_WIDTH: usize = 60;
const AXIS_WIDTH: usize = 10;

const HELP: &str = "\
Commands:
  start <TICKER>   load a ticker and pick a random start day (alias: s)
  up | u           predict the next trading day closes higher
  down | d         predict the next trading day closes lower
  end | e          end the game and show the final score
  help             show this text
  quit             leave
";

pub struct TerminalSink<W: Write> {
    out: W,
    chart: Option<ChartPayload>,
    hud: Option<Hud>,
    controls: Controls,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            chart: None,
            hud: None,
            controls: Controls::default(),
            error: None,
        }
    }

    pub fn write_help(&mut self) {
        self.emit(HELP);
    }

    pub fn write_prompt(&mut self) {
        let prompt = prompt_text(self.controls);
        self.emit(&prompt);
    }

    /// Returns the first write failure since the last call.
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    fn writer(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(error) = result {
            self.error = Some(error);
        }
    }

    fn draw_chart(&mut self) {
        let Some(chart) = &self.chart else {
            return;
        };
        let mut text = render_chart(chart, CHART_HEIGHT, CHART_WIDTH).join("\n");
        text.push('\n');
        self.emit(&text);
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn show_status(&mut self, status: &StatusMessage) {
        let tag = match status.severity {
            Severity::Info => "[info]",
            Severity::Error => "[error]",
        };
        self.emit(&format!("{tag} {}\n", status.text));
    }

    fn reset_chart(&mut self, chart: &ChartPayload) {
        self.chart = Some(chart.clone());
        self.draw_chart();
    }

    fn append_point(&mut self, point: &ChartPoint) {
        if let Some(chart) = self.chart.as_mut() {
            chart.push(point);
        }
        self.draw_chart();
    }

    fn update_hud(&mut self, hud: &Hud) {
        if self.hud.as_ref() == Some(hud) {
            return;
        }
        self.hud = Some(hud.clone());
        self.emit(&format!(
            "Ticker: {}   Date: {}   Score: {}\n",
            hud.ticker_text(),
            hud.date_text(),
            hud.score
        ));
    }

    fn update_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }
}

fn prompt_text(controls: Controls) -> String {
    let mut options = Vec::new();
    if controls.start {
        options.push("start <TICKER>");
    }
    if controls.predict {
        options.push("up | down");
    }
    if controls.end {
        options.push("end");
    }
    options.push("help | quit");
    format!("[{}] > ", options.join(" | "))
}

/// Draws the most recent `width` values as a dot plot `height` rows tall.
/// The newest value is marked with `@`.
pub fn render_chart(chart: &ChartPayload, height: usize, width: usize) -> Vec<String> {
    let mut lines = vec![chart.dataset_label.clone()];
    if chart.is_empty() || height == 0 || width == 0 {
        lines.push(String::from("(no data)"));
        return lines;
    }

    let skip = chart.len().saturating_sub(width);
    let values = &chart.values[skip..];
    let labels = &chart.labels[skip..];
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let rows = values
        .iter()
        .map(|value| {
            if span > 0.0 {
                (((value - min) / span) * (height - 1) as f64).round() as usize
            } else {
                height / 2
            }
        })
        .collect::<Vec<_>>();
    let newest = values.len() - 1;

    for row in (0..height).rev() {
        let axis = if row == height - 1 {
            format!("{max:.2}")
        } else if row == 0 {
            format!("{min:.2}")
        } else {
            String::new()
        };
        let cells = rows
            .iter()
            .enumerate()
            .map(|(column, &at)| match (at == row, column == newest) {
                (true, true) => '@',
                (true, false) => '*',
                (false, _) => ' ',
            })
            .collect::<String>();
        lines.push(format!("{axis:>AXIS_WIDTH$} |{cells}"));
    }

    lines.push(format!("{:>AXIS_WIDTH$} +{}", "", "-".repeat(values.len())));
    let first = labels.first().map(String::as_str).unwrap_or_default();
    let last = labels.last().map(String::as_str).unwrap_or_default();
    lines.push(format!("{:>AXIS_WIDTH$}  {first} .. {last}", ""));
    lines
}
