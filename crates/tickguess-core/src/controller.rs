//! Intent dispatch.
//!
//! [`GameController`] owns the one [`GameSession`], drives the loader and the
//! selector for `Start`, and renders every outcome through a
//! [`PresentationSink`]. All methods take `&mut self`, so a second intent
//! cannot run while a `Start` is awaiting the network.

use std::sync::Arc;

use crate::data_source::SeriesSource;
use crate::presentation::{PresentationSink, StatusMessage};
use crate::selector::StartWindow;
use crate::session::{Direction, EndSummary, GameSession, Prediction};
use crate::{GameError, Intent, Symbol, TradingDate};

/// Source of "today" for start-day selection.
pub trait Clock: Send + Sync {
    fn today(&self) -> TradingDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> TradingDate {
        TradingDate::today_utc()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TradingDate);

impl Clock for FixedClock {
    fn today(&self) -> TradingDate {
        self.0
    }
}

/// What a successfully dispatched intent did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Started { symbol: Symbol, start_index: usize },
    Predicted(Prediction),
    Ended(EndSummary),
}

pub struct GameController<S> {
    source: Arc<dyn SeriesSource>,
    sink: S,
    session: GameSession,
    window: StartWindow,
    clock: Arc<dyn Clock>,
    rng: fastrand::Rng,
}

impl<S: PresentationSink> GameController<S> {
    pub fn new(source: Arc<dyn SeriesSource>, sink: S) -> Self {
        Self {
            source,
            sink,
            session: GameSession::new(),
            window: StartWindow::default(),
            clock: Arc::new(SystemClock),
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_window(mut self, window: StartWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Pushes the current HUD and controls to the sink.
    pub fn refresh(&mut self) {
        self.sink.update_hud(&self.session.hud());
        self.sink.update_controls(self.session.controls());
    }

    /// Runs one intent. Errors are already shown as status when this returns.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<Outcome, GameError> {
        match intent {
            Intent::Start(ticker) => self.start(&ticker).await,
            Intent::Predict(direction) => self.predict(direction).map(Outcome::Predicted),
            Intent::End => self.end().map(Outcome::Ended),
        }
    }

    pub async fn start(&mut self, ticker: &str) -> Result<Outcome, GameError> {
        if !self.session.can_start() {
            let error = GameError::invalid_state(crate::Operation::Start, self.session.state());
            return Err(self.report(error));
        }

        let symbol = match Symbol::parse(ticker) {
            Ok(symbol) => symbol,
            Err(error) => return Err(self.report(error.into())),
        };

        self.session.begin_start()?;
        self.sink
            .show_status(&StatusMessage::info("Loading market data…"));
        self.refresh();

        match self.load_and_install(symbol).await {
            Ok(outcome) => {
                self.sink
                    .show_status(&StatusMessage::info("Make your prediction: Up or Down?"));
                self.refresh();
                Ok(outcome)
            }
            Err(error) => {
                self.session.abort_start();
                self.refresh();
                Err(self.report(error))
            }
        }
    }

    async fn load_and_install(&mut self, symbol: Symbol) -> Result<Outcome, GameError> {
        tracing::info!(symbol = %symbol, source = self.source.name(), "starting game");

        let series = self.source.daily_series(&symbol).await?;
        let today = self.clock.today();
        let start_index = self.window.choose(&series, today, &mut self.rng)?;

        let chart = self.session.complete_start(
            symbol.clone(),
            series,
            start_index,
            self.window.lookback,
        )?;
        self.sink.reset_chart(&chart);

        tracing::info!(symbol = %symbol, start_index, "game started");
        Ok(Outcome::Started {
            symbol,
            start_index,
        })
    }

    pub fn predict(&mut self, direction: Direction) -> Result<Prediction, GameError> {
        let prediction = match self.session.predict(direction) {
            Ok(prediction) => prediction,
            Err(error) => {
                self.refresh();
                return Err(self.report(error));
            }
        };

        tracing::debug!(
            ?direction,
            movement = ?prediction.movement,
            correct = prediction.correct,
            score = prediction.score,
            "prediction scored"
        );

        self.sink.append_point(&prediction.chart_point());
        self.refresh();

        let verdict = if prediction.correct { "Correct!" } else { "Wrong." };
        let tail = if prediction.exhausted {
            "No further data. You can end the game."
        } else {
            "Predict the next day…"
        };
        let text = format!("{verdict} {} {tail}", prediction.movement.describe());
        let status = if prediction.correct {
            StatusMessage::info(text)
        } else {
            StatusMessage::error(text)
        };
        self.sink.show_status(&status);

        Ok(prediction)
    }

    pub fn end(&mut self) -> Result<EndSummary, GameError> {
        let summary = match self.session.end() {
            Ok(summary) => summary,
            Err(error) => return Err(self.report(error)),
        };

        if !summary.already_finished {
            tracing::info!(score = summary.score, "game ended");
        }
        self.refresh();
        self.sink.show_status(&StatusMessage::info(format!(
            "Game ended. Final score: {}.",
            summary.score
        )));

        Ok(summary)
    }

    fn report(&mut self, error: GameError) -> GameError {
        if error.is_upstream_failure() {
            tracing::info!(code = error.code(), "{error}");
        } else {
            tracing::debug!(code = error.code(), "{error}");
        }
        self.sink
            .show_status(&StatusMessage::error(error.user_message()));
        error
    }
}
