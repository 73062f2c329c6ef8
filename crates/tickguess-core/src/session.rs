//! Game session state machine.
//!
//! ```text
//! Idle ──begin_start──▶ Loading ──complete_start──▶ Playing ──end──▶ Finished
//!   ▲                      │                         │  ▲               │
//!   └──────abort_start─────┘                         └──┘ predict       │
//!   ▲                                                                   │
//!   └──────────────────────────── begin_start ◀─────────────────────────┘
//! ```
//!
//! `Playing` is exhausted once the current index is the last one; the
//! session stays `Playing` until `end` is called.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::presentation::{ChartPayload, ChartPoint, Controls, Hud};
use crate::{GameError, PricePoint, Series, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Playing,
    Finished,
}

impl SessionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutating operations, used to report which one was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Start,
    Predict,
    End,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Predict => "predict",
            Self::End => "end",
        })
    }
}

/// The player's guess for the next trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// What the price actually did between two consecutive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Up,
    Down,
    Flat,
}

impl Movement {
    pub fn between(current: f64, next: f64) -> Self {
        if next > current {
            Self::Up
        } else if next < current {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// A flat day never matches a guess.
    pub const fn matches(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Self::Up, Direction::Up) | (Self::Down, Direction::Down)
        )
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::Up => "It went up.",
            Self::Down => "It went down.",
            Self::Flat => "It stayed the same.",
        }
    }
}

/// Result of one scored prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub direction: Direction,
    pub movement: Movement,
    pub correct: bool,
    pub score: u32,
    pub revealed: PricePoint,
    pub current_index: usize,
    pub exhausted: bool,
}

impl Prediction {
    pub fn chart_point(&self) -> ChartPoint {
        ChartPoint::from(&self.revealed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndSummary {
    pub score: u32,
    /// The session was already finished; nothing changed.
    pub already_finished: bool,
}

/// A single game: ticker, series snapshot, position and score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSession {
    state: SessionState,
    ticker: Option<Symbol>,
    series: Series,
    current_index: Option<usize>,
    score: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub fn ticker(&self) -> Option<&Symbol> {
        self.ticker.as_ref()
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub const fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub fn current_point(&self) -> Option<&PricePoint> {
        self.current_index.and_then(|index| self.series.get(index))
    }

    /// Playing with no later day left to predict.
    pub fn is_exhausted(&self) -> bool {
        self.state == SessionState::Playing
            && self.current_index.is_some()
            && self.current_index == self.series.last_index()
    }

    pub fn controls(&self) -> Controls {
        match self.state {
            SessionState::Idle | SessionState::Finished => Controls {
                start: true,
                predict: false,
                end: false,
            },
            SessionState::Loading => Controls::default(),
            SessionState::Playing => Controls {
                start: false,
                predict: !self.is_exhausted(),
                end: true,
            },
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            ticker: self.ticker.as_ref().map(|symbol| symbol.as_str().to_owned()),
            current_date: self.current_point().map(|point| point.date),
            score: self.score,
        }
    }

    pub const fn can_start(&self) -> bool {
        matches!(self.state, SessionState::Idle | SessionState::Finished)
    }

    /// Enters `Loading`, discarding any previous game.
    pub fn begin_start(&mut self) -> Result<(), GameError> {
        if !self.can_start() {
            return Err(GameError::invalid_state(Operation::Start, self.state));
        }

        *self = Self {
            state: SessionState::Loading,
            ..Self::default()
        };
        Ok(())
    }

    /// Returns to `Idle` after a failed load; no game state survives.
    pub fn abort_start(&mut self) {
        if self.state == SessionState::Loading {
            *self = Self::default();
        }
    }

    /// Installs the loaded series and returns the opening chart: `lookback`
    /// points before the start day plus the start day itself.
    pub fn complete_start(
        &mut self,
        ticker: Symbol,
        series: Series,
        start_index: usize,
        lookback: usize,
    ) -> Result<ChartPayload, GameError> {
        if self.state != SessionState::Loading {
            return Err(GameError::invalid_state(Operation::Start, self.state));
        }

        let playable = start_index >= lookback && start_index + 1 < series.len();
        if !playable {
            self.abort_start();
            return Err(GameError::NotEnoughData);
        }

        let label = format!("{} {}", ticker, series.basis().label());
        let chart = ChartPayload::from_points(label, series.window(start_index - lookback..=start_index));

        self.state = SessionState::Playing;
        self.ticker = Some(ticker);
        self.series = series;
        self.current_index = Some(start_index);
        self.score = 0;

        Ok(chart)
    }

    /// Reveals the next day, scores the guess and advances by one day.
    pub fn predict(&mut self, direction: Direction) -> Result<Prediction, GameError> {
        if self.state != SessionState::Playing {
            return Err(GameError::invalid_state(Operation::Predict, self.state));
        }

        let current_index = self
            .current_index
            .ok_or(GameError::invalid_state(Operation::Predict, self.state))?;
        let (Some(current), Some(next)) = (
            self.series.get(current_index),
            self.series.get(current_index + 1),
        ) else {
            return Err(GameError::NoMoreData);
        };

        let movement = Movement::between(current.price, next.price);
        let correct = movement.matches(direction);
        let revealed = *next;

        if correct {
            self.score += 1;
        }
        self.current_index = Some(current_index + 1);

        Ok(Prediction {
            direction,
            movement,
            correct,
            score: self.score,
            revealed,
            current_index: current_index + 1,
            exhausted: self.is_exhausted(),
        })
    }

    /// Finishes the game; a second call is a no-op.
    pub fn end(&mut self) -> Result<EndSummary, GameError> {
        match self.state {
            SessionState::Playing => {
                self.state = SessionState::Finished;
                Ok(EndSummary {
                    score: self.score,
                    already_finished: false,
                })
            }
            SessionState::Finished => Ok(EndSummary {
                score: self.score,
                already_finished: true,
            }),
            state => Err(GameError::invalid_state(Operation::End, state)),
        }
    }
}
