//! Random start-day selection.
//!
//! A position is a candidate when its date is between `min_age_days` and
//! `max_age_days` before today, at least `lookback` points precede it and at
//! least `lookahead` points follow it. The pick is uniform over candidates.

use serde::{Deserialize, Serialize};

use crate::{GameError, Series, TradingDate};

/// Age and history constraints on the start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartWindow {
    pub min_age_days: i64,
    pub max_age_days: i64,
    /// Points that must precede the start; also the size of the opening chart minus one.
    pub lookback: usize,
    pub lookahead: usize,
}

impl Default for StartWindow {
    fn default() -> Self {
        Self {
            min_age_days: 7,
            max_age_days: 100,
            lookback: 7,
            lookahead: 1,
        }
    }
}

impl StartWindow {
    pub fn is_candidate(&self, series: &Series, index: usize, today: TradingDate) -> bool {
        let Some(point) = series.get(index) else {
            return false;
        };

        let age = point.date.days_before(today);
        (self.min_age_days..=self.max_age_days).contains(&age)
            && index >= self.lookback
            && index + self.lookahead < series.len()
    }

    /// Every eligible start position, ascending.
    pub fn candidates(&self, series: &Series, today: TradingDate) -> Vec<usize> {
        (0..series.len())
            .filter(|&index| self.is_candidate(series, index, today))
            .collect()
    }

    pub fn choose(
        &self,
        series: &Series,
        today: TradingDate,
        rng: &mut fastrand::Rng,
    ) -> Result<usize, GameError> {
        let candidates = self.candidates(series, today);
        if candidates.is_empty() {
            return Err(GameError::NotEnoughData);
        }

        let pick = candidates[rng.usize(..candidates.len())];
        tracing::debug!(candidates = candidates.len(), pick, "chose start day");
        Ok(pick)
    }
}

/// Picks a start position with the default window.
pub fn choose_start(
    series: &Series,
    today: TradingDate,
    rng: &mut fastrand::Rng,
) -> Result<usize, GameError> {
    StartWindow::default().choose(series, today, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PriceBasis, PricePoint};
    use time::Duration;

    /// One point per calendar day ending `newest_age` days before `today`.
    fn daily_series(today: TradingDate, len: usize, newest_age: i64) -> Series {
        let newest = today.into_inner() - Duration::days(newest_age);
        let points = (0..len)
            .map(|offset| {
                let date = newest - Duration::days((len - 1 - offset) as i64);
                PricePoint::new(TradingDate::from_date(date), 100.0, PriceBasis::AdjustedClose)
                    .expect("valid point")
            })
            .collect();
        Series::from_points(points).expect("valid series")
    }

    fn today() -> TradingDate {
        TradingDate::parse("2024-06-28").expect("valid date")
    }

    #[test]
    fn candidates_respect_age_window() {
        // ages run from 149 (index 0) down to 0 (index 149)
        let series = daily_series(today(), 150, 0);
        let candidates = StartWindow::default().candidates(&series, today());

        assert_eq!(candidates.first(), Some(&49));
        assert_eq!(candidates.last(), Some(&142));
        assert_eq!(candidates.len(), 94);
    }

    #[test]
    fn candidates_need_lookback_and_lookahead() {
        // ten points aged 16..=7: index 9 has no successor, indices 0..7 lack history
        let series = daily_series(today(), 10, 7);
        let candidates = StartWindow::default().candidates(&series, today());

        assert_eq!(candidates, vec![7, 8]);
    }

    #[test]
    fn recent_only_history_is_not_enough_data() {
        let series = daily_series(today(), 20, 0);
        let mut rng = fastrand::Rng::with_seed(7);

        // ages 19..=0: indices 7..=12 are old enough and have history
        assert!(choose_start(&series, today(), &mut rng).is_ok());

        let short = daily_series(today(), 6, 0);
        assert_eq!(
            choose_start(&short, today(), &mut rng),
            Err(GameError::NotEnoughData)
        );
    }

    #[test]
    fn empty_series_is_not_enough_data() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            choose_start(&Series::default(), today(), &mut rng),
            Err(GameError::NotEnoughData)
        );
    }

    #[test]
    fn choice_is_always_a_candidate() {
        let series = daily_series(today(), 120, 2);
        let window = StartWindow::default();
        let mut rng = fastrand::Rng::with_seed(42);

        for _ in 0..500 {
            let pick = window.choose(&series, today(), &mut rng).expect("candidates exist");
            assert!(window.is_candidate(&series, pick, today()));
        }
    }
}
