//! Behavior-driven tests for start-day selection
//!
//! These tests verify WHICH days may open a game and that the pick is fair.

use tickguess_core::{
    choose_start, GameError, PriceBasis, PricePoint, Series, StartWindow, TradingDate,
};
use time::Duration;

fn today() -> TradingDate {
    TradingDate::parse("2024-09-16").expect("valid date")
}

/// One point per calendar day, the newest `newest_age` days before today.
fn series(len: usize, newest_age: i64) -> Series {
    let newest = today().into_inner() - Duration::days(newest_age);
    let points = (0..len)
        .map(|offset| {
            let date = newest - Duration::days((len - 1 - offset) as i64);
            PricePoint::new(
                TradingDate::from_date(date),
                50.0 + offset as f64,
                PriceBasis::AdjustedClose,
            )
            .expect("valid point")
        })
        .collect();
    Series::from_points(points).expect("valid series")
}

// =============================================================================
// Start Day: Eligibility
// =============================================================================

#[test]
fn when_history_is_too_recent_selection_reports_not_enough_data() {
    // Given: Six days of history, all younger than a week
    let recent = series(6, 0);
    let mut rng = fastrand::Rng::with_seed(11);

    // When: A start day is chosen
    let result = choose_start(&recent, today(), &mut rng);

    // Then: No game can be created
    assert_eq!(result, Err(GameError::NotEnoughData));
}

#[test]
fn when_history_is_too_old_selection_reports_not_enough_data() {
    // Given: Thirty days of history ending 200 days ago
    let stale = series(30, 200);
    let mut rng = fastrand::Rng::with_seed(11);

    // Then: Nothing falls in the 7..=100 day window
    assert_eq!(
        choose_start(&stale, today(), &mut rng),
        Err(GameError::NotEnoughData)
    );
}

#[test]
fn age_bounds_are_inclusive() {
    // Given: Points aged exactly 100 and exactly 7 days with history on both sides
    let window = StartWindow::default();
    let history = series(120, 0);
    let aged_100 = history.len() - 1 - 100;
    let aged_7 = history.len() - 1 - 7;

    // Then: Both are candidates; their neighbours outside the window are not
    assert!(window.is_candidate(&history, aged_100, today()));
    assert!(window.is_candidate(&history, aged_7, today()));
    assert!(!window.is_candidate(&history, aged_100 - 1, today()));
    assert!(!window.is_candidate(&history, aged_7 + 1, today()));
}

// =============================================================================
// Start Day: Fairness
// =============================================================================

#[test]
fn every_candidate_is_picked_with_roughly_equal_frequency() {
    // Given: A series with a known candidate set
    let history = series(40, 7);
    let window = StartWindow::default();
    let candidates = window.candidates(&history, today());
    assert!(candidates.len() >= 10, "fixture should offer many candidates");

    // When: Many independent picks are made
    let trials = 40_000;
    let mut counts = vec![0_usize; history.len()];
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..trials {
        let pick = window
            .choose(&history, today(), &mut rng)
            .expect("candidates exist");
        counts[pick] += 1;
    }

    // Then: Only candidates are picked, each close to the uniform share
    let expected = trials as f64 / candidates.len() as f64;
    for (index, count) in counts.iter().enumerate() {
        if candidates.contains(&index) {
            let deviation = (*count as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.15,
                "index {index} picked {count} times, expected about {expected:.0}"
            );
        } else {
            assert_eq!(*count, 0, "non-candidate {index} was picked");
        }
    }
}
