use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize, Serializer};

use crate::{TradingDate, ValidationError};

/// Which provider field a price was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    AdjustedClose,
    Close,
}

impl PriceBasis {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AdjustedClose => "Adjusted Close",
            Self::Close => "Close",
        }
    }
}

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub price: f64,
    pub basis: PriceBasis,
}

impl PricePoint {
    pub fn new(date: TradingDate, price: f64, basis: PriceBasis) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price" });
        }
        if price < 0.0 {
            return Err(ValidationError::NegativeValue { field: "price" });
        }

        Ok(Self { date, price, basis })
    }
}

/// Daily prices ordered oldest first, one point per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<PricePoint>,
    positions: HashMap<TradingDate, usize>,
}

impl Series {
    /// Sorts points by date; fails if two points share a date.
    pub fn from_points(mut points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        points.sort_by_key(|point| point.date);

        let mut positions = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if positions.insert(point.date, index).is_some() {
                return Err(ValidationError::DuplicateDate {
                    date: point.date.format_iso(),
                });
            }
        }

        Ok(Self { points, positions })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn last_index(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    pub fn position_of(&self, date: TradingDate) -> Option<usize> {
        self.positions.get(&date).copied()
    }

    /// Points in `range`, clamped to the series bounds.
    pub fn window(&self, range: RangeInclusive<usize>) -> &[PricePoint] {
        let (start, end) = range.into_inner();
        if start >= self.points.len() || start > end {
            return &[];
        }
        let end = end.min(self.points.len() - 1);
        &self.points[start..=end]
    }

    /// Number of points that had to fall back to the plain close.
    pub fn fallback_count(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.basis == PriceBasis::Close)
            .count()
    }

    /// Adjusted close only when every point carries it.
    pub fn basis(&self) -> PriceBasis {
        if self.fallback_count() == 0 {
            PriceBasis::AdjustedClose
        } else {
            PriceBasis::Close
        }
    }
}

impl Serialize for Series {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.points.serialize(serializer)
    }
}
