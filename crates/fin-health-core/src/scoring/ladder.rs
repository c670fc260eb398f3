//! Threshold ladders: ordered breakpoint -> points tables.

use rust_decimal::Decimal;
use serde::Serialize;

/// Which side of a breakpoint earns its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `value >= bound`; rungs ordered from the highest bound down.
    HigherIsBetter,
    /// `value <= bound`; rungs ordered from the lowest bound up.
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rung {
    pub bound: Decimal,
    pub points: Decimal,
}

pub const fn rung(bound: Decimal, points: Decimal) -> Rung {
    Rung { bound, points }
}

/// Scoring table for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ladder {
    pub metric: &'static str,
    pub direction: Direction,
    pub rungs: &'static [Rung],
    /// Points awarded when the metric is missing.
    pub when_missing: Decimal,
    /// Treat an exact zero as missing.
    pub zero_is_missing: bool,
}

impl Ladder {
    /// Points of the best rung.
    pub fn max_points(&self) -> Decimal {
        self.rungs.first().map(|r| r.points).unwrap_or(Decimal::ZERO)
    }

    /// Points for a metric value. Values past the last rung score zero.
    pub fn points(&self, value: Option<Decimal>) -> Decimal {
        let value = match value {
            Some(v) if !(self.zero_is_missing && v.is_zero()) => v,
            _ => return self.when_missing,
        };
        self.rungs
            .iter()
            .find(|r| match self.direction {
                Direction::HigherIsBetter => value >= r.bound,
                Direction::LowerIsBetter => value <= r.bound,
            })
            .map(|r| r.points)
            .unwrap_or(Decimal::ZERO)
    }

    /// Rungs are strictly monotonic in the ladder's direction and award
    /// strictly decreasing points.
    pub fn is_well_formed(&self) -> bool {
        self.rungs.windows(2).all(|w| {
            let bounds_ok = match self.direction {
                Direction::HigherIsBetter => w[0].bound > w[1].bound,
                Direction::LowerIsBetter => w[0].bound < w[1].bound,
            };
            bounds_ok && w[0].points > w[1].points
        })
    }
}
