pub mod components;
pub mod ladder;

use serde::{Deserialize, Serialize};

pub use components::{score_breakdown, score_components, ComponentScores, MetricPoints};
pub use ladder::{Direction, Ladder, Rung};

/// The five dimensions of the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Liquidity,
    Profitability,
    Solvency,
    Efficiency,
    Growth,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Liquidity,
        Category::Profitability,
        Category::Solvency,
        Category::Efficiency,
        Category::Growth,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Liquidity => write!(f, "liquidity"),
            Self::Profitability => write!(f, "profitability"),
            Self::Solvency => write!(f, "solvency"),
            Self::Efficiency => write!(f, "efficiency"),
            Self::Growth => write!(f, "growth"),
        }
    }
}
