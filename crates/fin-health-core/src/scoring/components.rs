//! Category scores (0-100) from the latest year's ratios and growth rates.
//!
//! Each category sums the points of its metric ladders and clamps the total
//! to [0, 100]. The ladders are fixed business rules; changing a rung
//! changes published scores.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ladder::{rung, Direction, Ladder};
use super::Category;
use crate::ratios::{FinancialRatios, GrowthRates};
use crate::types::Score;

/// Growth score when fewer than two aligned years are available.
pub const NEUTRAL_GROWTH_SCORE: Decimal = dec!(50);

const TURNOVER_NEUTRAL_POINTS: Decimal = dec!(15);

// ---------------------------------------------------------------------------
// Ladders
// ---------------------------------------------------------------------------

const HIGHER: Ladder = Ladder {
    metric: "",
    direction: Direction::HigherIsBetter,
    rungs: &[],
    when_missing: Decimal::ZERO,
    zero_is_missing: true,
};

// Liquidity
pub const CURRENT_RATIO: Ladder = Ladder {
    metric: "current_ratio",
    rungs: &[
        rung(dec!(2.0), dec!(50)),
        rung(dec!(1.5), dec!(40)),
        rung(dec!(1.0), dec!(25)),
        rung(dec!(0.5), dec!(10)),
    ],
    ..HIGHER
};
pub const QUICK_RATIO: Ladder = Ladder {
    metric: "quick_ratio",
    rungs: &[
        rung(dec!(1.5), dec!(30)),
        rung(dec!(1.0), dec!(25)),
        rung(dec!(0.7), dec!(15)),
        rung(dec!(0.3), dec!(8)),
    ],
    ..HIGHER
};
pub const CASH_RATIO: Ladder = Ladder {
    metric: "cash_ratio",
    rungs: &[
        rung(dec!(0.3), dec!(20)),
        rung(dec!(0.2), dec!(15)),
        rung(dec!(0.1), dec!(10)),
        rung(dec!(0.05), dec!(5)),
    ],
    ..HIGHER
};

// Profitability
pub const NET_PROFIT_MARGIN: Ladder = Ladder {
    metric: "net_profit_margin",
    rungs: &[
        rung(dec!(15), dec!(30)),
        rung(dec!(10), dec!(25)),
        rung(dec!(5), dec!(20)),
        rung(dec!(0), dec!(10)),
    ],
    ..HIGHER
};
pub const RETURN_ON_ASSETS: Ladder = Ladder {
    metric: "return_on_assets",
    rungs: &[
        rung(dec!(15), dec!(25)),
        rung(dec!(10), dec!(20)),
        rung(dec!(5), dec!(15)),
        rung(dec!(0), dec!(8)),
    ],
    ..HIGHER
};
pub const RETURN_ON_EQUITY: Ladder = Ladder {
    metric: "return_on_equity",
    rungs: &[
        rung(dec!(20), dec!(25)),
        rung(dec!(15), dec!(20)),
        rung(dec!(10), dec!(15)),
        rung(dec!(0), dec!(8)),
    ],
    ..HIGHER
};
pub const GROSS_PROFIT_MARGIN: Ladder = Ladder {
    metric: "gross_profit_margin",
    rungs: &[
        rung(dec!(50), dec!(20)),
        rung(dec!(30), dec!(16)),
        rung(dec!(20), dec!(12)),
        rung(dec!(10), dec!(8)),
        rung(dec!(0), dec!(4)),
    ],
    ..HIGHER
};

// Solvency
pub const DEBT_TO_EQUITY: Ladder = Ladder {
    metric: "debt_to_equity",
    direction: Direction::LowerIsBetter,
    rungs: &[
        rung(dec!(0.3), dec!(40)),
        rung(dec!(0.6), dec!(30)),
        rung(dec!(1.0), dec!(20)),
        rung(dec!(2.0), dec!(10)),
    ],
    when_missing: Decimal::ZERO,
    zero_is_missing: false,
};
pub const DEBT_TO_ASSETS: Ladder = Ladder {
    metric: "debt_to_assets",
    direction: Direction::LowerIsBetter,
    rungs: &[
        rung(dec!(30), dec!(30)),
        rung(dec!(50), dec!(25)),
        rung(dec!(70), dec!(15)),
        rung(dec!(90), dec!(8)),
    ],
    when_missing: Decimal::ZERO,
    zero_is_missing: true,
};
pub const EQUITY_RATIO: Ladder = Ladder {
    metric: "equity_ratio",
    rungs: &[
        rung(dec!(70), dec!(30)),
        rung(dec!(50), dec!(25)),
        rung(dec!(30), dec!(15)),
        rung(dec!(10), dec!(8)),
    ],
    ..HIGHER
};

// Efficiency
pub const ASSET_TURNOVER: Ladder = Ladder {
    metric: "asset_turnover",
    rungs: &[
        rung(dec!(2.0), dec!(40)),
        rung(dec!(1.5), dec!(32)),
        rung(dec!(1.0), dec!(25)),
        rung(dec!(0.5), dec!(15)),
        rung(dec!(0.1), dec!(8)),
    ],
    ..HIGHER
};
pub const INVENTORY_TURNOVER: Ladder = Ladder {
    metric: "inventory_turnover",
    rungs: &[
        rung(dec!(12), dec!(30)), // monthly
        rung(dec!(6), dec!(25)),
        rung(dec!(4), dec!(20)), // quarterly
        rung(dec!(2), dec!(12)),
        rung(dec!(1), dec!(8)), // annual
    ],
    when_missing: TURNOVER_NEUTRAL_POINTS,
    ..HIGHER
};
pub const RECEIVABLES_TURNOVER: Ladder = Ladder {
    metric: "receivables_turnover",
    rungs: &[
        rung(dec!(12), dec!(30)),
        rung(dec!(8), dec!(25)),
        rung(dec!(6), dec!(20)),
        rung(dec!(4), dec!(12)),
        rung(dec!(2), dec!(8)),
    ],
    when_missing: TURNOVER_NEUTRAL_POINTS,
    ..HIGHER
};

// Growth. A rate missing from an otherwise available growth set reads as 0%.
const GROWTH: Ladder = Ladder {
    zero_is_missing: false,
    ..HIGHER
};

pub const REVENUE_GROWTH: Ladder = Ladder {
    metric: "revenue_growth",
    rungs: &[
        rung(dec!(20), dec!(40)),
        rung(dec!(10), dec!(32)),
        rung(dec!(5), dec!(25)),
        rung(dec!(0), dec!(15)),
        rung(dec!(-5), dec!(8)),
    ],
    ..GROWTH
};
pub const PROFIT_GROWTH: Ladder = Ladder {
    metric: "profit_growth",
    rungs: &[
        rung(dec!(25), dec!(40)),
        rung(dec!(15), dec!(32)),
        rung(dec!(5), dec!(25)),
        rung(dec!(0), dec!(15)),
        rung(dec!(-10), dec!(8)),
    ],
    ..GROWTH
};
pub const ASSETS_GROWTH: Ladder = Ladder {
    metric: "assets_growth",
    rungs: &[
        rung(dec!(15), dec!(20)),
        rung(dec!(10), dec!(16)),
        rung(dec!(5), dec!(12)),
        rung(dec!(0), dec!(8)),
        rung(dec!(-5), dec!(4)),
    ],
    ..GROWTH
};

/// Every ladder, grouped by category.
pub const LADDERS: &[(Category, &[Ladder])] = &[
    (Category::Liquidity, &[CURRENT_RATIO, QUICK_RATIO, CASH_RATIO]),
    (
        Category::Profitability,
        &[NET_PROFIT_MARGIN, RETURN_ON_ASSETS, RETURN_ON_EQUITY, GROSS_PROFIT_MARGIN],
    ),
    (Category::Solvency, &[DEBT_TO_EQUITY, DEBT_TO_ASSETS, EQUITY_RATIO]),
    (
        Category::Efficiency,
        &[ASSET_TURNOVER, INVENTORY_TURNOVER, RECEIVABLES_TURNOVER],
    ),
    (Category::Growth, &[REVENUE_GROWTH, PROFIT_GROWTH, ASSETS_GROWTH]),
];

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub liquidity: Score,
    pub profitability: Score,
    pub solvency: Score,
    pub efficiency: Score,
    pub growth: Score,
}

impl ComponentScores {
    pub fn get(&self, category: Category) -> Score {
        match category {
            Category::Liquidity => self.liquidity,
            Category::Profitability => self.profitability,
            Category::Solvency => self.solvency,
            Category::Efficiency => self.efficiency,
            Category::Growth => self.growth,
        }
    }

    /// Mean of the four ratio-driven categories (growth excluded).
    pub fn ratio_mean(&self) -> Score {
        (self.liquidity + self.profitability + self.solvency + self.efficiency) / dec!(4)
    }
}

/// Points one metric contributed to its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoints {
    pub category: Category,
    pub metric: String,
    pub value: Option<Decimal>,
    pub points: Decimal,
    pub max_points: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn liquidity_score(ratios: &FinancialRatios) -> Score {
    sum_clamped(&[
        CURRENT_RATIO.points(ratios.current_ratio),
        QUICK_RATIO.points(ratios.quick_ratio),
        CASH_RATIO.points(ratios.cash_ratio),
    ])
}

pub fn profitability_score(ratios: &FinancialRatios) -> Score {
    sum_clamped(&[
        NET_PROFIT_MARGIN.points(ratios.net_profit_margin),
        RETURN_ON_ASSETS.points(ratios.return_on_assets),
        RETURN_ON_EQUITY.points(ratios.return_on_equity),
        GROSS_PROFIT_MARGIN.points(ratios.gross_profit_margin),
    ])
}

pub fn solvency_score(ratios: &FinancialRatios) -> Score {
    sum_clamped(&[
        DEBT_TO_EQUITY.points(ratios.debt_to_equity),
        DEBT_TO_ASSETS.points(ratios.debt_to_assets),
        EQUITY_RATIO.points(ratios.equity_ratio),
    ])
}

pub fn efficiency_score(ratios: &FinancialRatios) -> Score {
    sum_clamped(&[
        ASSET_TURNOVER.points(ratios.asset_turnover),
        INVENTORY_TURNOVER.points(ratios.inventory_turnover),
        RECEIVABLES_TURNOVER.points(ratios.receivables_turnover),
    ])
}

/// Growth score; neutral when no growth rates could be derived.
pub fn growth_score(growth: Option<&GrowthRates>) -> Score {
    match growth {
        None => NEUTRAL_GROWTH_SCORE,
        Some(g) => sum_clamped(&[
            REVENUE_GROWTH.points(Some(g.revenue_growth.unwrap_or_default())),
            PROFIT_GROWTH.points(Some(g.profit_growth.unwrap_or_default())),
            ASSETS_GROWTH.points(Some(g.assets_growth.unwrap_or_default())),
        ]),
    }
}

pub fn score_components(ratios: &FinancialRatios, growth: Option<&GrowthRates>) -> ComponentScores {
    ComponentScores {
        liquidity: liquidity_score(ratios),
        profitability: profitability_score(ratios),
        solvency: solvency_score(ratios),
        efficiency: efficiency_score(ratios),
        growth: growth_score(growth),
    }
}

/// Per-metric points behind [`score_components`]. Growth metrics are listed
/// only when growth rates are available.
pub fn score_breakdown(ratios: &FinancialRatios, growth: Option<&GrowthRates>) -> Vec<MetricPoints> {
    let mut out = Vec::new();
    for (category, ladders) in LADDERS {
        for ladder in *ladders {
            let value = match *category {
                Category::Growth => match growth {
                    Some(g) => Some(growth_value(g, ladder.metric).unwrap_or_default()),
                    None => continue,
                },
                _ => ratio_value(ratios, ladder.metric),
            };
            out.push(MetricPoints {
                category: *category,
                metric: ladder.metric.to_string(),
                value,
                points: ladder.points(value),
                max_points: ladder.max_points(),
            });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn sum_clamped(points: &[Decimal]) -> Score {
    points
        .iter()
        .copied()
        .sum::<Decimal>()
        .clamp(Decimal::ZERO, dec!(100))
}

fn ratio_value(ratios: &FinancialRatios, metric: &str) -> Option<Decimal> {
    match metric {
        "current_ratio" => ratios.current_ratio,
        "quick_ratio" => ratios.quick_ratio,
        "cash_ratio" => ratios.cash_ratio,
        "net_profit_margin" => ratios.net_profit_margin,
        "return_on_assets" => ratios.return_on_assets,
        "return_on_equity" => ratios.return_on_equity,
        "gross_profit_margin" => ratios.gross_profit_margin,
        "debt_to_equity" => ratios.debt_to_equity,
        "debt_to_assets" => ratios.debt_to_assets,
        "equity_ratio" => ratios.equity_ratio,
        "asset_turnover" => ratios.asset_turnover,
        "inventory_turnover" => ratios.inventory_turnover,
        "receivables_turnover" => ratios.receivables_turnover,
        _ => None,
    }
}

fn growth_value(growth: &GrowthRates, metric: &str) -> Option<Decimal> {
    match metric {
        "revenue_growth" => growth.revenue_growth,
        "profit_growth" => growth.profit_growth,
        "assets_growth" => growth.assets_growth,
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn strong_ratios() -> FinancialRatios {
        FinancialRatios {
            current_ratio: Some(dec!(2.5)),
            quick_ratio: Some(dec!(1.6)),
            cash_ratio: Some(dec!(0.4)),
            gross_profit_margin: Some(dec!(55)),
            net_profit_margin: Some(dec!(18)),
            return_on_assets: Some(dec!(16)),
            return_on_equity: Some(dec!(22)),
            debt_to_equity: Some(dec!(0.2)),
            debt_to_assets: Some(dec!(20)),
            equity_ratio: Some(dec!(80)),
            asset_turnover: Some(dec!(2.1)),
            inventory_turnover: Some(dec!(13)),
            receivables_turnover: Some(dec!(12)),
            operating_cash_flow_ratio: None,
        }
    }

    fn growth(revenue: Option<Decimal>, profit: Option<Decimal>, assets: Option<Decimal>) -> GrowthRates {
        GrowthRates {
            from_year: 2021,
            to_year: 2022,
            revenue_growth: revenue,
            profit_growth: profit,
            assets_growth: assets,
        }
    }

    #[test]
    fn test_category_maxima_are_100() {
        for (category, ladders) in LADDERS {
            let max: Decimal = ladders.iter().map(|l| l.max_points()).sum();
            assert_eq!(max, dec!(100), "{category:?} ladders should top out at 100");
            assert!(ladders.iter().all(|l| l.is_well_formed()));
        }
    }

    #[test]
    fn test_strong_company_scores_full_marks() {
        let scores = score_components(
            &strong_ratios(),
            Some(&growth(Some(dec!(25)), Some(dec!(30)), Some(dec!(20)))),
        );
        assert_eq!(scores.liquidity, dec!(100));
        assert_eq!(scores.profitability, dec!(100));
        assert_eq!(scores.solvency, dec!(100));
        assert_eq!(scores.efficiency, dec!(100));
        assert_eq!(scores.growth, dec!(100));
    }

    #[test]
    fn test_liquidity_ladder_steps() {
        let r = FinancialRatios {
            current_ratio: Some(dec!(1.5)),
            quick_ratio: Some(dec!(0.7)),
            cash_ratio: Some(dec!(0.05)),
            ..Default::default()
        };
        assert_eq!(liquidity_score(&r), dec!(40) + dec!(15) + dec!(5));
    }

    #[test]
    fn test_zero_ratio_counts_as_missing() {
        let r = FinancialRatios {
            net_profit_margin: Some(Decimal::ZERO),
            return_on_assets: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(profitability_score(&r), Decimal::ZERO);
    }

    #[test]
    fn test_negative_profitability_scores_zero() {
        let r = FinancialRatios {
            net_profit_margin: Some(dec!(-3)),
            return_on_assets: Some(dec!(-1)),
            return_on_equity: Some(dec!(-2)),
            gross_profit_margin: Some(dec!(-0.5)),
            ..Default::default()
        };
        assert_eq!(profitability_score(&r), Decimal::ZERO);
    }

    #[test]
    fn test_leverage_rewards_lower_values() {
        let low = FinancialRatios {
            debt_to_equity: Some(dec!(0.3)),
            debt_to_assets: Some(dec!(30)),
            ..Default::default()
        };
        let high = FinancialRatios {
            debt_to_equity: Some(dec!(2.5)),
            debt_to_assets: Some(dec!(95)),
            ..Default::default()
        };
        assert_eq!(solvency_score(&low), dec!(70));
        assert_eq!(solvency_score(&high), Decimal::ZERO);
    }

    #[test]
    fn test_zero_debt_to_equity_is_scored() {
        let r = FinancialRatios {
            debt_to_equity: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(solvency_score(&r), dec!(40));
        assert_eq!(solvency_score(&FinancialRatios::default()), Decimal::ZERO);
    }

    #[test]
    fn test_missing_turnovers_get_neutral_points() {
        assert_eq!(efficiency_score(&FinancialRatios::default()), dec!(30));
        let r = FinancialRatios {
            asset_turnover: Some(dec!(0.8)),
            inventory_turnover: Some(dec!(12.5)),
            ..Default::default()
        };
        assert_eq!(efficiency_score(&r), dec!(15) + dec!(30) + dec!(15));
    }

    #[test]
    fn test_growth_neutral_without_data() {
        assert_eq!(growth_score(None), NEUTRAL_GROWTH_SCORE);
    }

    #[test]
    fn test_growth_missing_rate_reads_as_zero() {
        let g = growth(None, None, None);
        assert_eq!(growth_score(Some(&g)), dec!(15) + dec!(15) + dec!(8));
    }

    #[test]
    fn test_growth_declines() {
        let g = growth(Some(dec!(-5)), Some(dec!(-10.5)), Some(dec!(-6)));
        assert_eq!(growth_score(Some(&g)), dec!(8));
    }

    #[test]
    fn test_breakdown_matches_scores() {
        let ratios = strong_ratios();
        let g = growth(Some(dec!(7)), Some(dec!(1)), None);
        let scores = score_components(&ratios, Some(&g));
        let breakdown = score_breakdown(&ratios, Some(&g));
        assert_eq!(breakdown.len(), 16);
        for category in Category::ALL {
            let total: Decimal = breakdown
                .iter()
                .filter(|m| m.category == category)
                .map(|m| m.points)
                .sum();
            assert_eq!(total.min(dec!(100)), scores.get(category));
        }
    }

    #[test]
    fn test_breakdown_omits_growth_without_data() {
        let breakdown = score_breakdown(&strong_ratios(), None);
        assert_eq!(breakdown.len(), 13);
        assert!(breakdown.iter().all(|m| m.category != Category::Growth));
    }
}
