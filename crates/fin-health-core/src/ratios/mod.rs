pub mod calculator;
pub mod multi_year;

pub use calculator::{calculate_financial_ratios, FinancialRatios};
pub use multi_year::{
    align_statements, calculate_growth_rates, calculate_multi_year_ratios, ratio_series,
    AlignedYear, GrowthRates, RatioSeries, YearRatios,
};
