//! Multi-year trend analysis: per-year series, directions and volatility.

pub mod analysis;

pub use analysis::{
    analyze_trends, trend_report, MetricDirection, MetricTrend, TrendAnalysis, TrendPoint,
};
