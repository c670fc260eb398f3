pub mod assessment;
pub mod grading;
pub mod narrative;

pub use assessment::{assess_financial_health, score_health, FinancialHealthAssessment};
pub use grading::{determine_trend, grade_for, risk_tier_for, HealthGrade, RiskTier, TrendDirection};
pub use narrative::{build_narrative, Narrative};
