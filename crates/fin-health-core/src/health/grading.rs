//! Letter grades, risk tiers and trend direction.

use serde::{Deserialize, Serialize};

use crate::config::{GradeBand, RiskBand};
use crate::types::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    F,
}

impl std::fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Improving => write!(f, "IMPROVING"),
            Self::Stable => write!(f, "STABLE"),
            Self::Declining => write!(f, "DECLINING"),
        }
    }
}

/// Grade of the first band whose floor the score reaches. Bands are ordered
/// from the highest floor down, so a score of exactly 100 takes the top band.
pub fn grade_for(score: Score, bands: &[GradeBand]) -> HealthGrade {
    bands
        .iter()
        .find(|b| score >= b.min_score)
        .map(|b| b.grade)
        .unwrap_or(HealthGrade::F)
}

pub fn risk_tier_for(score: Score, bands: &[RiskBand]) -> RiskTier {
    bands
        .iter()
        .find(|b| score >= b.min_score)
        .map(|b| b.tier)
        .unwrap_or(RiskTier::Critical)
}

/// Direction from per-year mean category scores in ascending year order.
/// Only the last two entries are compared; a change of at least `threshold`
/// either way counts.
pub fn determine_trend(yearly_means: &[Score], threshold: Score) -> TrendDirection {
    let [.., previous, latest] = yearly_means else {
        return TrendDirection::Stable;
    };
    let change = *latest - *previous;
    if change >= threshold {
        TrendDirection::Improving
    } else if change <= -threshold {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}
