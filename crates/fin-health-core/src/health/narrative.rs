//! Strengths, weaknesses and recommendations from category scores.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::scoring::{Category, ComponentScores};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

struct Sentences {
    category: Category,
    strength: &'static str,
    weakness: &'static str,
    recommendation: &'static str,
}

const SENTENCES: [Sentences; 5] = [
    Sentences {
        category: Category::Liquidity,
        strength: "Strong liquidity position",
        weakness: "Poor liquidity management",
        recommendation: "Improve cash flow management and reduce current liabilities",
    },
    Sentences {
        category: Category::Profitability,
        strength: "Excellent profitability",
        weakness: "Low profitability margins",
        recommendation: "Focus on cost reduction and revenue optimization",
    },
    Sentences {
        category: Category::Solvency,
        strength: "Healthy debt levels",
        weakness: "High financial leverage",
        recommendation: "Consider debt reduction strategies",
    },
    Sentences {
        category: Category::Efficiency,
        strength: "Efficient asset utilization",
        weakness: "Poor operational efficiency",
        recommendation: "Optimize asset turnover and inventory management",
    },
    Sentences {
        category: Category::Growth,
        strength: "Strong growth trajectory",
        weakness: "Limited growth performance",
        recommendation: "Develop growth strategies and market expansion plans",
    },
];

/// Scores at or above the strength threshold add a strength; scores at or
/// below the weakness threshold add a weakness and a recommendation.
/// Output follows category order.
pub fn build_narrative(scores: &ComponentScores, config: &ScoringConfig) -> Narrative {
    let mut out = Narrative::default();
    for s in &SENTENCES {
        let score = scores.get(s.category);
        if score >= config.strength_threshold {
            out.strengths.push(s.strength.to_string());
        } else if score <= config.weakness_threshold {
            out.weaknesses.push(s.weakness.to_string());
            out.recommendations.push(s.recommendation.to_string());
        }
    }
    out
}
