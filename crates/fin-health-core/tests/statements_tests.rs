use fin_health_core::config::ScoringConfig;
use fin_health_core::ratios::calculate_multi_year_ratios;
use fin_health_core::statements::RawStatementBundle;
use fin_health_core::trends::{analyze_trends, MetricDirection};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn three_year_bundle() -> RawStatementBundle {
    serde_json::from_value(serde_json::json!({
        "registration_number": "50103258901",
        "balance_sheets": [
            {"fiscal_year": 2020, "total_assets": "1000", "current_liabilities": 100, "total_current_assets": 150},
            {"fiscal_year": 2021, "total_assets": "1100", "current_liabilities": 100, "total_current_assets": 180},
            {"fiscal_year": 2022, "total_assets": "1210", "current_liabilities": 100, "total_current_assets": 210}
        ],
        "income_statements": [
            {"fiscal_year": 2020, "net_turnover": 800, "net_income": 50},
            {"fiscal_year": 2021, "net_turnover": 900, "net_income": 60},
            {"fiscal_year": 2022, "net_turnover": 900, "net_income": 30},
            {"fiscal_year": "n/a", "net_turnover": 1}
        ],
        "cash_flows": [
            {"fiscal_year": 2022, "cfo_dm_net_operating_cash_flow": 120}
        ]
    }))
    .unwrap()
}

#[test]
fn test_bundle_accepts_cash_flows_alias() {
    let set = three_year_bundle().normalize();
    assert_eq!(set.cash_flows.len(), 1);
    assert_eq!(set.income_statements.len(), 4);
    assert_eq!(set.income_statements[3].fiscal_year, None);
}

#[test]
fn test_ratio_series_ascending_with_cash_flow_ratio() {
    let set = three_year_bundle().normalize();
    let series = calculate_multi_year_ratios(
        &set.balance_sheets,
        &set.income_statements,
        &set.cash_flows,
        &ScoringConfig::default(),
    );
    let years: Vec<i32> = series.iter().map(|y| y.fiscal_year).collect();
    assert_eq!(years, vec![2020, 2021, 2022]);
    assert_eq!(series[0].ratios.current_ratio, Some(dec!(1.5)));
    assert_eq!(series[0].ratios.operating_cash_flow_ratio, None);
    assert_eq!(series[2].ratios.operating_cash_flow_ratio, Some(dec!(1.2)));
}

#[test]
fn test_trends_over_bundle() {
    let set = three_year_bundle().normalize();
    let t = analyze_trends(&set, &ScoringConfig::default()).unwrap();
    assert_eq!(t.years, vec![2020, 2021, 2022]);

    let direction = |name: &str| {
        t.metrics
            .iter()
            .find(|m| m.metric == name)
            .and_then(|m| m.direction)
    };
    assert_eq!(direction("revenue"), Some(MetricDirection::Flat));
    assert_eq!(direction("net_income"), Some(MetricDirection::Down));
    assert_eq!(direction("total_assets"), Some(MetricDirection::Up));

    let g = t.growth_rates.unwrap();
    assert_eq!(g.profit_growth, Some(dec!(-50)));
    assert_eq!(g.assets_growth, Some(dec!(10)));
}
