use fin_health_core::bankruptcy::{altman_z_score, ZScoreZone};
use fin_health_core::config::{GrowthMethod, ScoringConfig};
use fin_health_core::health::{
    assess_financial_health, score_health, HealthGrade, RiskTier, TrendDirection,
};
use fin_health_core::ratios::calculate_multi_year_ratios;
use fin_health_core::statements::{BalanceSheet, IncomeStatement, RawStatementBundle, StatementSet};
use fin_health_core::HealthScoreError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn bundle_json() -> &'static str {
    r#"{
        "registration_number": "40003032065",
        "balance_sheets": [{
            "year": 2022,
            "currency": "eur",
            "total_current_assets": 200,
            "current_liabilities": "100",
            "cash": 50,
            "inventories": 20.0,
            "accounts_receivable": 40,
            "total_assets": 500,
            "equity": 300,
            "non_current_liabilities": 50,
            "auditor_name": "ignored"
        }],
        "income_statements": [{
            "fiscal_year": 2022,
            "net_turnover": 400,
            "net_income": 40,
            "income_before_income_taxes": 50,
            "by_function_gross_profit": 150,
            "by_function_cost_of_goods_sold": 250
        }],
        "cash_flows": []
    }"#
}

fn scenario() -> StatementSet {
    let bundle: RawStatementBundle = serde_json::from_str(bundle_json()).unwrap();
    bundle.normalize()
}

fn year(y: i32, turnover: Decimal, net_income: Decimal, total_assets: Decimal) -> (BalanceSheet, IncomeStatement) {
    (
        BalanceSheet {
            fiscal_year: Some(y),
            total_current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            cash: Some(dec!(50)),
            total_assets: Some(total_assets),
            equity: Some(dec!(300)),
            ..Default::default()
        },
        IncomeStatement {
            fiscal_year: Some(y),
            net_turnover: Some(turnover),
            net_income: Some(net_income),
            ..Default::default()
        },
    )
}

fn multi_year(rows: &[(i32, Decimal, Decimal, Decimal)]) -> StatementSet {
    let (balance_sheets, income_statements): (Vec<_>, Vec<_>) = rows
        .iter()
        .map(|&(y, t, n, a)| year(y, t, n, a))
        .unzip();
    StatementSet {
        balance_sheets,
        income_statements,
        cash_flows: vec![],
    }
}

// ===========================================================================
// End-to-end
// ===========================================================================

#[test]
fn test_single_year_scenario() {
    let a = score_health("40003032065", &scenario(), &ScoringConfig::default()).unwrap();

    let r = &a.latest_ratios;
    assert_eq!(r.current_ratio, Some(dec!(2)));
    assert_eq!(r.quick_ratio, Some(dec!(1.8)));
    assert_eq!(r.net_profit_margin, Some(dec!(10)));
    assert_eq!(r.debt_to_equity, Some(dec!(0.5)));
    let roe = r.return_on_equity.unwrap();
    assert!((roe - dec!(13.33)).abs() < dec!(0.01));

    // 100 / 71 / 85 / 70 / neutral growth
    assert_eq!(a.liquidity_score, dec!(100));
    assert_eq!(a.profitability_score, dec!(71));
    assert_eq!(a.solvency_score, dec!(85));
    assert_eq!(a.efficiency_score, dec!(70));
    assert_eq!(a.growth_score, dec!(50));
    assert_eq!(a.health_score, dec!(78.8));
    assert_eq!(a.health_grade, HealthGrade::BPlus);
    assert_eq!(a.risk_level, RiskTier::Low);
    assert_eq!(a.trend_direction, TrendDirection::Stable);

    assert_eq!(a.altman_z_score, Some(dec!(3.41)));
    assert_eq!(a.z_score_zone, Some(ZScoreZone::Safe));
    assert_eq!(a.bankruptcy_risk, Some(dec!(0.03)));

    assert_eq!(
        a.strengths,
        vec![
            "Strong liquidity position",
            "Excellent profitability",
            "Healthy debt levels",
            "Efficient asset utilization",
        ]
    );
    assert!(a.weaknesses.is_empty());
    assert_eq!(a.fiscal_year, Some(2022));
    assert_eq!(a.currency.as_deref(), Some("EUR"));
    assert_eq!(a.registration_number, "40003032065");
}

#[test]
fn test_assessment_is_deterministic() {
    let cfg = ScoringConfig::default();
    let first = score_health("1", &scenario(), &cfg).unwrap();
    let second = score_health("1", &scenario(), &cfg).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_envelope_metadata() {
    let out = assess_financial_health("1", &scenario(), &ScoringConfig::default()).unwrap();
    assert_eq!(out.result.health_score, dec!(78.8));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert_eq!(out.assumptions["max_years"], serde_json::json!(5));
    assert!(out.methodology.contains("health score"));
}

// ===========================================================================
// Error and degradation paths
// ===========================================================================

#[test]
fn test_empty_statements_are_insufficient() {
    let err = score_health("1", &StatementSet::default(), &ScoringConfig::default()).unwrap_err();
    assert!(matches!(err, HealthScoreError::InsufficientData(_)));

    let only_balance = StatementSet {
        balance_sheets: vec![BalanceSheet::default()],
        ..Default::default()
    };
    let err = score_health("1", &only_balance, &ScoringConfig::default()).unwrap_err();
    assert!(matches!(err, HealthScoreError::InsufficientData(_)));
}

#[test]
fn test_all_missing_fields_stay_in_bounds() {
    let set = StatementSet {
        balance_sheets: vec![BalanceSheet::default()],
        income_statements: vec![IncomeStatement::default()],
        cash_flows: vec![],
    };
    let a = score_health("1", &set, &ScoringConfig::default()).unwrap();
    for s in [
        a.health_score,
        a.liquidity_score,
        a.profitability_score,
        a.solvency_score,
        a.efficiency_score,
        a.growth_score,
    ] {
        assert!(s >= Decimal::ZERO && s <= dec!(100));
    }
    // Only neutral turnover points and neutral growth remain
    assert_eq!(a.efficiency_score, dec!(30));
    assert_eq!(a.altman_z_score, None);
    assert_eq!(a.health_grade, HealthGrade::F);
    assert_eq!(a.risk_level, RiskTier::Critical);
}

#[test]
fn test_missing_year_is_excluded_from_series() {
    let (bs_2022, is_2022) = year(2022, dec!(400), dec!(40), dec!(500));
    let (_, is_2021) = year(2021, dec!(300), dec!(30), dec!(500));
    let series = calculate_multi_year_ratios(
        &[bs_2022],
        &[is_2021, is_2022],
        &[],
        &ScoringConfig::default(),
    );
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].fiscal_year, 2022);
}

#[test]
fn test_near_max_values_do_not_overflow() {
    let huge = "60000000000000000000000000000";
    let raw = serde_json::json!({
        "registration_number": "1",
        "balance_sheets": [
            {
                "year": 2021,
                "total_current_assets": huge,
                "inventories": format!("-{huge}"),
                "cash": huge,
                "marketable_securities": huge,
                "current_liabilities": huge,
                "non_current_liabilities": huge,
                "total_assets": 100,
                "equity": 50
            },
            {
                "year": 2022,
                "total_current_assets": huge,
                "inventories": format!("-{huge}"),
                "cash": huge,
                "marketable_securities": huge,
                "current_liabilities": huge,
                "non_current_liabilities": huge,
                "total_assets": 100,
                "equity": 50
            }
        ],
        "income_statements": [
            { "year": 2021, "net_turnover": format!("-{huge}"), "net_income": 10 },
            { "year": 2022, "net_turnover": huge, "net_income": 20 }
        ]
    });
    let bundle: RawStatementBundle = serde_json::from_value(raw).unwrap();
    let set = bundle.normalize();
    assert_eq!(set.balance_sheets[0].current_liabilities, Some(Decimal::from_scientific("6e28").unwrap()));

    let a = score_health("1", &set, &ScoringConfig::default()).unwrap();
    for s in [
        a.health_score,
        a.liquidity_score,
        a.profitability_score,
        a.solvency_score,
        a.efficiency_score,
        a.growth_score,
    ] {
        assert!(s >= Decimal::ZERO && s <= dec!(100));
    }
    let growth = a.growth_rates.unwrap();
    assert_eq!(growth.revenue_growth, None);
    assert_eq!(growth.profit_growth, Some(dec!(100)));
}

#[test]
fn test_altman_zero_assets_is_none() {
    let (mut bs, is) = year(2022, dec!(400), dec!(40), dec!(500));
    bs.total_assets = Some(Decimal::ZERO);
    assert_eq!(altman_z_score(&bs, &is), None);
}

// ===========================================================================
// Multi-year behaviour
// ===========================================================================

#[test]
fn test_growth_from_two_latest_years() {
    let set = multi_year(&[
        (2020, dec!(100), dec!(10), dec!(500)),
        (2021, dec!(400), dec!(40), dec!(500)),
        (2022, dec!(500), dec!(52), dec!(600)),
    ]);
    let a = score_health("1", &set, &ScoringConfig::default()).unwrap();
    let g = a.growth_rates.unwrap();
    assert_eq!((g.from_year, g.to_year), (2021, 2022));
    assert_eq!(g.revenue_growth, Some(dec!(25)));
    assert_eq!(g.profit_growth, Some(dec!(30)));
    assert_eq!(g.assets_growth, Some(dec!(20)));
    assert_eq!(a.growth_score, dec!(100));
    assert_eq!(a.years_analyzed, 3);
    assert_eq!(a.analyzed_years, vec![2020, 2021, 2022]);
}

#[test]
fn test_placeholder_growth_method() {
    let set = multi_year(&[
        (2021, dec!(400), dec!(40), dec!(500)),
        (2022, dec!(500), dec!(52), dec!(600)),
    ]);
    let cfg = ScoringConfig {
        growth_method: GrowthMethod::Placeholder,
        ..ScoringConfig::default()
    };
    let a = score_health("1", &set, &cfg).unwrap();
    // 0% on every metric: 15 + 15 + 8
    assert_eq!(a.growth_score, dec!(38));
}

#[test]
fn test_year_window_drops_old_years() {
    let set = multi_year(&[
        (2018, dec!(100), dec!(10), dec!(500)),
        (2019, dec!(100), dec!(10), dec!(500)),
        (2020, dec!(100), dec!(10), dec!(500)),
    ]);
    let cfg = ScoringConfig {
        max_years: 2,
        ..ScoringConfig::default()
    };
    let a = score_health("1", &set, &cfg).unwrap();
    assert_eq!(a.years_analyzed, 2);
    assert_eq!(a.analyzed_years, vec![2019, 2020]);
}

#[test]
fn test_declining_trend() {
    let mut set = multi_year(&[
        (2021, dec!(1000), dec!(150), dec!(500)),
        (2022, dec!(100), dec!(-20), dec!(500)),
    ]);
    set.balance_sheets[1].current_liabilities = Some(dec!(400));
    set.balance_sheets[1].cash = Some(dec!(5));
    let a = score_health("1", &set, &ScoringConfig::default()).unwrap();
    assert_eq!(a.trend_direction, TrendDirection::Declining);
    assert!(a.weaknesses.contains(&"Poor liquidity management".to_string()));
    assert!(a
        .recommendations
        .contains(&"Improve cash flow management and reduce current liabilities".to_string()));
}
