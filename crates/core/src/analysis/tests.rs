//! Property-based tests for analysis module.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use yojitsu_shared::telemetry::{NoopMonitor, RecordingMonitor};
use yojitsu_shared::types::AmountOverflow;

use super::error::AnalysisError;
use super::service::VarianceAnalyzer;
use super::types::AnalysisSettings;
use crate::testing::{create_test_actual, create_test_budget, create_test_master, fy2024, ym};

fn analyzer() -> VarianceAnalyzer {
    VarianceAnalyzer::new(AnalysisSettings::default(), Arc::new(NoopMonitor))
}

proptest! {
    /// Any period key that is not six digits is rejected.
    #[test]
    fn test_invalid_year_month_rejected(year_month in "[0-9]{0,5}|[0-9]{7,9}|[0-9]{4}-[0-9]{2}|[a-z]{6}") {
        let budgets = vec![create_test_budget("acc_001", None, "202404", dec!(1))];

        let err = analyzer()
            .analyze_variance(&create_test_master(), &budgets, &[], &year_month)
            .unwrap_err();

        prop_assert_eq!(err, AnalysisError::InvalidYearMonthFormat(year_month.clone()));
    }

    /// Rows are sorted by absolute variance amount, largest first.
    #[test]
    fn test_variance_sorted_by_magnitude(
        amounts in prop::collection::vec((0usize..3, -100_000i64..100_000, -100_000i64..100_000), 1..20),
    ) {
        let accounts = ["acc_001", "acc_002", "acc_003"];
        let mut budgets = Vec::new();
        let mut actuals = Vec::new();
        for (a, budget, actual) in amounts {
            budgets.push(create_test_budget(accounts[a], None, "202404", Decimal::from(budget)));
            actuals.push(create_test_actual(accounts[a], None, "2024-04-15", Decimal::from(actual)));
        }

        let rows = analyzer()
            .analyze_variance(&create_test_master(), &budgets, &actuals, "202404")
            .unwrap();

        for pair in rows.windows(2) {
            prop_assert!(pair[0].variance_amount.abs() >= pair[1].variance_amount.abs());
        }
        for row in &rows {
            prop_assert_eq!(row.variance_amount, row.actual_amount - row.budget_amount);
        }
    }
}

#[test]
fn test_unbudgeted_month_is_full_shortfall() {
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(800000)),
        create_test_budget("acc_001", None, "202405", dec!(850000)),
        create_test_budget("acc_001", None, "202406", dec!(900000)),
    ];

    let rows = analyzer()
        .analyze_variance(&create_test_master(), &budgets, &[], "202404")
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.budget_amount, dec!(800000));
    assert_eq!(row.actual_amount, dec!(0));
    assert_eq!(row.variance_amount, dec!(-800000));
    assert_eq!(row.variance_rate, dec!(-100));
    assert!(row.is_significant);
    assert_eq!(row.account_name, "Outsourcing");
}

#[test]
fn test_accounts_without_amounts_in_month_are_skipped() {
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(100)),
        create_test_budget("acc_002", None, "202405", dec!(200)),
        create_test_budget("acc_003", None, "202406", dec!(300)),
    ];
    let actuals = vec![
        create_test_actual("acc_002", None, "2024-05-10", dec!(200)),
        create_test_actual("acc_003", None, "2024-04-10", dec!(0)),
    ];

    let rows = analyzer()
        .analyze_variance(&create_test_master(), &budgets, &actuals, "202404")
        .unwrap();

    let ids: Vec<&str> = rows.iter().map(|r| r.account_id.as_str()).collect();
    assert_eq!(ids, vec!["acc_001"]);
    assert_eq!(rows[0].variance_amount, dec!(-100));
}

#[test]
fn test_zero_budget_rate_is_zero() {
    let actuals = vec![create_test_actual("acc_002", None, "2024-04-20", dec!(5000))];

    let rows = analyzer()
        .analyze_variance(&create_test_master(), &[], &actuals, "202404")
        .unwrap();

    assert_eq!(rows[0].budget_amount, Decimal::ZERO);
    assert_eq!(rows[0].variance_amount, dec!(5000));
    assert_eq!(rows[0].variance_rate, Decimal::ZERO);
    assert!(!rows[0].is_significant);
}

#[test]
fn test_no_data() {
    assert_eq!(
        analyzer().analyze_variance(&create_test_master(), &[], &[], "202404"),
        Err(AnalysisError::NoDataAvailable)
    );
    assert_eq!(
        analyzer().analyze_kpi(&create_test_master(), &[], &[], "202404"),
        Err(AnalysisError::NoDataAvailable)
    );
}

#[test]
fn test_ties_keep_grouping_order() {
    let budgets = vec![
        create_test_budget("acc_003", None, "202404", dec!(100)),
        create_test_budget("acc_001", None, "202404", dec!(100)),
    ];
    let actuals = vec![create_test_actual("acc_002", None, "2024-04-01", dec!(100))];

    let rows = analyzer()
        .analyze_variance(&create_test_master(), &budgets, &actuals, "202404")
        .unwrap();

    let order: Vec<&str> = rows.iter().map(|r| r.account_id.as_str()).collect();
    assert_eq!(order, vec!["acc_003", "acc_001", "acc_002"]);
}

#[test]
fn test_kpi_totals() {
    let master = create_test_master();
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(6000)),
        create_test_budget("acc_002", None, "202404", dec!(5000)),
        create_test_budget("acc_002", None, "202405", dec!(99999)),
    ];
    let actuals = vec![
        create_test_actual("acc_001", None, "2024-04-10", dec!(6750)),
        create_test_actual("acc_002", None, "2024-04-12", dec!(4000)),
    ];

    let kpi = analyzer()
        .analyze_kpi(&master, &budgets, &actuals, "202404")
        .unwrap();

    assert_eq!(kpi.total_budget, dec!(11000));
    assert_eq!(kpi.total_actual, dec!(10750));
    assert_eq!(kpi.total_variance, dec!(-250));
    assert_eq!(kpi.achievement_rate, dec!(97.73));
    assert_eq!(kpi.variance_rate, dec!(-2.27));
    assert_eq!(kpi.cost_of_sales_variance, dec!(750));
    assert_eq!(kpi.selling_admin_variance, dec!(-1000));

    // acc_002: -20%, acc_001: +12.5%
    let ids: Vec<&str> = kpi
        .significant_variances
        .iter()
        .map(|v| v.account_id.as_str())
        .collect();
    assert_eq!(ids, vec!["acc_002", "acc_001"]);
}

#[test]
fn test_kpi_caps_significant_variances() {
    let settings = AnalysisSettings {
        top_n_variances: 1,
        ..AnalysisSettings::default()
    };
    let analyzer = VarianceAnalyzer::new(settings, Arc::new(NoopMonitor));
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(100)),
        create_test_budget("acc_002", None, "202404", dec!(100)),
    ];

    let kpi = analyzer
        .analyze_kpi(&create_test_master(), &budgets, &[], "202404")
        .unwrap();

    assert_eq!(kpi.significant_variances.len(), 1);
}

#[test]
fn test_fiscal_year_analysis() {
    let monitor = Arc::new(RecordingMonitor::default());
    let analyzer = VarianceAnalyzer::new(AnalysisSettings::default(), monitor.clone());
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(1000)),
        create_test_budget("acc_002", None, "202404", dec!(1000)),
        create_test_budget("acc_001", None, "202405", dec!(1000)),
        create_test_budget("acc_001", None, "202503", dec!(1000)),
        create_test_budget("acc_001", None, "202504", dec!(1000)),
    ];
    let actuals = vec![
        create_test_actual("acc_001", None, "2024-04-30", dec!(2100)),
        create_test_actual("acc_001", None, "2024-05-30", dec!(500)),
        create_test_actual("acc_001", None, "2025-03-01", dec!(1050)),
    ];

    let result = analyzer
        .analyze_fiscal_year(&budgets, &actuals, &fy2024())
        .unwrap();

    assert_eq!(result.monthly.len(), 12);
    assert_eq!(result.monthly[0].year_month, ym("202404"));
    assert_eq!(result.monthly[0].budget_amount, dec!(2000));
    assert_eq!(result.monthly[0].variance_rate, dec!(5));
    assert!(!result.monthly[0].is_significant);
    assert_eq!(result.total_budget, dec!(4000));
    assert_eq!(result.total_actual, dec!(3650));
    assert_eq!(result.total_variance, dec!(-350));
    assert_eq!(result.total_variance_rate, dec!(-8.75));

    let significant: Vec<String> = result
        .significant_months
        .iter()
        .map(|m| m.year_month.to_string())
        .collect();
    assert_eq!(significant, vec!["202405"]);
    assert!(monitor.last("analysis.analyze_fiscal_year").is_some());
}

#[test]
fn test_overflowing_totals_are_rejected() {
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", Decimal::MAX),
        create_test_budget("acc_002", None, "202404", Decimal::MAX),
    ];

    assert_eq!(
        analyzer().analyze_kpi(&create_test_master(), &budgets, &[], "202404"),
        Err(AnalysisError::AmountOverflow(AmountOverflow))
    );
    assert_eq!(
        analyzer().analyze_fiscal_year(&budgets, &[], &fy2024()),
        Err(AnalysisError::AmountOverflow(AmountOverflow))
    );
}

#[test]
fn test_overflowing_variance_is_rejected() {
    let budgets = vec![create_test_budget("acc_001", None, "202404", Decimal::MIN)];
    let actuals = vec![create_test_actual("acc_001", None, "2024-04-01", Decimal::MAX)];

    assert_eq!(
        analyzer().analyze_variance(&create_test_master(), &budgets, &actuals, "202404"),
        Err(AnalysisError::AmountOverflow(AmountOverflow))
    );
}
