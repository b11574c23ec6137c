//! Property-based tests for budget module.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use yojitsu_shared::types::{AccountId, UserId, VendorId, VersionId};

use super::error::VersionError;
use super::grid::{build_budget_grid, summarize_budgets};
use super::types::{BudgetVersion, CalculationType};
use super::version::VersionService;
use crate::record::{GridKey, GridShape};
use crate::testing::{create_test_budget, create_test_master, fy2024, ym};

const ACCOUNTS: [&str; 3] = ["acc_001", "acc_002", "acc_003"];
const VENDORS: [Option<&str>; 3] = [None, Some("vnd_001"), Some("vnd_002")];

fn arb_budgets() -> impl Strategy<Value = Vec<super::Budget>> {
    // Two trailing months fall outside FY2024.
    let months: Vec<String> = ym("202404")
        .through(ym("202505"))
        .map(|m| m.to_string())
        .collect();

    prop::collection::vec(
        (0usize..3, 0usize..3, 0usize..14, -1_000_000i64..10_000_000),
        0..60,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .map(|(a, v, m, amount)| {
                create_test_budget(ACCOUNTS[a], VENDORS[v], &months[m], Decimal::from(amount))
            })
            .collect()
    })
}

proptest! {
    /// Every row's annual total equals the sum of its months and of the
    /// in-year budgets of its (account, vendor) pair.
    #[test]
    fn test_grid_annual_total_round_trip(budgets in arb_budgets()) {
        let master = create_test_master();
        let grid = build_budget_grid(&budgets, &GridShape::new(fy2024()), &master);

        for row in &grid {
            prop_assert_eq!(row.monthly_budgets.len(), 12);
            let months: Decimal = row.monthly_budgets.iter().map(|m| m.amount).sum();
            prop_assert_eq!(row.annual_total, months);

            let contributing: Decimal = budgets
                .iter()
                .filter(|b| b.account_id == row.account_id && b.vendor_id == row.vendor_id)
                .filter(|b| fy2024().contains(b.year_month))
                .map(|b| b.budget_amount)
                .sum();
            prop_assert_eq!(row.annual_total, contributing);
        }
    }

    /// Building the grid twice yields identical output.
    #[test]
    fn test_grid_is_idempotent(budgets in arb_budgets()) {
        let master = create_test_master();
        let shape = GridShape::from_master(fy2024(), &master);

        let first = build_budget_grid(&budgets, &shape, &master);
        let second = build_budget_grid(&budgets, &shape, &master);

        prop_assert_eq!(first, second);
    }

    /// The summary total equals the sum of all in-year budgets.
    #[test]
    fn test_summary_total(budgets in arb_budgets()) {
        let summary = summarize_budgets(&budgets, &fy2024(), &create_test_master());
        let expected: Decimal = budgets
            .iter()
            .filter(|b| fy2024().contains(b.year_month))
            .map(|b| b.budget_amount)
            .sum();

        prop_assert_eq!(summary.total_amount, expected);
        prop_assert_eq!(
            summary.cost_of_sales_total + summary.selling_admin_total,
            expected
        );
    }
}

#[test]
fn test_grid_layout() {
    let master = create_test_master();
    let mut linked = create_test_budget("acc_002", None, "202406", dec!(2025000));
    linked.calculation_type = CalculationType::FactorLinked;
    let budgets = vec![
        create_test_budget("acc_001", Some("vnd_001"), "202404", dec!(800000)),
        create_test_budget("acc_001", Some("vnd_001"), "202405", dec!(850000)),
        create_test_budget("acc_001", Some("vnd_001"), "202406", dec!(900000)),
        linked,
        create_test_budget("acc_001", Some("vnd_001"), "202304", dec!(1)),
    ];

    let shape = GridShape {
        fiscal_year: fy2024(),
        rows: vec![
            GridKey::new(AccountId::from("acc_003"), None),
            GridKey::new(AccountId::from("acc_002"), None),
        ],
    };
    let grid = build_budget_grid(&budgets, &shape, &master);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0].account_id.as_str(), "acc_003");
    assert_eq!(grid[0].annual_total, Decimal::ZERO);
    assert!(grid[0].monthly_budgets.iter().all(|m| m.budget_id.is_none()));

    assert_eq!(grid[1].account_name, "Salaries");
    assert!(grid[1].has_factor_link);
    assert!(grid[1].monthly_budgets[2].is_calculated);
    assert!(!grid[1].monthly_budgets[3].is_calculated);

    let outsourcing = &grid[2];
    assert_eq!(outsourcing.vendor_id, Some(VendorId::from("vnd_001")));
    assert_eq!(outsourcing.vendor_name.as_deref(), Some("Alpha Co."));
    assert_eq!(outsourcing.annual_total, dec!(2550000));
    assert_eq!(outsourcing.monthly_budgets[0].month, 4);
    assert_eq!(outsourcing.monthly_budgets[11].year_month.to_string(), "202503");
    assert!(!outsourcing.has_factor_link);
}

#[test]
fn test_summary_split() {
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(100)),
        create_test_budget("acc_002", None, "202404", dec!(40)),
        create_test_budget("acc_003", None, "202503", dec!(60)),
        create_test_budget("acc_404", None, "202405", dec!(5)),
    ];

    let summary = summarize_budgets(&budgets, &fy2024(), &create_test_master());

    assert_eq!(summary.total_amount, dec!(205));
    assert_eq!(summary.cost_of_sales_total, dec!(100));
    assert_eq!(summary.selling_admin_total, dec!(100));
    assert_eq!(summary.monthly_totals[0].amount, dec!(140));
    assert_eq!(summary.monthly_totals[11].amount, dec!(60));
    assert_eq!(summary.row_count, 4);
}

fn create_test_version(confirmed: bool) -> BudgetVersion {
    BudgetVersion {
        id: VersionId::from("ver_normal"),
        name: "normal".to_string(),
        description: None,
        is_confirmed: confirmed,
        confirmed_by: None,
        confirmed_at: None,
        forked_from: None,
    }
}

#[test]
fn test_confirm_version() {
    let at = Utc.with_ymd_and_hms(2024, 3, 31, 18, 0, 0).unwrap();
    let user = UserId::from("user_001");

    let confirmed = VersionService::confirm(&create_test_version(false), &user, at).unwrap();
    assert!(confirmed.is_confirmed);
    assert_eq!(confirmed.confirmed_by, Some(user.clone()));
    assert_eq!(confirmed.confirmed_at, Some(at));

    assert_eq!(
        VersionService::confirm(&confirmed, &user, at),
        Err(VersionError::AlreadyConfirmed(VersionId::from("ver_normal")))
    );
    assert_eq!(
        VersionService::ensure_editable(&confirmed),
        Err(VersionError::VersionConfirmed(VersionId::from("ver_normal")))
    );
    assert!(VersionService::ensure_editable(&create_test_version(false)).is_ok());
}

#[test]
fn test_fork_copies_rows_forward() {
    let source = create_test_version(true);
    let mut other = create_test_budget("acc_002", None, "202404", dec!(7));
    other.version_id = VersionId::from("ver_optimistic");
    let budgets = vec![
        create_test_budget("acc_001", None, "202404", dec!(800000)),
        create_test_budget("acc_001", None, "202405", dec!(850000)),
        other,
    ];
    let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();

    let (version, rows) = VersionService::fork(
        &source,
        &budgets,
        " revised ",
        Some(&UserId::from("user_002")),
        at,
    )
    .unwrap();

    assert_eq!(version.name, "revised");
    assert!(!version.is_confirmed);
    assert_eq!(version.forked_from, Some(source.id.clone()));
    assert_eq!(rows.len(), 2);
    for (copy, original) in rows.iter().zip(&budgets) {
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.version_id, version.id);
        assert_eq!(copy.budget_amount, original.budget_amount);
        assert_eq!(copy.year_month, original.year_month);
        assert_eq!(copy.created_at, at);
    }
    // Source rows are untouched.
    assert_eq!(budgets[0].version_id.as_str(), "ver_normal");

    assert_eq!(
        VersionService::fork(&source, &budgets, "  ", None, at),
        Err(VersionError::EmptyName)
    );
}

#[test]
fn test_legacy_factor_spelling() {
    let parsed: CalculationType = serde_json::from_str("\"factor\"").unwrap();
    assert_eq!(parsed, CalculationType::FactorLinked);
    assert_eq!(
        serde_json::to_string(&CalculationType::FactorLinked).unwrap(),
        "\"factor_linked\""
    );
}
