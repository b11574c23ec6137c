//! Fixtures shared by the unit tests of this crate.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use yojitsu_shared::types::{AccountId, BudgetId, FiscalYear, VendorId, VersionId, YearMonth};

use crate::actual::Actual;
use crate::budget::{Budget, CalculationType};
use crate::master::{Account, AccountCategory, MasterData, Vendor};

pub fn create_test_master() -> MasterData {
    let account = |id: &str, code: &str, name: &str, category, order| Account {
        id: AccountId::from(id),
        code: code.to_string(),
        name: name.to_string(),
        category,
        is_active: true,
        display_order: order,
    };
    let vendor = |id: &str, code: &str, name: &str| Vendor {
        id: VendorId::from(id),
        code: code.to_string(),
        name: name.to_string(),
        contact_person: None,
        email: None,
        phone: None,
        is_active: true,
    };

    MasterData::new(
        vec![
            account("acc_001", "5100", "Outsourcing", AccountCategory::CostOfSales, 1),
            account("acc_002", "6100", "Salaries", AccountCategory::SellingAdmin, 2),
            account("acc_003", "6200", "Rent", AccountCategory::SellingAdmin, 3),
        ],
        vec![
            vendor("vnd_001", "V001", "Alpha Co."),
            vendor("vnd_002", "V002", "Beta Inc."),
        ],
    )
}

pub fn fy2024() -> FiscalYear {
    FiscalYear::new(2024, 4).unwrap()
}

pub fn ym(s: &str) -> YearMonth {
    YearMonth::parse(s).unwrap()
}

pub fn create_test_budget(
    account: &str,
    vendor: Option<&str>,
    year_month: &str,
    amount: Decimal,
) -> Budget {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    Budget {
        id: BudgetId::generate(),
        account_id: AccountId::from(account),
        vendor_id: vendor.map(VendorId::from),
        year_month: ym(year_month),
        budget_amount: amount,
        version_id: VersionId::from("ver_normal"),
        calculation_type: CalculationType::Manual,
        linked_factor_id: None,
        basis_value: None,
        created_by: None,
        created_at: at,
        updated_at: at,
    }
}

pub fn create_test_actual(account: &str, vendor: Option<&str>, date: &str, amount: Decimal) -> Actual {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    Actual::new(AccountId::from(account), vendor.map(VendorId::from), date, amount)
}
