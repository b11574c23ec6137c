//! Master data types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use yojitsu_shared::types::{AccountId, VendorId};

/// Account classification used for cost partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Cost of sales (売上原価).
    CostOfSales,
    /// Selling, general and administrative expenses (販管費).
    SellingAdmin,
}

impl AccountCategory {
    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CostOfSales => "cost_of_sales",
            Self::SellingAdmin => "selling_admin",
        }
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account (勘定科目).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account code shown in reports.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category.
    pub category: AccountCategory,
    /// Whether the account is in use.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Sort key for grids and reports.
    #[serde(default)]
    pub display_order: i32,
}

/// A vendor (取引先).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Vendor ID.
    pub id: VendorId,
    /// Vendor code shown in reports.
    pub code: String,
    /// Vendor name.
    pub name: String,
    /// Contact person.
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Contact e-mail.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the vendor is in use.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Read-only lookup over accounts and vendors.
///
/// Built once from a snapshot; calculation code never reaches past it into a store.
#[derive(Debug, Clone, Default)]
pub struct MasterData {
    accounts: HashMap<AccountId, Account>,
    vendors: HashMap<VendorId, Vendor>,
}

impl MasterData {
    /// Builds the lookup.
    #[must_use]
    pub fn new(
        accounts: impl IntoIterator<Item = Account>,
        vendors: impl IntoIterator<Item = Vendor>,
    ) -> Self {
        Self {
            accounts: accounts.into_iter().map(|a| (a.id.clone(), a)).collect(),
            vendors: vendors.into_iter().map(|v| (v.id.clone(), v)).collect(),
        }
    }

    /// Looks up an account.
    #[must_use]
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Looks up a vendor.
    #[must_use]
    pub fn vendor(&self, id: &VendorId) -> Option<&Vendor> {
        self.vendors.get(id)
    }

    /// Account display name, falling back to the raw ID.
    #[must_use]
    pub fn account_name(&self, id: &AccountId) -> String {
        self.account(id)
            .map_or_else(|| id.to_string(), |a| a.name.clone())
    }

    /// Account code, falling back to the raw ID.
    #[must_use]
    pub fn account_code(&self, id: &AccountId) -> String {
        self.account(id)
            .map_or_else(|| id.to_string(), |a| a.code.clone())
    }

    /// Account category, if the account is known.
    #[must_use]
    pub fn account_category(&self, id: &AccountId) -> Option<AccountCategory> {
        self.account(id).map(|a| a.category)
    }

    /// Vendor display name, falling back to the raw ID.
    #[must_use]
    pub fn vendor_name(&self, id: &VendorId) -> String {
        self.vendor(id)
            .map_or_else(|| id.to_string(), |v| v.name.clone())
    }

    /// Vendor code, falling back to the raw ID.
    #[must_use]
    pub fn vendor_code(&self, id: &VendorId) -> String {
        self.vendor(id)
            .map_or_else(|| id.to_string(), |v| v.code.clone())
    }

    /// Active accounts ordered by display order, then code.
    #[must_use]
    pub fn active_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().filter(|a| a.is_active).collect();
        accounts.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.code.cmp(&b.code))
        });
        accounts
    }
}
