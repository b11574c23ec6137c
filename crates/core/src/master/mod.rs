//! Master data: accounts, vendors, and the read-only lookup built from them.

pub mod types;

pub use types::{Account, AccountCategory, MasterData, Vendor};
