//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `VendorId` where an `AccountId` is expected.
//! Master data carries human-readable keys such as `acc_001`, so IDs wrap a string rather
//! than a raw UUID. Freshly generated IDs use a per-type prefix plus a time-ordered UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wraps an existing identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh identifier (prefix + UUID v7, time-ordered).
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(AccountId, "acc", "Unique identifier for an account (勘定科目).");
typed_id!(VendorId, "vnd", "Unique identifier for a vendor.");
typed_id!(FactorId, "fact", "Unique identifier for a fluctuation factor.");
typed_id!(ForecastId, "ff", "Unique identifier for a factor forecast row.");
typed_id!(BudgetId, "bud", "Unique identifier for a budget row.");
typed_id!(ActualId, "act", "Unique identifier for an imported actual.");
typed_id!(VersionId, "ver", "Unique identifier for a budget version.");
typed_id!(UserId, "user", "Unique identifier for a user.");
