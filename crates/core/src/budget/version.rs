//! Budget version lifecycle.
//!
//! A confirmed version is a baseline: its rows are never changed in place.
//! Further edits go into a fork that copies the rows forward.

use chrono::{DateTime, Utc};
use yojitsu_shared::types::{BudgetId, UserId, VersionId};

use super::error::VersionError;
use super::types::{Budget, BudgetVersion};

/// Version lifecycle operations.
pub struct VersionService;

impl VersionService {
    /// Marks a version as confirmed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyConfirmed` if the version is already confirmed.
    pub fn confirm(
        version: &BudgetVersion,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<BudgetVersion, VersionError> {
        if version.is_confirmed {
            return Err(VersionError::AlreadyConfirmed(version.id.clone()));
        }

        tracing::info!(version_id = %version.id, confirmed_by = %user, "Budget version confirmed");

        Ok(BudgetVersion {
            is_confirmed: true,
            confirmed_by: Some(user.clone()),
            confirmed_at: Some(at),
            ..version.clone()
        })
    }

    /// Rejects changes to a confirmed version.
    ///
    /// # Errors
    ///
    /// Returns `VersionConfirmed` if the version is confirmed.
    pub fn ensure_editable(version: &BudgetVersion) -> Result<(), VersionError> {
        if version.is_confirmed {
            Err(VersionError::VersionConfirmed(version.id.clone()))
        } else {
            Ok(())
        }
    }

    /// Copies a version's rows into a new unconfirmed version.
    ///
    /// Rows of other versions in `budgets` are ignored. Copies get fresh IDs
    /// and timestamps; everything else is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` when `name` is blank.
    pub fn fork(
        source: &BudgetVersion,
        budgets: &[Budget],
        name: &str,
        user: Option<&UserId>,
        at: DateTime<Utc>,
    ) -> Result<(BudgetVersion, Vec<Budget>), VersionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VersionError::EmptyName);
        }

        let version = BudgetVersion {
            id: VersionId::generate(),
            name: name.to_string(),
            description: source.description.clone(),
            is_confirmed: false,
            confirmed_by: None,
            confirmed_at: None,
            forked_from: Some(source.id.clone()),
        };

        let rows: Vec<Budget> = budgets
            .iter()
            .filter(|b| b.version_id == source.id)
            .map(|b| Budget {
                id: BudgetId::generate(),
                version_id: version.id.clone(),
                created_by: user.cloned().or_else(|| b.created_by.clone()),
                created_at: at,
                updated_at: at,
                ..b.clone()
            })
            .collect();

        tracing::info!(
            source_version = %source.id,
            new_version = %version.id,
            rows = rows.len(),
            "Budget version forked"
        );

        Ok((version, rows))
    }
}
