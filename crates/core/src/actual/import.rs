//! Validation and materialization of imported actual rows.
//!
//! File parsing happens at the edge; this module receives rows that are
//! already typed and checks them against master data.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use yojitsu_shared::types::amount::ensure_within_range;
use yojitsu_shared::types::{AccountId, VendorId, YearMonth};
use yojitsu_shared::{AppError, Measurement, SharedMonitor};

use super::types::Actual;
use crate::master::MasterData;

/// Row numbers in reports are 1-based and skip the header line.
const FIRST_DATA_ROW: usize = 2;

/// What happens to existing actuals of the imported months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Keep existing actuals and add the new ones.
    #[default]
    Append,
    /// Drop existing actuals of every imported month first.
    Replace,
}

/// One typed row of an import file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualImportRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Vendor ID.
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A problem with one field of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// Row number in the source file.
    pub row_number: usize,
    /// Offending column.
    pub column: String,
    /// What is wrong.
    pub message: String,
    /// Offending value.
    pub value: String,
}

/// Outcome of an import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Source file name.
    pub file_name: String,
    /// Import mode.
    pub mode: ImportMode,
    /// Import timestamp.
    pub imported_at: DateTime<Utc>,
    /// Rows received.
    pub total_rows: usize,
    /// Rows turned into actuals.
    pub success_rows: usize,
    /// Rows rejected.
    pub error_rows: usize,
    /// Every field problem found.
    pub errors: Vec<ImportRowError>,
    /// Actuals built from the valid rows.
    pub imported: Vec<Actual>,
}

impl ImportReport {
    /// Distinct months touched by the imported actuals, ascending.
    #[must_use]
    pub fn months(&self) -> Vec<YearMonth> {
        let mut months: Vec<YearMonth> = self.imported.iter().map(|a| a.year_month).collect();
        months.sort_unstable();
        months.dedup();
        months
    }
}

/// Import errors that reject the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// No rows were given.
    #[error("Import contains no rows")]
    EmptyImport,

    /// Source file name is blank.
    #[error("Source file name must not be empty")]
    MissingFileName,
}

impl From<ImportError> for AppError {
    fn from(e: ImportError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Validates import rows and builds actuals from the valid ones.
#[derive(Clone)]
pub struct ActualImporter {
    monitor: SharedMonitor,
}

impl ActualImporter {
    /// Creates an importer.
    #[must_use]
    pub fn new(monitor: SharedMonitor) -> Self {
        Self { monitor }
    }

    /// Checks every row and returns a report.
    ///
    /// Invalid rows are reported and skipped; valid rows become actuals
    /// stamped with the file name and import time.
    ///
    /// # Errors
    ///
    /// Returns `EmptyImport` when `rows` is empty and `MissingFileName` when
    /// `file_name` is blank.
    pub fn import(
        &self,
        master: &MasterData,
        rows: Vec<ActualImportRow>,
        file_name: &str,
        imported_at: DateTime<Utc>,
        mode: ImportMode,
    ) -> Result<ImportReport, ImportError> {
        let _m = Measurement::start(self.monitor.as_ref(), "actual.import");

        if file_name.trim().is_empty() {
            return Err(ImportError::MissingFileName);
        }
        if rows.is_empty() {
            return Err(ImportError::EmptyImport);
        }

        let total_rows = rows.len();
        let mut errors = Vec::new();
        let mut imported = Vec::with_capacity(total_rows);
        let mut error_rows = 0;

        for (i, row) in rows.into_iter().enumerate() {
            let row_errors = validate_row(master, &row, i + FIRST_DATA_ROW);
            if row_errors.is_empty() {
                let mut actual =
                    Actual::new(row.account_id, row.vendor_id, row.transaction_date, row.amount);
                actual.description = row.description;
                actual.source_file_name = Some(file_name.to_string());
                actual.imported_at = Some(imported_at);
                imported.push(actual);
            } else {
                error_rows += 1;
                errors.extend(row_errors);
            }
        }

        let report = ImportReport {
            file_name: file_name.to_string(),
            mode,
            imported_at,
            total_rows,
            success_rows: imported.len(),
            error_rows,
            errors,
            imported,
        };

        if report.error_rows > 0 {
            tracing::warn!(
                file_name,
                total_rows,
                error_rows = report.error_rows,
                "Actual import finished with rejected rows"
            );
        } else {
            tracing::info!(file_name, total_rows, mode = ?mode, "Actual import validated");
        }

        Ok(report)
    }
}

fn validate_row(master: &MasterData, row: &ActualImportRow, row_number: usize) -> Vec<ImportRowError> {
    let mut errors = Vec::new();
    let mut reject = |column: &str, message: &str, value: String| {
        errors.push(ImportRowError {
            row_number,
            column: column.to_string(),
            message: message.to_string(),
            value,
        });
    };

    if master.account(&row.account_id).is_none() {
        reject("account_id", "Unknown account", row.account_id.to_string());
    }
    if let Some(vendor_id) = &row.vendor_id
        && master.vendor(vendor_id).is_none()
    {
        reject("vendor_id", "Unknown vendor", vendor_id.to_string());
    }
    if row.amount.is_zero() {
        reject("amount", "Amount must not be zero", row.amount.to_string());
    }
    if ensure_within_range(row.amount).is_err() {
        reject("amount", "Amount exceeds the supported range", row.amount.to_string());
    }

    errors
}
