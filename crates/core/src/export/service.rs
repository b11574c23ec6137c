//! Report export service.

use yojitsu_shared::{Measurement, SharedMonitor};

use super::csv::render_csv;
use super::error::ExportError;
use super::excel::render_excel;
use super::tables::build_tables;
use super::types::{ExportFile, ExportFormat, ExportOptions};
use crate::actual::Actual;
use crate::budget::Budget;
use crate::master::MasterData;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Renders budget versus actual reports.
#[derive(Clone)]
pub struct ExportService {
    monitor: SharedMonitor,
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService").finish_non_exhaustive()
    }
}

impl ExportService {
    /// Creates an export service.
    #[must_use]
    pub fn new(monitor: SharedMonitor) -> Self {
        Self { monitor }
    }

    /// Renders a report in the requested format.
    ///
    /// # Errors
    ///
    /// `InvalidRange` when the start month is after the end month,
    /// `AmountOverflow` when a total is out of range, `NotImplemented` for PDF,
    /// and serialization errors from the writers.
    pub fn export_report(
        &self,
        master: &MasterData,
        budgets: &[Budget],
        actuals: &[Actual],
        options: &ExportOptions,
    ) -> Result<ExportFile, ExportError> {
        let _m = Measurement::start(self.monitor.as_ref(), "export.export_report");

        if options.start_month > options.end_month {
            return Err(ExportError::InvalidRange {
                start: options.start_month,
                end: options.end_month,
            });
        }

        let tables = build_tables(master, budgets, actuals, options)?;
        let stem = format!("budget_report_{}_{}", options.start_month, options.end_month);

        let file = match options.format {
            ExportFormat::Csv => ExportFile {
                file_name: format!("{stem}.csv"),
                content_type: CSV_CONTENT_TYPE,
                bytes: render_csv(&tables)?,
            },
            ExportFormat::Excel => ExportFile {
                file_name: format!("{stem}.xlsx"),
                content_type: XLSX_CONTENT_TYPE,
                bytes: render_excel(&tables)?,
            },
            ExportFormat::Pdf => {
                tracing::warn!("PDF export requested");
                return Err(ExportError::NotImplemented("PDF"));
            }
        };

        tracing::info!(
            file_name = %file.file_name,
            months = tables.monthly.len(),
            accounts = tables.accounts.len(),
            vendors = tables.vendors.len(),
            bytes = file.bytes.len(),
            "Report exported"
        );

        Ok(file)
    }
}
