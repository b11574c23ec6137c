//! CSV rendering of report tables.
//!
//! One document with three titled sections separated by blank lines.

use std::io::Write as _;

use ::csv::{Writer, WriterBuilder};

use super::error::ExportError;
use super::types::ReportTables;

pub(super) const MONTHLY_TITLE: &str = "Monthly Comparison";
pub(super) const ACCOUNT_TITLE: &str = "Account Details";
pub(super) const VENDOR_TITLE: &str = "Vendor Summary";

pub(super) const MONTHLY_HEADER: [&str; 5] = [
    "Year-Month",
    "Budget",
    "Actual",
    "Variance",
    "Variance Rate (%)",
];
pub(super) const ACCOUNT_HEADER: [&str; 7] = [
    "Account Code",
    "Account Name",
    "Category",
    "Budget",
    "Actual",
    "Variance",
    "Variance Rate (%)",
];
pub(super) const VENDOR_HEADER: [&str; 6] = [
    "Vendor Code",
    "Vendor Name",
    "Budget",
    "Actual",
    "Variance",
    "Variance Rate (%)",
];

/// Renders `tables` as CSV bytes.
pub fn render_csv(tables: &ReportTables) -> Result<Vec<u8>, ExportError> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    wtr.write_record([MONTHLY_TITLE])?;
    wtr.write_record(MONTHLY_HEADER)?;
    for row in &tables.monthly {
        wtr.write_record([
            row.year_month.to_string(),
            row.budget_amount.to_string(),
            row.actual_amount.to_string(),
            row.variance_amount.to_string(),
            row.variance_rate.to_string(),
        ])?;
    }

    blank_line(&mut wtr)?;
    wtr.write_record([ACCOUNT_TITLE])?;
    wtr.write_record(ACCOUNT_HEADER)?;
    for detail in &tables.accounts {
        wtr.write_record([
            detail.account_code.clone(),
            detail.account_name.clone(),
            detail.category.map(|c| c.to_string()).unwrap_or_default(),
            detail.total_budget.to_string(),
            detail.total_actual.to_string(),
            detail.total_variance.to_string(),
            detail.total_variance_rate.to_string(),
        ])?;
    }

    blank_line(&mut wtr)?;
    wtr.write_record([VENDOR_TITLE])?;
    wtr.write_record(VENDOR_HEADER)?;
    for vendor in &tables.vendors {
        wtr.write_record([
            vendor.vendor_code.clone(),
            vendor.vendor_name.clone(),
            vendor.total_budget.to_string(),
            vendor.total_actual.to_string(),
            vendor.total_variance.to_string(),
            vendor.total_variance_rate.to_string(),
        ])?;
    }

    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

// `write_record` of an empty record emits `""`; the separator is written raw.
fn blank_line(wtr: &mut Writer<Vec<u8>>) -> Result<(), ExportError> {
    wtr.flush()?;
    let placeholder = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    let mut buf = std::mem::replace(wtr, placeholder)
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    buf.write_all(b"\n")?;
    *wtr = WriterBuilder::new().flexible(true).from_writer(buf);
    Ok(())
}
