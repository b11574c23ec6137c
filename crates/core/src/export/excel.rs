//! XLSX rendering of report tables, one worksheet per table.
//!
//! Account rows are followed by their monthly rows and vendor rows by their
//! account rows. Detail rows carry an indented label.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::csv::{ACCOUNT_HEADER, MONTHLY_HEADER, VENDOR_HEADER};
use super::error::ExportError;
use super::types::{AccountDetail, MonthlyComparisonRow, ReportTables, VendorSummary};

/// One cell of a sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Cell {
    Text(String),
    Amount(Decimal),
    Empty,
}

/// One sheet row. `detail` rows belong to the summary row above them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SheetRow {
    pub detail: bool,
    pub cells: Vec<Cell>,
}

/// A worksheet before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SheetLayout {
    pub name: &'static str,
    pub header: &'static [&'static str],
    pub rows: Vec<SheetRow>,
}

/// Lays out the Monthly, Accounts and Vendors sheets.
pub(super) fn layout(tables: &ReportTables) -> [SheetLayout; 3] {
    let monthly = tables
        .monthly
        .iter()
        .map(|m| summary(monthly_cells(Cell::Text(m.year_month.to_string()), Vec::new(), m)))
        .collect();

    let mut accounts = Vec::new();
    for d in &tables.accounts {
        accounts.push(summary(account_cells(d)));
        for m in &d.monthly {
            let label = vec![Cell::Text(m.year_month.to_string()), Cell::Empty];
            accounts.push(detail(monthly_cells(Cell::Empty, label, m)));
        }
    }

    let mut vendors = Vec::new();
    for v in &tables.vendors {
        vendors.push(summary(vendor_cells(v)));
        for d in &v.account_details {
            vendors.push(detail(vec![
                Cell::Text(d.account_code.clone()),
                Cell::Text(d.account_name.clone()),
                Cell::Amount(d.total_budget),
                Cell::Amount(d.total_actual),
                Cell::Amount(d.total_variance),
                Cell::Amount(d.total_variance_rate),
            ]));
        }
    }

    [
        SheetLayout {
            name: "Monthly",
            header: &MONTHLY_HEADER,
            rows: monthly,
        },
        SheetLayout {
            name: "Accounts",
            header: &ACCOUNT_HEADER,
            rows: accounts,
        },
        SheetLayout {
            name: "Vendors",
            header: &VENDOR_HEADER,
            rows: vendors,
        },
    ]
}

/// Renders `tables` as an XLSX workbook.
pub fn render_excel(tables: &ReportTables) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let indent = Format::new().set_indent(1);

    for sheet_layout in layout(tables) {
        let sheet = workbook.add_worksheet().set_name(sheet_layout.name)?;
        write_header(sheet, sheet_layout.header, &bold)?;
        for (row, sheet_row) in (1u32..).zip(&sheet_layout.rows) {
            for (col, cell) in (0u16..).zip(&sheet_row.cells) {
                match cell {
                    Cell::Text(text) if sheet_row.detail => {
                        sheet.write_string_with_format(row, col, text, &indent)?;
                    }
                    Cell::Text(text) => {
                        sheet.write_string(row, col, text)?;
                    }
                    Cell::Amount(value) => write_amount(sheet, row, col, *value)?,
                    Cell::Empty => {}
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn summary(cells: Vec<Cell>) -> SheetRow {
    SheetRow {
        detail: false,
        cells,
    }
}

fn detail(cells: Vec<Cell>) -> SheetRow {
    SheetRow { detail: true, cells }
}

// `first`, then `label`, then the four amounts of `m`.
fn monthly_cells(first: Cell, label: Vec<Cell>, m: &MonthlyComparisonRow) -> Vec<Cell> {
    let mut cells = vec![first];
    cells.extend(label);
    cells.extend([
        Cell::Amount(m.budget_amount),
        Cell::Amount(m.actual_amount),
        Cell::Amount(m.variance_amount),
        Cell::Amount(m.variance_rate),
    ]);
    cells
}

fn account_cells(d: &AccountDetail) -> Vec<Cell> {
    vec![
        Cell::Text(d.account_code.clone()),
        Cell::Text(d.account_name.clone()),
        d.category.map_or(Cell::Empty, |c| Cell::Text(c.to_string())),
        Cell::Amount(d.total_budget),
        Cell::Amount(d.total_actual),
        Cell::Amount(d.total_variance),
        Cell::Amount(d.total_variance_rate),
    ]
}

fn vendor_cells(v: &VendorSummary) -> Vec<Cell> {
    vec![
        Cell::Text(v.vendor_code.clone()),
        Cell::Text(v.vendor_name.clone()),
        Cell::Amount(v.total_budget),
        Cell::Amount(v.total_actual),
        Cell::Amount(v.total_variance),
        Cell::Amount(v.total_variance_rate),
    ]
}

fn write_header(sheet: &mut Worksheet, header: &[&str], bold: &Format) -> Result<(), XlsxError> {
    for (col, title) in (0u16..).zip(header) {
        sheet.write_string_with_format(0, col, *title, bold)?;
    }
    Ok(())
}

// Cells hold display numbers; amounts that do not fit an f64 are written as text.
fn write_amount(sheet: &mut Worksheet, row: u32, col: u16, value: Decimal) -> Result<(), XlsxError> {
    match value.to_f64() {
        Some(n) => sheet.write_number(row, col, n)?,
        None => sheet.write_string(row, col, value.to_string())?,
    };
    Ok(())
}
