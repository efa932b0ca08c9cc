use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::{workbook_error, AppResult, Error};

use super::model::{ShiftRecord, NO_RECORDED_SHIFT};

/// Physical rows of export banner noise above the header row
const NOISE_ROWS: usize = 3;

const EMPLOYEE_COL: &str = "Employee Name";
const ROTA_COL: &str = "Rota";
const DATE_COL: &str = "Date of Shift";
const RECORDED_COL: &str = "Recorded";

/// Read the first worksheet of an uploaded workbook into shift records.
///
/// The first three physical rows are skipped, the fourth must carry the
/// required column headers. Rows without an employee, rota, or date are
/// treated as trailing padding and dropped.
pub fn read_records(data: &[u8]) -> AppResult<Vec<ShiftRecord>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data)).map_err(workbook_error)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_error("workbook has no sheets"))?;
    let range = workbook.worksheet_range(&sheet).map_err(workbook_error)?;

    // The used range may already start below the top of the sheet; only
    // skip whatever part of the noise rows it still contains.
    let start_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows().skip(NOISE_ROWS.saturating_sub(start_row));

    let header = rows.next().ok_or(Error::EmptyUpload)?;
    let employee_col = find_column(header, EMPLOYEE_COL)?;
    let rota_col = find_column(header, ROTA_COL)?;
    let date_col = find_column(header, DATE_COL)?;
    let recorded_col = find_column(header, RECORDED_COL)?;

    let mut records = Vec::new();
    for row in rows {
        let (Some(employee), Some(rota), Some(date)) = (
            cell_text(row, employee_col),
            cell_text(row, rota_col),
            cell_text(row, date_col),
        ) else {
            continue;
        };

        // Resolve the no-shift sentinel to an absent value here, once
        let recorded = cell_text(row, recorded_col).filter(|text| text != NO_RECORDED_SHIFT);

        records.push(ShiftRecord {
            employee,
            rota,
            date,
            recorded,
        });
    }

    if records.is_empty() {
        return Err(Error::EmptyUpload);
    }

    Ok(records)
}

fn find_column(header: &[Data], name: &str) -> AppResult<usize> {
    header
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Cell content as trimmed text; empty cells come back as `None`
fn cell_text(row: &[Data], col: usize) -> Option<String> {
    let text = match row.get(col)? {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        // Native Excel dates are rendered day-first so date columns read
        // the same whether the export wrote text or real dates
        Data::DateTime(dt) => dt.as_datetime()?.format("%d/%m/%Y").to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
