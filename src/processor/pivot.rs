use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::{AppResult, Error};

use super::model::{ParsedShift, ShiftRecord, WideTable};

/// Day-first format of the "Date of Shift" column
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Pivoted slice of one rota group: employees down, shift dates across,
/// cells holding the raw recorded text.
#[derive(Debug, Default)]
pub struct PivotTable {
    employees: Vec<String>,
    dates: Vec<String>,
    cells: HashMap<(usize, usize), String>,
}

impl PivotTable {
    /// Build the pivot from one rota group's records.
    ///
    /// Employees and dates keep their first-appearance order. A second
    /// record for the same employee and date aborts the upload.
    pub fn from_records(records: &[ShiftRecord]) -> AppResult<Self> {
        let mut table = PivotTable::default();
        let mut employee_index: HashMap<String, usize> = HashMap::new();
        let mut date_index: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for record in records {
            let row = *employee_index
                .entry(record.employee.clone())
                .or_insert_with(|| {
                    table.employees.push(record.employee.clone());
                    table.employees.len() - 1
                });
            let col = *date_index.entry(record.date.clone()).or_insert_with(|| {
                table.dates.push(record.date.clone());
                table.dates.len() - 1
            });

            if !seen.insert((row, col)) {
                return Err(Error::DuplicateShift {
                    employee: record.employee.clone(),
                    date: record.date.clone(),
                    rota: record.rota.clone(),
                });
            }

            if let Some(text) = &record.recorded {
                table.cells.insert((row, col), text.clone());
            }
        }

        Ok(table)
    }

    /// Interleave every date column with its computed hours column and fill
    /// the gaps, producing the final serializable table.
    ///
    /// Date columns stay in the order the pivot encountered them, which is
    /// the source row order rather than chronological order.
    pub fn into_wide(self) -> AppResult<WideTable> {
        // Hours per date column, each cell parsed against that column's date
        let mut hours_columns: Vec<(String, Vec<Option<f64>>)> =
            Vec::with_capacity(self.dates.len());
        for (col, date) in self.dates.iter().enumerate() {
            let label = hours_label(date)?;
            let values = (0..self.employees.len())
                .map(|row| {
                    let recorded = self.cells.get(&(row, col)).map(String::as_str);
                    ParsedShift::parse(date, recorded).hours()
                })
                .collect();
            hours_columns.push((label, values));
        }

        let mut headers = Vec::with_capacity(1 + self.dates.len() * 2);
        headers.push("Employee Name".to_string());
        for (date, (label, _)) in self.dates.iter().zip(&hours_columns) {
            headers.push(date.clone());
            headers.push(label.clone());
        }

        let mut rows = Vec::with_capacity(self.employees.len());
        for (row, employee) in self.employees.iter().enumerate() {
            let mut cells = Vec::with_capacity(headers.len());
            cells.push(employee.clone());
            for (col, (_, values)) in hours_columns.iter().enumerate() {
                cells.push(
                    self.cells
                        .get(&(row, col))
                        .cloned()
                        .unwrap_or_else(|| "0".to_string()),
                );
                cells.push(match values[row] {
                    Some(hours) => format!("{:.2}", hours),
                    None => "0".to_string(),
                });
            }
            rows.push(cells);
        }

        Ok(WideTable { headers, rows })
    }
}

/// "<Weekday> Hours" label for a day-first date column
fn hours_label(date: &str) -> AppResult<String> {
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(date.to_string()))?;
    Ok(format!("{} Hours", day.format("%A")))
}

impl WideTable {
    /// Serialize as UTF-8 CSV with a leading unnamed index column, the
    /// layout downstream report consumers already expect.
    pub fn to_csv(&self) -> AppResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);

            let mut header = Vec::with_capacity(self.headers.len() + 1);
            header.push(String::new());
            header.extend(self.headers.iter().cloned());
            writer.write_record(&header)?;

            for (index, row) in self.rows.iter().enumerate() {
                let mut record = Vec::with_capacity(row.len() + 1);
                record.push(index.to_string());
                record.extend(row.iter().cloned());
                writer.write_record(&record)?;
            }

            writer.flush()?;
        }
        Ok(buf)
    }
}
