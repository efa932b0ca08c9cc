mod ingest;
mod model;
mod parser;
mod pivot;

pub use model::{
    ParsedShift, ProcessingResult, RotaOutput, ShiftRecord, WideTable, NO_RECORDED_SHIFT,
};
pub use pivot::PivotTable;

use crate::error::{AppResult, Error};

/// Process one uploaded workbook into per-rota hours tables.
pub fn process_workbook(data: &[u8]) -> AppResult<ProcessingResult> {
    process_records(ingest::read_records(data)?)
}

/// Process already-ingested shift records.
///
/// Every output filename carries the date of the first record of the whole
/// upload, not the group's own first date. Downstream consumers key on that
/// suffix, so it stays that way.
pub fn process_records(records: Vec<ShiftRecord>) -> AppResult<ProcessingResult> {
    let first = records.first().ok_or(Error::EmptyUpload)?;
    let day_suffix = first.date.replace('/', "_");

    // Rota groups in first-seen order
    let mut groups: Vec<(String, Vec<ShiftRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(rota, _)| *rota == record.rota) {
            Some((_, slice)) => slice.push(record),
            None => groups.push((record.rota.clone(), vec![record])),
        }
    }

    let mut outputs = Vec::with_capacity(groups.len());
    for (rota, slice) in groups {
        let table = PivotTable::from_records(&slice)?.into_wide()?;
        let filename = format!("{}_{}.csv", rota, day_suffix);
        let csv = table.to_csv()?;
        outputs.push(RotaOutput {
            rota,
            filename,
            csv,
            table,
        });
    }

    Ok(ProcessingResult { outputs })
}
