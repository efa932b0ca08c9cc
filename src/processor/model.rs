use chrono::NaiveDateTime;

/// Cell text the rota export writes when an employee had no shift that day
pub const NO_RECORDED_SHIFT: &str = "No Recorded Shift";

/// One source row from the uploaded spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRecord {
    /// Employee the shift belongs to
    pub employee: String,
    /// Rota group the employee is scheduled under
    pub rota: String,
    /// Raw day-first date text, e.g. "01/06/2024"
    pub date: String,
    /// Raw "start - end" text; `None` when the cell was blank or held the
    /// no-shift sentinel
    pub recorded: Option<String>,
}

/// A recorded value resolved against its shift date
///
/// Either instant may be absent when its half of the range did not parse;
/// an absent instant means the cell contributes zero hours downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedShift {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Final per-rota table with the computed hours columns interleaved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable {
    /// Column labels, starting with "Employee Name"
    pub headers: Vec<String>,
    /// One row per employee; absent cells already filled with "0"
    pub rows: Vec<Vec<String>>,
}

/// Output for one rota group
#[derive(Debug, Clone)]
pub struct RotaOutput {
    pub rota: String,
    pub filename: String,
    /// Serialized UTF-8 CSV, ready for download
    pub csv: Vec<u8>,
    pub table: WideTable,
}

/// Everything produced from one upload, in rota first-seen order
#[derive(Debug, Clone, Default)]
pub struct ProcessingResult {
    pub outputs: Vec<RotaOutput>,
}

impl ProcessingResult {
    /// Look up one rota group's output by name
    pub fn get(&self, rota: &str) -> Option<&RotaOutput> {
        self.outputs.iter().find(|output| output.rota == rota)
    }

    /// The `(filename, bytes)` pairs handed to download packaging
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.outputs
            .iter()
            .map(|output| (output.filename.as_str(), output.csv.as_slice()))
    }
}
