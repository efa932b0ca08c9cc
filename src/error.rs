use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
///
/// Only structural failures live here; a cell that cannot be parsed is not
/// an error, it just contributes zero hours. Any variant below aborts the
/// whole upload with no partial output.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(rotahours::environment))]
    Environment(String),

    #[error("Could not read workbook: {0}")]
    #[diagnostic(code(rotahours::workbook))]
    Workbook(String),

    #[error("Missing required column: {0}")]
    #[diagnostic(code(rotahours::missing_column))]
    MissingColumn(String),

    #[error("Upload contains no shift rows")]
    #[diagnostic(code(rotahours::empty_upload))]
    EmptyUpload,

    #[error("Unreadable shift date: {0}")]
    #[diagnostic(code(rotahours::invalid_date))]
    InvalidDate(String),

    #[error("Duplicate shift for {employee} on {date} in rota {rota}")]
    #[diagnostic(code(rotahours::duplicate_shift))]
    DuplicateShift {
        employee: String,
        date: String,
        rota: String,
    },

    #[error("CSV error: {0}")]
    #[diagnostic(code(rotahours::csv))]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    #[diagnostic(code(rotahours::archive))]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    #[diagnostic(code(rotahours::io))]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create workbook errors
pub fn workbook_error(message: impl std::fmt::Display) -> Error {
    Error::Workbook(message.to_string())
}
