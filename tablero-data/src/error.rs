use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableroDataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Worksheet '{sheet}' not found in '{path}'")]
    SheetNotFound { sheet: String, path: String },

    #[error("Column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Column '{column}' is not a {expected} column")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("Cell '{value}' in column '{column}' (row {row}) is not numeric")]
    NonNumericCell {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid column span '{0}': expected spreadsheet letters like 'I:O'")]
    InvalidColumnSpan(String),

    #[error("Worksheet '{sheet}' has no rows in the requested range")]
    EmptyRange { sheet: String },
}
