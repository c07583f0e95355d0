use thiserror::Error;

/// Problems with the shape or content of an external title table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("column '{column}' has unsupported type {data_type}")]
    ColumnType { column: String, data_type: String },

    #[error("row {row}: null value in required column '{column}'")]
    NullValue { row: usize, column: String },

    #[error("row {row}: release year {value} is out of range")]
    YearOutOfRange { row: usize, value: i64 },
}
