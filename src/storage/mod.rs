pub mod cell;
pub mod column;
pub mod column_frame;
pub mod data_type;
pub mod dedup;
pub mod frame;
pub mod inference;
pub mod subset;

use thiserror::Error;

use self::cell::ConversionError;
use self::data_type::DataType;

/// Coarse classification of [`FrameError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Name,
    Range,
    Type,
    Conversion,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Can't create a DataFrame without columns")]
    EmptyFrame,
    #[error("No header row in records")]
    EmptyRecords,
    #[error("Record {row} has {found} fields, header has {expected}")]
    RaggedRecord {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Column {column} has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Different number of rows ({0} vs {1})")]
    RowCountMismatch(usize, usize),
    #[error("Different number of columns ({0} vs {1})")]
    ColumnCountMismatch(usize, usize),
    #[error("Number of types ({types}) does not match number of columns ({columns})")]
    TypeCountMismatch { columns: usize, types: usize },
    #[error("Column name can't be empty")]
    EmptyColumnName,
    #[error("Duplicated column names: {0:?}")]
    DuplicateColumnNames(Vec<String>),
    #[error("Can't find column {0}")]
    ColumnNotFound(String),
    #[error("Unknown data type {0}")]
    UnknownDataType(String),
    #[error("Bad subset: start {from} greater than end {to}")]
    InvertedRange { from: usize, to: usize },
    #[error("Empty subset")]
    EmptySubset,
    #[error("Subset out of range: {index} exceeds {bound}")]
    OutOfRange { index: usize, bound: usize },
    #[error("Duplicated column numbers: {0:?}")]
    DuplicateIndices(Vec<usize>),
    #[error("Rows can't be selected by column names")]
    UnsupportedSubset,
    #[error("Mismatching column types for {column}: {left} vs {right}")]
    ColumnTypeMismatch {
        column: String,
        left: DataType,
        right: DataType,
    },
    #[error("Cell of type {found} in column {column} declared as {expected}")]
    CellTypeMismatch {
        column: String,
        expected: DataType,
        found: DataType,
    },
    #[error("Can't convert '{value}' in column {column} to {target}")]
    Conversion {
        column: String,
        value: String,
        target: DataType,
        #[source]
        source: ConversionError,
    },
}

impl FrameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::EmptyFrame
            | FrameError::EmptyRecords
            | FrameError::RaggedRecord { .. }
            | FrameError::ColumnLengthMismatch { .. }
            | FrameError::RowCountMismatch(..)
            | FrameError::ColumnCountMismatch(..)
            | FrameError::TypeCountMismatch { .. } => ErrorKind::Shape,
            FrameError::EmptyColumnName
            | FrameError::DuplicateColumnNames(_)
            | FrameError::ColumnNotFound(_) => ErrorKind::Name,
            FrameError::InvertedRange { .. }
            | FrameError::EmptySubset
            | FrameError::OutOfRange { .. }
            | FrameError::DuplicateIndices(_)
            | FrameError::UnsupportedSubset => ErrorKind::Range,
            FrameError::UnknownDataType(_)
            | FrameError::ColumnTypeMismatch { .. }
            | FrameError::CellTypeMismatch { .. } => ErrorKind::Type,
            FrameError::Conversion { .. } => ErrorKind::Conversion,
        }
    }
}

#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
