use std::collections::HashSet;
use std::fmt::Display;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::cell::Cell;
use super::column::Column;
use super::column_frame::ColumnFrame;
use super::data_type::DataType;
use super::inference::ColumnTypes;
use super::FrameError;

/// Prefix of the names generated for blank header fields.
const PLACEHOLDER_PREFIX: &str = "V";

/// A table of equally long, uniquely named columns.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

impl DataFrame {
    /// Builds a frame from ready-made columns, checking that there is at least
    /// one column, names are unique and all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        let first = columns.first().ok_or(FrameError::EmptyFrame)?;
        let n_rows = first.len();

        if let Some(column) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(FrameError::ColumnLengthMismatch {
                column: column.name().to_string(),
                expected: n_rows,
                found: column.len(),
            });
        }

        let duplicates = duplicated(columns.iter().map(|c| c.name()));
        if !duplicates.is_empty() {
            return Err(FrameError::DuplicateColumnNames(duplicates));
        }

        Ok(Self { columns, n_rows })
    }

    /// Builds a frame from named groups of cells, inferring each column's type.
    pub fn from_cells<N, I>(groups: I) -> Result<Self, FrameError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<Cell>)>,
    {
        let columns = groups
            .into_iter()
            .map(|(name, cells)| Column::new(name, cells))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns)
    }

    /// Builds a frame from a header row followed by data rows, keeping every
    /// field as text. Blank header fields get generated `V<n>` names.
    #[instrument(skip(records))]
    pub fn from_records<S: AsRef<str>>(records: &[Vec<S>]) -> Result<Self, FrameError> {
        Self::build_from_records(records, |name, raw| Column::from_strings(name, raw))
    }

    /// Like [`DataFrame::from_records`] but infers each column's type from its
    /// values.
    #[instrument(skip(records))]
    pub fn from_records_inferred<S: AsRef<str>>(records: &[Vec<S>]) -> Result<Self, FrameError> {
        Self::build_from_records(records, |name, raw| Column::from_raw(name, raw))
    }

    fn build_from_records<S, F>(records: &[Vec<S>], build_column: F) -> Result<Self, FrameError>
    where
        S: AsRef<str>,
        F: Fn(String, &[&str]) -> Result<Column, FrameError>,
    {
        let (header, rows) = records.split_first().ok_or(FrameError::EmptyRecords)?;
        let names = fill_header(header)?;

        if let Some((row, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != names.len())
        {
            return Err(FrameError::RaggedRecord {
                row,
                expected: names.len(),
                found: record.len(),
            });
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(j, name)| {
                let raw = rows.iter().map(|record| record[j].as_ref()).collect::<Vec<_>>();
                build_column(name, &raw)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let frame = Self::new(columns)?;
        info!(
            n_rows = frame.n_rows(),
            n_cols = frame.n_cols(),
            "Loaded records"
        );
        Ok(frame)
    }

    /// Replaces the frame with the content of `records`. On failure the frame
    /// is left untouched.
    pub fn load_records<S: AsRef<str>>(&mut self, records: &[Vec<S>]) -> Result<(), FrameError> {
        *self = Self::from_records(records)?;
        Ok(())
    }

    /// Loads `records` and parses the columns to the declared types. On
    /// failure the frame is left untouched.
    pub fn load_and_parse<S: AsRef<str>>(
        &mut self,
        records: &[Vec<S>],
        types: &ColumnTypes,
    ) -> Result<(), FrameError> {
        *self = Self::from_records(records)?.parse_columns(types)?;
        Ok(())
    }

    /// Re-interprets the declared columns as their target types. Columns not
    /// mentioned keep their type.
    #[instrument(skip(self))]
    pub fn parse_columns(&self, types: &ColumnTypes) -> Result<DataFrame, FrameError> {
        let mut columns = self.columns.clone();
        match types {
            ColumnTypes::Positional(types) => {
                if types.len() != self.n_cols() {
                    return Err(FrameError::TypeCountMismatch {
                        columns: self.n_cols(),
                        types: types.len(),
                    });
                }
                for (column, data_type) in columns.iter_mut().zip(types) {
                    *column = column.parse_as(*data_type)?;
                }
            }
            ColumnTypes::Named(types) => {
                for (name, data_type) in types {
                    let index = self.column_index(name)?;
                    columns[index] = columns[index].parse_as(*data_type)?;
                }
            }
        }
        debug!(
            "Parsed column types: {:?}",
            columns.iter().map(|c| *c.data_type()).collect::<Vec<_>>()
        );
        Ok(Self {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// Number of rows and columns.
    pub fn dim(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn column_types(&self) -> Vec<DataType> {
        self.columns.iter().map(|c| *c.data_type()).collect()
    }

    pub fn column_index(&self, column_name: &str) -> Result<usize, FrameError> {
        self.columns
            .iter()
            .position(|c| c.name() == column_name)
            .ok_or_else(|| FrameError::ColumnNotFound(column_name.to_string()))
    }

    pub fn column(&self, column_name: &str) -> Result<&Column, FrameError> {
        self.column_index(column_name).map(|i| &self.columns[i])
    }

    pub fn row(&self, index: usize) -> Option<ColumnFrame> {
        if index >= self.n_rows {
            return None;
        }
        let mut frame = ColumnFrame::new();
        for column in &self.columns {
            frame.insert(column.name(), column.entries()[index].clone());
        }
        Some(frame)
    }

    pub fn rows(&self) -> impl Iterator<Item = ColumnFrame> + '_ {
        (0..self.n_rows).filter_map(move |i| self.row(i))
    }

    /// Header row followed by the rendered cells of each row.
    pub fn to_records(&self) -> Vec<Vec<String>> {
        let header = self.columns.iter().map(|c| c.name().to_string()).collect();
        let rows = (0..self.n_rows).map(|i| {
            self.columns
                .iter()
                .map(|c| c.entries()[i].render())
                .collect::<Vec<_>>()
        });
        std::iter::once(header).chain(rows).collect()
    }

    /// Assembles a frame from columns already known to satisfy the frame
    /// invariants.
    pub(crate) fn from_parts(columns: Vec<Column>, n_rows: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        Self { columns, n_rows }
    }
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let index_width = self.n_rows.to_string().len() + 2;

        write!(f, "{:>index_width$}", "")?;
        for column in &self.columns {
            write!(f, "{:<width$}  ", column.name(), width = column.display_width())?;
        }
        writeln!(f)?;
        writeln!(f)?;

        for i in 0..self.n_rows {
            write!(f, "{:>index_width$}", format!("{}: ", i))?;
            for column in &self.columns {
                write!(
                    f,
                    "{:<width$}  ",
                    column.entries()[i].render(),
                    width = column.display_width()
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Names appearing more than once, each reported once in order of first
/// repetition.
pub(crate) fn duplicated<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = vec![];
    for name in names {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

fn fill_header<S: AsRef<str>>(header: &[S]) -> Result<Vec<String>, FrameError> {
    let given = header.iter().map(|h| h.as_ref()).filter(|h| !h.is_empty());
    let duplicates = duplicated(given);
    if !duplicates.is_empty() {
        return Err(FrameError::DuplicateColumnNames(duplicates));
    }

    let mut taken: HashSet<String> = header
        .iter()
        .map(|h| h.as_ref().to_string())
        .filter(|h| !h.is_empty())
        .collect();
    let mut counter = 0;
    let mut names = Vec::with_capacity(header.len());
    for field in header {
        let field = field.as_ref();
        if !field.is_empty() {
            names.push(field.to_string());
            continue;
        }
        loop {
            let candidate = format!("{}{}", PLACEHOLDER_PREFIX, counter);
            counter += 1;
            if taken.insert(candidate.clone()) {
                names.push(candidate);
                break;
            }
        }
    }
    Ok(names)
}
