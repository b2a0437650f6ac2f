use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use super::cell::Cell;
use super::data_type::DataType;
use super::inference;
use super::FrameError;

/// Type given to columns that hold no value to infer from.
pub const FALLBACK_TYPE: DataType = DataType::String;

/// A named sequence of cells sharing one type. Every non-missing cell holds
/// a value of `data_type`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
    entries: Vec<Cell>,
    display_width: usize,
}

impl Column {
    /// Builds a column whose type is the widest type among `cells`; every
    /// cell is converted to that type.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Result<Self, FrameError> {
        let name = name.into();
        ensure_name(&name)?;
        let data_type = inference::unify(&cells).unwrap_or(FALLBACK_TYPE);
        debug!("Inferred type {} for column {}", data_type, name);

        let entries = cells
            .iter()
            .map(|cell| {
                inference::coerce(cell, data_type).map_err(|source| FrameError::Conversion {
                    column: name.clone(),
                    value: cell.render(),
                    target: data_type,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::assemble(name, data_type, entries))
    }

    /// Builds a column of a declared type. Cells must be missing or already
    /// hold a value of `data_type`.
    pub fn with_type(
        name: impl Into<String>,
        data_type: DataType,
        cells: Vec<Cell>,
    ) -> Result<Self, FrameError> {
        let name = name.into();
        ensure_name(&name)?;
        if let Some(found) = cells
            .iter()
            .filter_map(Cell::data_type)
            .find(|found| *found != data_type)
        {
            return Err(FrameError::CellTypeMismatch {
                column: name,
                expected: data_type,
                found,
            });
        }
        Ok(Self::assemble(name, data_type, cells))
    }

    /// Lexes every raw value and infers the column type from the results.
    /// Text columns keep the raw values as written.
    pub fn from_raw<S: AsRef<str>>(
        name: impl Into<String>,
        raw: &[S],
    ) -> Result<Self, FrameError> {
        let cells = raw
            .iter()
            .map(|r| Cell::from_raw(r.as_ref()))
            .collect::<Vec<_>>();
        match inference::unify(&cells) {
            Some(DataType::String) => Self::from_strings(name, raw),
            _ => Self::new(name, cells),
        }
    }

    /// Keeps every raw value as text, only missing tokens become
    /// [`Cell::Missing`].
    pub fn from_strings<S: AsRef<str>>(
        name: impl Into<String>,
        raw: &[S],
    ) -> Result<Self, FrameError> {
        let cells = raw
            .iter()
            .map(|r| {
                let r = r.as_ref();
                if inference::is_missing_token(r) {
                    Cell::Missing
                } else {
                    Cell::String(r.to_string())
                }
            })
            .collect();
        Self::with_type(name, DataType::String, cells)
    }

    fn assemble(name: String, data_type: DataType, entries: Vec<Cell>) -> Self {
        let display_width = entries
            .iter()
            .map(|cell| cell.render().chars().count())
            .chain(std::iter::once(name.chars().count()))
            .max()
            .unwrap_or_default();
        Self {
            name,
            data_type,
            entries,
            display_width,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn entries(&self) -> &[Cell] {
        self.entries.as_ref()
    }

    pub fn display_width(&self) -> usize {
        self.display_width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-interprets every cell as `target`, failing on the first cell that
    /// can't be represented.
    pub fn parse_as(&self, target: DataType) -> Result<Column, FrameError> {
        let entries = self
            .entries
            .iter()
            .map(|cell| {
                inference::parse_as(cell, target).map_err(|source| FrameError::Conversion {
                    column: self.name.clone(),
                    value: cell.render(),
                    target,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::assemble(self.name.clone(), target, entries))
    }

    /// Copies the cells at `indices`, in that order. Indices must be in bounds.
    pub(crate) fn take(&self, indices: &[usize]) -> Column {
        let entries = indices.iter().map(|&i| self.entries[i].clone()).collect();
        Self::assemble(self.name.clone(), self.data_type, entries)
    }

    /// Copies a contiguous range of cells. The range must be in bounds.
    pub(crate) fn slice(&self, range: Range<usize>) -> Column {
        Self::assemble(self.name.clone(), self.data_type, self.entries[range].to_vec())
    }

    /// Cells of `self` followed by the cells of `other`. Both columns must
    /// share the same type.
    pub(crate) fn concat(&self, other: &Column) -> Column {
        debug_assert_eq!(self.data_type, other.data_type);
        let entries = self
            .entries
            .iter()
            .chain(other.entries.iter())
            .cloned()
            .collect();
        Self::assemble(self.name.clone(), self.data_type, entries)
    }
}

fn ensure_name(name: &str) -> Result<(), FrameError> {
    if name.is_empty() {
        return Err(FrameError::EmptyColumnName);
    }
    Ok(())
}
