use std::collections::HashSet;
use std::ops::Range;

use tracing::{debug, instrument};

use super::frame::{duplicated, DataFrame};
use super::FrameError;

/// Selection of rows or columns.
///
/// Ranges are half open and must not be empty. Column selections by index or
/// name reject repeats, row selections by index accept them.
#[derive(Debug, Clone, PartialEq)]
pub enum Subset {
    Range { from: usize, to: usize },
    Indices(Vec<usize>),
    Names(Vec<String>),
}

impl Subset {
    pub fn names<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Subset::Names(names.into_iter().map(Into::into).collect())
    }
}

impl From<Range<usize>> for Subset {
    fn from(range: Range<usize>) -> Self {
        Subset::Range {
            from: range.start,
            to: range.end,
        }
    }
}

impl From<Vec<usize>> for Subset {
    fn from(indices: Vec<usize>) -> Self {
        Subset::Indices(indices)
    }
}

impl From<Vec<&str>> for Subset {
    fn from(names: Vec<&str>) -> Self {
        Subset::names(names)
    }
}

impl From<Vec<String>> for Subset {
    fn from(names: Vec<String>) -> Self {
        Subset::Names(names)
    }
}

impl DataFrame {
    /// Keeps the selected columns. Index and name selections define the new
    /// column order.
    #[instrument(skip(self))]
    pub fn subset_columns(&self, subset: &Subset) -> Result<DataFrame, FrameError> {
        let indices: Vec<usize> = match subset {
            Subset::Range { from, to } => {
                check_range(*from, *to, self.n_cols())?;
                (*from..*to).collect()
            }
            Subset::Indices(indices) => {
                check_indices(indices, self.n_cols())?;
                let mut seen = HashSet::new();
                let mut repeated = vec![];
                for &index in indices {
                    if !seen.insert(index) && !repeated.contains(&index) {
                        repeated.push(index);
                    }
                }
                if !repeated.is_empty() {
                    return Err(FrameError::DuplicateIndices(repeated));
                }
                indices.clone()
            }
            Subset::Names(names) => {
                if names.is_empty() {
                    return Err(FrameError::EmptySubset);
                }
                let duplicates = duplicated(names.iter().map(String::as_str));
                if !duplicates.is_empty() {
                    return Err(FrameError::DuplicateColumnNames(duplicates));
                }
                names
                    .iter()
                    .map(|name| self.column_index(name))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let columns = indices
            .iter()
            .map(|&i| self.columns()[i].clone())
            .collect::<Vec<_>>();
        debug!("Selected {} of {} columns", columns.len(), self.n_cols());
        Ok(DataFrame::from_parts(columns, self.n_rows()))
    }

    /// Keeps the selected rows, in selection order. Index lists may repeat
    /// rows.
    #[instrument(skip(self))]
    pub fn subset_rows(&self, subset: &Subset) -> Result<DataFrame, FrameError> {
        match subset {
            Subset::Range { from, to } => {
                check_range(*from, *to, self.n_rows())?;
                let columns = self
                    .columns()
                    .iter()
                    .map(|c| c.slice(*from..*to))
                    .collect();
                Ok(DataFrame::from_parts(columns, to - from))
            }
            Subset::Indices(indices) => {
                check_indices(indices, self.n_rows())?;
                Ok(self.take_rows(indices))
            }
            Subset::Names(_) => Err(FrameError::UnsupportedSubset),
        }
    }

    /// Column selection followed by row selection.
    pub fn subset(&self, columns: &Subset, rows: &Subset) -> Result<DataFrame, FrameError> {
        self.subset_columns(columns)?.subset_rows(rows)
    }

    /// Copies the rows at `indices`. An empty list yields a frame without rows.
    /// Indices must be in bounds.
    pub(crate) fn take_rows(&self, indices: &[usize]) -> DataFrame {
        let columns = self.columns().iter().map(|c| c.take(indices)).collect();
        DataFrame::from_parts(columns, indices.len())
    }
}

/// Stacks the rows of `bottom` under the rows of `top`. Both frames need the
/// same column names and types; the column order of `top` is kept.
#[instrument(skip_all)]
pub fn rbind(top: &DataFrame, bottom: &DataFrame) -> Result<DataFrame, FrameError> {
    if top.n_cols() != bottom.n_cols() {
        return Err(FrameError::ColumnCountMismatch(top.n_cols(), bottom.n_cols()));
    }

    let columns = top
        .columns()
        .iter()
        .map(|column| {
            let other = bottom.column(column.name())?;
            if column.data_type() != other.data_type() {
                return Err(FrameError::ColumnTypeMismatch {
                    column: column.name().to_string(),
                    left: *column.data_type(),
                    right: *other.data_type(),
                });
            }
            Ok(column.concat(other))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let n_rows = top.n_rows() + bottom.n_rows();
    debug!(n_rows, "Combined rows");
    Ok(DataFrame::from_parts(columns, n_rows))
}

/// Places the columns of `right` after the columns of `left`. Both frames
/// need the same number of rows and distinct column names.
#[instrument(skip_all)]
pub fn cbind(left: &DataFrame, right: &DataFrame) -> Result<DataFrame, FrameError> {
    if left.n_rows() != right.n_rows() {
        return Err(FrameError::RowCountMismatch(left.n_rows(), right.n_rows()));
    }

    let left_names = left.column_names();
    let conflicts = right
        .column_names()
        .into_iter()
        .filter(|name| left_names.contains(name))
        .map(str::to_string)
        .collect::<Vec<_>>();
    if !conflicts.is_empty() {
        return Err(FrameError::DuplicateColumnNames(conflicts));
    }

    let columns = left
        .columns()
        .iter()
        .chain(right.columns())
        .cloned()
        .collect::<Vec<_>>();
    debug!(n_cols = columns.len(), "Combined columns");
    Ok(DataFrame::from_parts(columns, left.n_rows()))
}

fn check_range(from: usize, to: usize, bound: usize) -> Result<(), FrameError> {
    if from > to {
        return Err(FrameError::InvertedRange { from, to });
    }
    if from == to {
        return Err(FrameError::EmptySubset);
    }
    if to > bound {
        return Err(FrameError::OutOfRange { index: to, bound });
    }
    Ok(())
}

fn check_indices(indices: &[usize], bound: usize) -> Result<(), FrameError> {
    if indices.is_empty() {
        return Err(FrameError::EmptySubset);
    }
    match indices.iter().find(|&&i| i >= bound) {
        Some(&index) => Err(FrameError::OutOfRange { index, bound }),
        None => Ok(()),
    }
}
