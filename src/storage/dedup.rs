//! Row identity and duplicate detection.
//!
//! Rows are grouped by signature in a hash map, so the row order of every
//! result here is unspecified.

use std::collections::HashMap;
use std::fmt::Display;

use tracing::{debug, instrument};

use super::cell::{Cell, MISSING_TOKEN};
use super::data_type::DataType;
use super::frame::DataFrame;

/// Identity of a row: each column's type paired with the rendered cell.
///
/// Missing cells are kept apart from text that renders the same, the
/// displayed form is the plain concatenation (`Int1Stringa`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowSignature(Vec<(DataType, Option<String>)>);

impl Display for RowSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (data_type, rendered) in &self.0 {
            write!(f, "{}{}", data_type, rendered.as_deref().unwrap_or(MISSING_TOKEN))?;
        }
        Ok(())
    }
}

/// Which occurrences of grouped rows to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelection {
    /// Rows whose signature appears exactly once.
    Unique,
    /// First occurrence of each signature appearing more than once.
    Duplicated,
    /// Every occurrence of each signature appearing more than once.
    AllDuplicates,
    /// First occurrence of every signature.
    FirstOccurrences,
}

#[derive(Debug)]
struct Occurrences {
    unique: bool,
    appears: Vec<usize>,
}

impl DataFrame {
    pub fn row_signature(&self, index: usize) -> Option<RowSignature> {
        if index >= self.n_rows() {
            return None;
        }
        let parts = self
            .columns()
            .iter()
            .map(|column| {
                let rendered = match &column.entries()[index] {
                    Cell::Missing => None,
                    cell => Some(cell.render()),
                };
                (*column.data_type(), rendered)
            })
            .collect();
        Some(RowSignature(parts))
    }

    fn occurrences(&self) -> HashMap<RowSignature, Occurrences> {
        let mut groups: HashMap<RowSignature, Occurrences> = HashMap::new();
        for index in 0..self.n_rows() {
            let Some(signature) = self.row_signature(index) else {
                continue;
            };
            groups
                .entry(signature)
                .and_modify(|group| {
                    group.unique = false;
                    group.appears.push(index);
                })
                .or_insert_with(|| Occurrences {
                    unique: true,
                    appears: vec![index],
                });
        }
        groups
    }

    /// Indices of the rows picked by `selection`, in unspecified order.
    #[instrument(skip(self))]
    pub fn row_indices(&self, selection: RowSelection) -> Vec<usize> {
        let groups = self.occurrences();
        debug!(
            n_rows = self.n_rows(),
            distinct = groups.len(),
            "Grouped rows by signature"
        );
        groups
            .into_values()
            .flat_map(|group| {
                let picked: &[usize] = match selection {
                    RowSelection::Unique if group.unique => &group.appears[..1],
                    RowSelection::Duplicated if !group.unique => &group.appears[..1],
                    RowSelection::AllDuplicates if !group.unique => &group.appears,
                    RowSelection::FirstOccurrences => &group.appears[..1],
                    _ => &[],
                };
                picked.to_vec()
            })
            .collect()
    }

    /// Rows that appear exactly once.
    pub fn unique_rows(&self) -> DataFrame {
        self.take_rows(&self.row_indices(RowSelection::Unique))
    }

    /// First occurrence of every row that appears more than once.
    pub fn duplicated_rows(&self) -> DataFrame {
        self.take_rows(&self.row_indices(RowSelection::Duplicated))
    }

    /// Every occurrence of every row that appears more than once.
    pub fn all_duplicate_occurrences(&self) -> DataFrame {
        self.take_rows(&self.row_indices(RowSelection::AllDuplicates))
    }

    /// One representative per distinct row.
    pub fn deduplicated(&self) -> DataFrame {
        self.take_rows(&self.row_indices(RowSelection::FirstOccurrences))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::RowSelection;
    use crate::storage::cell::Cell;
    use crate::storage::frame::DataFrame;
    use crate::storage::init_tracing;

    fn sample() -> DataFrame {
        DataFrame::from_cells(vec![
            ("n", vec![Cell::Int(1), Cell::Int(2), Cell::Int(2), Cell::Int(3)]),
            ("s", vec![Cell::from("a"), Cell::from("b"), Cell::from("b"), Cell::from("c")]),
        ])
        .unwrap()
    }

    fn sorted(mut indices: Vec<usize>) -> Vec<usize> {
        indices.sort_unstable();
        indices
    }

    fn signatures(frame: &DataFrame) -> Vec<String> {
        let mut signatures = (0..frame.n_rows())
            .filter_map(|i| frame.row_signature(i))
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        signatures.sort();
        signatures
    }

    #[test]
    fn signature_concatenates_types_and_values() {
        let frame = sample();
        assert_eq!(frame.row_signature(0).unwrap().to_string(), "Int1Stringa");
        assert!(frame.row_signature(4).is_none());
    }

    #[test]
    fn missing_and_na_text_have_different_signatures() {
        let frame =
            DataFrame::from_cells(vec![("s", vec![Cell::Missing, Cell::from("NA")])]).unwrap();
        assert_eq!(
            frame.row_signature(0).unwrap().to_string(),
            frame.row_signature(1).unwrap().to_string()
        );
        assert_ne!(frame.row_signature(0), frame.row_signature(1));
        assert_eq!(frame.deduplicated().n_rows(), 2);
    }

    #[test]
    fn selections_on_sample() {
        init_tracing();
        let frame = sample();
        assert_eq!(sorted(frame.row_indices(RowSelection::Unique)), vec![0, 3]);
        assert_eq!(sorted(frame.row_indices(RowSelection::Duplicated)), vec![1]);
        assert_eq!(sorted(frame.row_indices(RowSelection::AllDuplicates)), vec![1, 2]);
        assert_eq!(
            sorted(frame.row_indices(RowSelection::FirstOccurrences)),
            vec![0, 1, 3]
        );
    }

    #[test]
    fn derived_frames_hold_selected_rows() {
        let frame = sample();
        assert_eq!(signatures(&frame.unique_rows()), vec!["Int1Stringa", "Int3Stringc"]);
        assert_eq!(signatures(&frame.duplicated_rows()), vec!["Int2Stringb"]);
        assert_eq!(
            signatures(&frame.all_duplicate_occurrences()),
            vec!["Int2Stringb", "Int2Stringb"]
        );
        let deduplicated = frame.deduplicated();
        assert_eq!(deduplicated.n_rows(), 3);
        assert_eq!(deduplicated.column_types(), frame.column_types());
    }

    #[test]
    fn deduplicated_rows_are_distinct_and_account_for_all_rows() {
        let frame = DataFrame::from_records_inferred(&vec![
            vec!["a", "b"],
            vec!["1", "x"],
            vec!["1", "x"],
            vec!["1", "x"],
            vec!["2", ""],
            vec!["2", ""],
            vec!["3", "y"],
        ])
        .unwrap();
        let deduplicated = frame.deduplicated();
        let distinct = signatures(&deduplicated).into_iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), deduplicated.n_rows());

        let originals = signatures(&frame).into_iter().collect::<HashSet<_>>();
        assert!(distinct.is_subset(&originals));

        let all = frame.row_indices(RowSelection::AllDuplicates).len();
        let duplicated = frame.row_indices(RowSelection::Duplicated).len();
        assert_eq!(deduplicated.n_rows() + (all - duplicated), frame.n_rows());
    }

    #[test]
    fn unique_and_duplicate_selections_do_not_overlap() {
        let frame = sample();
        let unique = frame.row_indices(RowSelection::Unique).into_iter().collect::<HashSet<_>>();
        let duplicated = frame
            .row_indices(RowSelection::Duplicated)
            .into_iter()
            .collect::<HashSet<_>>();
        assert!(unique.is_disjoint(&duplicated));

        let all = frame.row_indices(RowSelection::AllDuplicates).len();
        assert_eq!(unique.len() + duplicated.len() + (all - duplicated.len()), frame.n_rows());
    }

    #[test]
    fn all_duplicates_yield_empty_unique_frame() {
        let frame = DataFrame::from_cells(vec![("n", vec![Cell::Int(7), Cell::Int(7)])]).unwrap();
        let unique = frame.unique_rows();
        assert_eq!(unique.dim(), (0, 1));
        assert_eq!(frame.deduplicated().n_rows(), 1);
    }
}
