//! Lexing of raw text and type unification for columns.

use super::cell::{Cell, ConversionError, MISSING_TOKEN};
use super::data_type::DataType;

const TRUE_TOKENS: [&str; 5] = ["true", "TRUE", "True", "T", "t"];
const FALSE_TOKENS: [&str; 5] = ["false", "FALSE", "False", "F", "f"];

/// Target types for [`crate::DataFrame::parse_columns`], either one per column
/// in column order or keyed by column name.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnTypes {
    Positional(Vec<DataType>),
    Named(Vec<(String, DataType)>),
}

impl ColumnTypes {
    pub fn named<N: Into<String>>(types: impl IntoIterator<Item = (N, DataType)>) -> Self {
        ColumnTypes::Named(
            types
                .into_iter()
                .map(|(name, data_type)| (name.into(), data_type))
                .collect(),
        )
    }
}

pub fn is_missing_token(raw: &str) -> bool {
    raw.is_empty() || raw == MISSING_TOKEN
}

pub fn parse_int_literal(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

/// Float literals must contain at least one digit, so words like `inf` or
/// `NaN` stay textual.
pub fn parse_float_literal(raw: &str) -> Option<f64> {
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok()
}

pub fn parse_bool_token(raw: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&raw) {
        Some(true)
    } else if FALSE_TOKENS.contains(&raw) {
        Some(false)
    } else {
        None
    }
}

/// Widest type required by the non-missing cells, `None` when every cell is
/// missing (or there are no cells).
pub fn unify(cells: &[Cell]) -> Option<DataType> {
    cells
        .iter()
        .filter_map(Cell::data_type)
        .reduce(DataType::widen)
}

/// Converts a cell into `target`. Missing cells stay missing.
pub fn coerce(cell: &Cell, target: DataType) -> Result<Cell, ConversionError> {
    if cell.is_missing() || cell.data_type() == Some(target) {
        return Ok(cell.clone());
    }
    match target {
        DataType::Boolean => cell.to_boolean().map(Cell::Boolean),
        DataType::Int => cell.to_integer().map(Cell::Int),
        DataType::Float => cell.to_float().map(Cell::Float),
        DataType::String => Ok(Cell::String(cell.render())),
    }
}

/// Re-interprets a cell as a declared type. Textual missing tokens become
/// [`Cell::Missing`] whatever the target is.
pub fn parse_as(cell: &Cell, target: DataType) -> Result<Cell, ConversionError> {
    match cell {
        Cell::String(raw) if is_missing_token(raw) => Ok(Cell::Missing),
        other => coerce(other, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_literal_requires_a_digit() {
        assert_eq!(parse_float_literal("2.5"), Some(2.5));
        assert_eq!(parse_float_literal(".5"), Some(0.5));
        assert_eq!(parse_float_literal("inf"), None);
        assert_eq!(parse_float_literal("NaN"), None);
        assert_eq!(parse_float_literal("1.2.3"), None);
    }

    #[test]
    fn unify_takes_widest_non_missing_type() {
        let cells = vec![Cell::Int(1), Cell::Missing, Cell::Float(2.5)];
        assert_eq!(unify(&cells), Some(DataType::Float));

        let cells = vec![Cell::Boolean(true), Cell::Int(3)];
        assert_eq!(unify(&cells), Some(DataType::Int));

        let cells = vec![Cell::Int(1), Cell::String("x".into())];
        assert_eq!(unify(&cells), Some(DataType::String));

        assert_eq!(unify(&[Cell::Missing, Cell::Missing]), None);
        assert_eq!(unify(&[]), None);
    }

    #[test]
    fn coerce_widens_cells() {
        assert_eq!(coerce(&Cell::Int(2), DataType::Float), Ok(Cell::Float(2.0)));
        assert_eq!(coerce(&Cell::Boolean(true), DataType::Int), Ok(Cell::Int(1)));
        assert_eq!(
            coerce(&Cell::Float(2.5), DataType::String),
            Ok(Cell::String("2.5".into()))
        );
        assert_eq!(coerce(&Cell::Missing, DataType::Int), Ok(Cell::Missing));
    }

    #[test]
    fn parse_as_maps_missing_tokens_and_rejects_lossy_values() {
        assert_eq!(parse_as(&Cell::String("NA".into()), DataType::Int), Ok(Cell::Missing));
        assert_eq!(parse_as(&Cell::String("".into()), DataType::Boolean), Ok(Cell::Missing));
        assert_eq!(parse_as(&Cell::String("7".into()), DataType::Int), Ok(Cell::Int(7)));
        assert_eq!(
            parse_as(&Cell::String("false".into()), DataType::Boolean),
            Ok(Cell::Boolean(false))
        );
        assert!(parse_as(&Cell::String("3.2".into()), DataType::Int).is_err());
        assert!(parse_as(&Cell::Float(3.2), DataType::Int).is_err());
    }
}
