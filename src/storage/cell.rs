use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use super::data_type::DataType;
use super::inference;

/// Token used when rendering a missing cell.
pub const MISSING_TOKEN: &str = "NA";

// Bounds of the f64 range that converts to i64 without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Missing value has no {0} representation")]
    Missing(DataType),
    #[error("Value '{value}' is not a valid {target}")]
    Unparsable { value: String, target: DataType },
    #[error("Float {0} has a fractional part and can't be converted exactly to Int")]
    FractionalLoss(f64),
    #[error("Float {0} is outside of the Int range")]
    OutOfRange(f64),
}

/// A single value slot. The variant of a cell never changes; the `to_*`
/// methods are read-only projections.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Cell {
    Missing,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Cell {
    /// Builds a cell from raw text picking the narrowest fitting variant:
    /// missing token, integer, float, boolean token and finally string.
    pub fn from_raw(raw: &str) -> Self {
        if inference::is_missing_token(raw) {
            Cell::Missing
        } else if let Some(value) = inference::parse_int_literal(raw) {
            Cell::Int(value)
        } else if let Some(value) = inference::parse_float_literal(raw) {
            Cell::Float(value)
        } else if let Some(value) = inference::parse_bool_token(raw) {
            Cell::Boolean(value)
        } else {
            Cell::String(raw.to_string())
        }
    }

    /// Type tag of the value held, `None` for a missing cell.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Cell::Missing => None,
            Cell::Boolean(_) => Some(DataType::Boolean),
            Cell::Int(_) => Some(DataType::Int),
            Cell::Float(_) => Some(DataType::Float),
            Cell::String(_) => Some(DataType::String),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Exact projection to an integer. Floats only convert when they carry
    /// no fractional part.
    pub fn to_integer(&self) -> Result<i64, ConversionError> {
        match self {
            Cell::Missing => Err(ConversionError::Missing(DataType::Int)),
            Cell::Boolean(val) => Ok(*val as i64),
            Cell::Int(val) => Ok(*val),
            Cell::Float(val) => {
                let val = *val;
                if !val.is_finite() || val < I64_LOWER || val >= I64_UPPER {
                    Err(ConversionError::OutOfRange(val))
                } else if val.fract() != 0.0 {
                    Err(ConversionError::FractionalLoss(val))
                } else {
                    Ok(val as i64)
                }
            }
            Cell::String(val) => {
                inference::parse_int_literal(val).ok_or_else(|| ConversionError::Unparsable {
                    value: val.to_owned(),
                    target: DataType::Int,
                })
            }
        }
    }

    /// Like [`Cell::to_integer`] but drops the fractional part of floats.
    pub fn to_integer_truncating(&self) -> Result<i64, ConversionError> {
        match self {
            Cell::Float(val) => Cell::Float(val.trunc()).to_integer(),
            other => other.to_integer(),
        }
    }

    pub fn to_float(&self) -> Result<f64, ConversionError> {
        match self {
            Cell::Missing => Err(ConversionError::Missing(DataType::Float)),
            Cell::Boolean(val) => Ok(if *val { 1.0 } else { 0.0 }),
            Cell::Int(val) => Ok(*val as f64),
            Cell::Float(val) => Ok(*val),
            Cell::String(val) => inference::parse_int_literal(val)
                .map(|v| v as f64)
                .or_else(|| inference::parse_float_literal(val))
                .ok_or_else(|| ConversionError::Unparsable {
                    value: val.to_owned(),
                    target: DataType::Float,
                }),
        }
    }

    pub fn to_boolean(&self) -> Result<bool, ConversionError> {
        let unparsable = || ConversionError::Unparsable {
            value: self.render(),
            target: DataType::Boolean,
        };
        match self {
            Cell::Missing => Err(ConversionError::Missing(DataType::Boolean)),
            Cell::Boolean(val) => Ok(*val),
            Cell::Int(0) => Ok(false),
            Cell::Int(1) => Ok(true),
            Cell::Int(_) | Cell::Float(_) => Err(unparsable()),
            Cell::String(val) => inference::parse_bool_token(val).ok_or_else(unparsable),
        }
    }

    /// Text form of the cell, `NA` for missing values.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Missing => write!(f, "{}", MISSING_TOKEN),
            Cell::Boolean(val) => write!(f, "{}", val),
            Cell::Int(val) => write!(f, "{}", val),
            Cell::Float(val) => write!(f, "{}", val),
            Cell::String(val) => write!(f, "{}", val),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Missing)
    }
}
