use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::config::DataTypeConfig;

use super::FrameError;

/// Column type tag. Variants are declared narrowest first, so the derived
/// ordering is the widening order used during unification.
#[derive(Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum DataType {
    Boolean,
    Int,
    Float,
    String,
}

impl DataType {
    /// Narrowest type able to hold values of both `self` and `other`.
    pub fn widen(self, other: DataType) -> DataType {
        self.max(other)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Boolean => write!(f, "Bool"),
            DataType::Int => write!(f, "Int"),
            DataType::Float => write!(f, "Float"),
            DataType::String => write!(f, "String"),
        }
    }
}

impl FromStr for DataType {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bool" | "Boolean" => Ok(DataType::Boolean),
            "Int" => Ok(DataType::Int),
            "Float" => Ok(DataType::Float),
            "String" => Ok(DataType::String),
            other => Err(FrameError::UnknownDataType(other.to_string())),
        }
    }
}

impl From<DataTypeConfig> for DataType {
    fn from(value: DataTypeConfig) -> Self {
        match value {
            DataTypeConfig::Bool => DataType::Boolean,
            DataTypeConfig::Int => DataType::Int,
            DataTypeConfig::Float => DataType::Float,
            DataTypeConfig::String => DataType::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataType;

    #[test]
    fn widening_follows_bool_int_float_string() {
        assert_eq!(DataType::Boolean.widen(DataType::Int), DataType::Int);
        assert_eq!(DataType::Float.widen(DataType::Int), DataType::Float);
        assert_eq!(DataType::Float.widen(DataType::String), DataType::String);
        assert_eq!(DataType::Boolean.widen(DataType::Boolean), DataType::Boolean);
    }

    #[test]
    fn parses_declared_type_tokens() {
        assert_eq!("Bool".parse::<DataType>().unwrap(), DataType::Boolean);
        assert_eq!("Int".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("Float".parse::<DataType>().unwrap(), DataType::Float);
        assert_eq!("String".parse::<DataType>().unwrap(), DataType::String);

        let result = "date".parse::<DataType>();
        assert!(result.is_err(), "Was expecting unknown type error. Got {:?}", result);
    }

    #[test]
    fn display_matches_declared_tokens() {
        for data_type in [DataType::Boolean, DataType::Int, DataType::Float, DataType::String] {
            let rendered = data_type.to_string();
            assert_eq!(rendered.parse::<DataType>().unwrap(), data_type);
        }
    }
}
