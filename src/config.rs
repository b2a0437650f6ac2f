use std::{collections::BTreeMap, fs, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::storage::{data_type::DataType, inference::ColumnTypes};

const SCHEMA_FILE_NAME: &str = "schema.json";

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum DataTypeConfig {
    #[serde(alias = "Boolean")]
    Bool,
    Int,
    Float,
    String,
}

/// Declared column types, either a list in column order or a map keyed by
/// column name.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum TypeDeclarationConfig {
    Positional(Vec<DataTypeConfig>),
    Named(BTreeMap<String, DataTypeConfig>),
}

#[derive(Deserialize, Debug)]
pub struct SchemaConfig {
    pub types: TypeDeclarationConfig,
}

impl SchemaConfig {
    pub fn column_types(&self) -> ColumnTypes {
        match &self.types {
            TypeDeclarationConfig::Positional(types) => {
                ColumnTypes::Positional(types.iter().map(|t| DataType::from(*t)).collect())
            }
            TypeDeclarationConfig::Named(types) => ColumnTypes::Named(
                types
                    .iter()
                    .map(|(name, t)| (name.to_owned(), DataType::from(*t)))
                    .collect(),
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON Error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("IO Error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct Configurator {
    root_path: PathBuf,
}

impl Configurator {
    #[instrument(skip(root_path))]
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    #[instrument]
    pub fn load(&self) -> Result<SchemaConfig, ConfigError> {
        let schema_json_path = self.root_path.join(SCHEMA_FILE_NAME);
        let data = fs::read_to_string(schema_json_path)?;
        let data: SchemaConfig = serde_json::from_str(&data)?;
        info!("Loaded configuration: {:?}", data);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{ConfigError, Configurator};
    use crate::storage::{
        cell::Cell, data_type::DataType, frame::DataFrame, inference::ColumnTypes,
    };

    fn write_schema(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schema.json"), contents).unwrap();
        dir
    }

    #[test]
    fn loads_named_declarations() {
        let dir = write_schema(r#"{ "types": { "age": "Int", "ok": "Boolean" } }"#);
        let config = Configurator::new(dir.path()).load().unwrap();
        assert_eq!(
            config.column_types(),
            ColumnTypes::Named(vec![
                ("age".to_string(), DataType::Int),
                ("ok".to_string(), DataType::Boolean),
            ])
        );
    }

    #[test]
    fn loads_positional_declarations() {
        let dir = write_schema(r#"{ "types": ["String", "Float", "Bool"] }"#);
        let config = Configurator::new(dir.path()).load().unwrap();
        assert_eq!(
            config.column_types(),
            ColumnTypes::Positional(vec![DataType::String, DataType::Float, DataType::Boolean])
        );
    }

    #[test]
    fn unknown_type_token_is_rejected() {
        let dir = write_schema(r#"{ "types": ["Date"] }"#);
        let result = Configurator::new(dir.path()).load();
        assert!(
            matches!(result, Err(ConfigError::Json { .. })),
            "Was expecting JSON error. Got {:?}",
            result
        );
    }

    #[test]
    fn missing_schema_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Configurator::new(dir.path()).load();
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn loaded_declarations_drive_parsing() {
        let dir = write_schema(r#"{ "types": { "age": "Int" } }"#);
        let config = Configurator::new(dir.path()).load().unwrap();

        let mut frame = DataFrame::from_records(&vec![vec!["x"], vec!["1"]]).unwrap();
        frame
            .load_and_parse(
                &vec![vec!["name", "age"], vec!["ana", "NA"], vec!["bo", "40"]],
                &config.column_types(),
            )
            .unwrap();
        assert_eq!(
            frame.column("age").unwrap().entries(),
            &[Cell::Missing, Cell::Int(40)]
        );
    }
}
