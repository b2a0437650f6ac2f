use std::collections::HashMap;

use serde::Serialize;

use super::cell::Cell;

/// One row of a [`super::frame::DataFrame`], cells paired with their column names.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ColumnFrame {
    column_names: Vec<String>,
    column_values: Vec<Cell>,
}

impl ColumnFrame {
    pub fn new() -> Self {
        Self {
            column_names: vec![],
            column_values: vec![],
        }
    }

    pub fn insert(&mut self, column_name: &str, cell: Cell) {
        self.column_names.push(column_name.to_owned());
        self.column_values.push(cell);
    }

    pub fn get(&self, column_name: &str) -> Option<&Cell> {
        self.column_names
            .iter()
            .position(|c| c == column_name)
            .and_then(|index| self.column_values.get(index))
    }

    pub fn len(&self) -> usize {
        self.column_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_values.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.column_values
    }

    pub fn to_view_object(&self) -> HashMap<String, Cell> {
        self.column_names
            .iter()
            .cloned()
            .zip(self.column_values.iter().cloned())
            .collect()
    }
}

impl Default for ColumnFrame {
    fn default() -> Self {
        Self::new()
    }
}
