//! In-memory data frames of typed columns.
//!
//! Cells are either missing or hold a boolean, integer, float or string.
//! Columns unify their cells to a single type, frames keep equally long
//! uniquely named columns and every operation returns a new frame.

pub mod config;
pub mod storage;

pub use storage::cell::{Cell, ConversionError};
pub use storage::column::Column;
pub use storage::column_frame::ColumnFrame;
pub use storage::data_type::DataType;
pub use storage::dedup::{RowSelection, RowSignature};
pub use storage::frame::DataFrame;
pub use storage::inference::ColumnTypes;
pub use storage::subset::{cbind, rbind, Subset};
pub use storage::{ErrorKind, FrameError};
