//! Convenient imports for typical `pgcolumns` usage.
//!
//! ```
//! use pgcolumns::prelude::*;
//! ```

pub use crate::{
    Column, ColumnDescriptor, ColumnError, ColumnResult, ColumnSet, ColumnSetOptions, FormatMod,
    Record, TableName,
};
