//! # pgcolumns
//!
//! Column metadata for PostgreSQL `INSERT`/`UPDATE` builders.
//!
//! ## Features
//!
//! - **One canonical model**: bare column names, per-column descriptors, and record
//!   property enumeration all normalize into [`Column`]s
//! - **Frozen sets**: a [`ColumnSet`] is immutable once built; its SQL fragments are
//!   computed once
//! - **Row preparation**: defaults and initializers are applied per source row with
//!   fixed precedence (present value, then default, then initializer)
//! - **Logging**: enable the `tracing` feature for construction debug events
//!
//! ## Example
//!
//! ```
//! use pgcolumns::{ColumnDescriptor, ColumnSet, ColumnSetOptions, TableName};
//! use serde_json::{json, Value};
//!
//! let users = ColumnSet::new(
//!     [
//!         ColumnDescriptor::new("name"),
//!         ColumnDescriptor::new("visits")
//!             .def(0)
//!             .cast("int")
//!             .init(|v, _| json!(v.and_then(Value::as_i64).unwrap_or(0) + 1)),
//!     ],
//!     ColumnSetOptions::new().with_table(TableName::new("users")?),
//! )?;
//!
//! let sql = format!(
//!     "INSERT INTO {}({}) VALUES({})",
//!     users.table().map(TableName::name).unwrap_or_default(),
//!     users.names(),
//!     users.variables(),
//! );
//! assert_eq!(sql, r#"INSERT INTO "users"("name","visits") VALUES(${name},${visits}::int)"#);
//!
//! let row = users.prepare(&json!({ "name": "ada" }));
//! assert_eq!(row["visits"], json!(1));
//! # Ok::<(), pgcolumns::ColumnError>(())
//! ```

#[macro_use]
mod macros;

pub mod column;
pub mod column_set;
pub mod error;
pub mod format;
pub mod ident;
pub mod prelude;
pub mod record;

pub use column::{Column, ColumnDescriptor, ColumnSpec, Init};
pub use column_set::{ColumnSet, ColumnSetBuilder, ColumnSetOptions};
pub use error::{ColumnError, ColumnResult};
pub use format::{FormatMod, placeholder_for};
pub use ident::{TableName, escape_identifier};
pub use record::{Layered, Record};
