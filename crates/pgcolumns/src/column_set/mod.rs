//! Ordered, immutable column sets.
//!
//! A [`ColumnSet`] is built once per row shape and then reused: its `names`, `variables`
//! and `updates` fragments are computed during construction, and [`ColumnSet::prepare`]
//! projects each source row into the values to bind.
//!
//! # Example
//!
//! ```
//! use pgcolumns::{ColumnDescriptor, ColumnSet, ColumnSetOptions};
//! use serde_json::json;
//!
//! let cs = ColumnSet::new(
//!     [
//!         ColumnDescriptor::new("id"),
//!         ColumnDescriptor::new("status").def("active"),
//!     ],
//!     ColumnSetOptions::default(),
//! )?;
//!
//! assert_eq!(cs.names(), r#""id","status""#);
//! assert_eq!(cs.variables(), "${id},${status}");
//! assert_eq!(cs.updates(), r#""id"=${id},"status"=${status}"#);
//!
//! let row = cs.prepare(&json!({ "id": 1 }));
//! assert_eq!(row["status"], json!("active"));
//! # Ok::<(), pgcolumns::ColumnError>(())
//! ```

mod builder;
mod options;


pub use builder::ColumnSetBuilder;
pub use options::ColumnSetOptions;

use std::fmt;

use serde_json::{Map, Value};

use crate::column::{Column, ColumnSpec, message_gap};
use crate::error::{ColumnError, ColumnResult};
use crate::ident::TableName;
use crate::record::Record;

/// An ordered, frozen collection of [`Column`]s plus an optional table.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    columns: Vec<Column>,
    table: Option<TableName>,
    names: String,
    variables: String,
    updates: String,
}

impl ColumnSet {
    /// Build from column specs, keeping their order.
    pub fn new<I, S>(specs: I, options: ColumnSetOptions) -> ColumnResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnSpec>,
    {
        Self::builder().options(options).columns(specs).build()
    }

    /// Build one bare column per property name of `record`.
    ///
    /// Inherited names are included only when `options.inherit` is set.
    pub fn from_record(record: &dyn Record, options: ColumnSetOptions) -> ColumnResult<Self> {
        Self::builder().options(options).record(record).build()
    }

    /// Build from dynamic input: an array of column details or an object whose
    /// property names become columns. `options` must be `null` or an object.
    pub fn from_value(columns: &Value, options: &Value) -> ColumnResult<Self> {
        let options = ColumnSetOptions::from_value(options)?;
        match columns {
            Value::Array(items) => Self::builder().options(options).values(items).build(),
            Value::Object(map) => Self::from_record(map, options),
            other => Err(ColumnError::invalid_argument(format!(
                "Invalid parameter 'columns' specified: {other}"
            ))),
        }
    }

    pub fn builder() -> ColumnSetBuilder {
        ColumnSetBuilder::new()
    }

    fn freeze(columns: Vec<Column>, table: Option<TableName>) -> Self {
        let names = join(&columns, |c, out| out.push_str(c.escaped_name()));
        let variables = join(&columns, |c, out| out.push_str(c.variable()));
        let updates = join(&columns, |c, out| {
            out.push_str(c.escaped_name());
            out.push('=');
            out.push_str(c.variable());
        });
        Self {
            columns,
            table,
            names,
            variables,
            updates,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// First column with the given destination name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn table(&self) -> Option<&TableName> {
        self.table.as_ref()
    }

    /// Escaped column names, comma-separated: `"id","name"`.
    pub fn names(&self) -> &str {
        &self.names
    }

    /// Placeholders, comma-separated: `${id},${name}`.
    pub fn variables(&self) -> &str {
        &self.variables
    }

    /// Assignments, comma-separated: `"id"=${id},"name"=${name}`.
    pub fn updates(&self) -> &str {
        &self.updates
    }

    /// Project `source` into the values to bind, keyed by each column's property.
    ///
    /// Columns missing from the source with neither default nor initializer are left out.
    /// The source is not modified.
    pub fn prepare(&self, source: &dyn Record) -> Map<String, Value> {
        let mut target = Map::new();
        for column in &self.columns {
            if let Some(value) = column.resolve(source) {
                target.insert(column.key().to_string(), value);
            }
        }
        target
    }

    /// Multi-line rendering for logs and snapshots, indented by `level`.
    pub fn render(&self, level: usize) -> String {
        let gap0 = message_gap(level);
        let gap1 = message_gap(level + 1);
        let mut lines = vec!["ColumnSet {".to_string()];
        if let Some(table) = &self.table {
            lines.push(format!("{gap1}table: {}", Value::from(table.to_string())));
        }
        if self.columns.is_empty() {
            lines.push(format!("{gap1}columns: []"));
        } else {
            lines.push(format!("{gap1}columns: ["));
            for column in &self.columns {
                lines.push(column.render(level + 2));
            }
            lines.push(format!("{gap1}]"));
        }
        lines.push(format!("{gap0}}}"));
        lines.join("\n")
    }
}

fn join(columns: &[Column], mut write: impl FnMut(&Column, &mut String)) -> String {
    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write(column, &mut out);
    }
    out
}

impl fmt::Display for ColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}
