use serde_json::Value;

use super::{ColumnSet, ColumnSetOptions};
use crate::column::{Column, ColumnSpec};
use crate::error::{ColumnError, ColumnResult};
use crate::ident::TableName;
use crate::record::Record;

/// Accumulates columns before freezing them into a [`ColumnSet`].
///
/// The first invalid column is remembered and reported by [`build`](Self::build);
/// later additions are ignored once an error is recorded.
///
/// ```
/// use pgcolumns::{ColumnDescriptor, ColumnSet, TableName};
///
/// let cs = ColumnSet::builder()
///     .table(TableName::new("users")?)
///     .column("id")
///     .column(ColumnDescriptor::new("email").cast("text"))
///     .build()?;
/// assert_eq!(cs.names(), r#""id","email""#);
/// assert_eq!(cs.variables(), "${id},${email}::text");
/// # Ok::<(), pgcolumns::ColumnError>(())
/// ```
#[derive(Debug, Default)]
pub struct ColumnSetBuilder {
    columns: Vec<Column>,
    table: Option<TableName>,
    inherit: bool,
    error: Option<ColumnError>,
}

impl ColumnSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply options; `inherit` affects later [`record`](Self::record) calls.
    ///
    /// A table already set is kept when `options` has none.
    pub fn options(mut self, options: ColumnSetOptions) -> Self {
        if options.table.is_some() {
            self.table = options.table;
        }
        self.inherit = options.inherit;
        self
    }

    pub fn table(mut self, table: TableName) -> Self {
        self.table = Some(table);
        self
    }

    pub fn inherit(mut self, inherit: bool) -> Self {
        self.inherit = inherit;
        self
    }

    /// Append one column.
    pub fn column(mut self, spec: impl Into<ColumnSpec>) -> Self {
        if self.error.is_none() {
            let column = Column::new(spec);
            self.push(column);
        }
        self
    }

    /// Append columns in iteration order.
    pub fn columns<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnSpec>,
    {
        for spec in specs {
            if self.error.is_some() {
                break;
            }
            let column = Column::new(spec);
            self.push(column);
        }
        self
    }

    /// Append columns from dynamic column details (see [`Column::from_value`]).
    pub fn values(mut self, items: &[Value]) -> Self {
        for item in items {
            if self.error.is_some() {
                break;
            }
            let column = Column::from_value(item);
            self.push(column);
        }
        self
    }

    /// Append one bare column per property name of `record`, in enumeration order.
    ///
    /// Names are read like bare specs, so `"data:json"` becomes column `data`.
    pub fn record(mut self, record: &dyn Record) -> Self {
        for key in record.keys(self.inherit) {
            if self.error.is_some() {
                break;
            }
            let column = Column::new(key);
            self.push(column);
        }
        self
    }

    fn push(&mut self, column: ColumnResult<Column>) {
        match column {
            Ok(column) => self.columns.push(column),
            Err(e) => self.error = Some(e),
        }
    }

    /// Freeze the columns; fails with the first column error, if any.
    pub fn build(self) -> ColumnResult<ColumnSet> {
        if let Some(e) = self.error {
            debug_event!(error = %e, "rejected column set");
            return Err(e);
        }
        let cs = ColumnSet::freeze(self.columns, self.table);
        debug_event!(
            columns = cs.len(),
            table = cs.table().map(TableName::name),
            "built column set"
        );
        Ok(cs)
    }
}
