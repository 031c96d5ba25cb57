//! SQL identifier escaping.
//!
//! - [`escape_identifier`] quotes any column name for safe inclusion in SQL text.
//! - [`TableName`] is the optional destination table carried by a column set.
//!
//! Names are always quoted, with embedded `"` doubled. NUL characters are rejected
//! because PostgreSQL cannot store them in identifiers.
//!
//! # Example
//! ```
//! use pgcolumns::{escape_identifier, TableName};
//!
//! assert_eq!(escape_identifier("first name"), r#""first name""#);
//!
//! let t = TableName::with_schema("public", "users")?;
//! assert_eq!(t.name(), r#""public"."users""#);
//! # Ok::<(), pgcolumns::ColumnError>(())
//! ```

use std::fmt;

use serde::Deserialize;

use crate::error::{ColumnError, ColumnResult};

/// Quote `name` as a SQL identifier, doubling embedded double quotes.
pub fn escape_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(name, &mut out);
    out
}

fn write_quoted(name: &str, out: &mut String) {
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

pub(crate) fn check_no_nul(s: &str) -> ColumnResult<()> {
    if s.contains('\0') {
        return Err(ColumnError::invalid_argument(
            "Identifier cannot contain NUL character",
        ));
    }
    Ok(())
}

/// Destination table of a column set, optionally schema-qualified.
///
/// The table is never interpreted by the column set itself; statement builders use it
/// as the default target of `INSERT`/`UPDATE`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TableInput")]
pub struct TableName {
    table: String,
    schema: Option<String>,
    name: String,
}

impl TableName {
    /// A table name used verbatim (dots are part of the name).
    pub fn new(table: impl Into<String>) -> ColumnResult<Self> {
        Self::build(table.into(), None)
    }

    /// A schema-qualified table name.
    pub fn with_schema(schema: impl Into<String>, table: impl Into<String>) -> ColumnResult<Self> {
        let schema = schema.into();
        if schema.is_empty() {
            return Err(ColumnError::invalid_argument("Table schema cannot be empty"));
        }
        Self::build(table.into(), Some(schema))
    }

    fn build(table: String, schema: Option<String>) -> ColumnResult<Self> {
        if table.is_empty() {
            return Err(ColumnError::invalid_argument("Table name cannot be empty"));
        }
        check_no_nul(&table)?;
        if let Some(schema) = &schema {
            check_no_nul(schema)?;
        }

        let mut name = String::with_capacity(table.len() + 2);
        if let Some(schema) = &schema {
            write_quoted(schema, &mut name);
            name.push('.');
        }
        write_quoted(&table, &mut name);

        Ok(Self {
            table,
            schema,
            name,
        })
    }

    /// Unescaped table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Unescaped schema name, if any.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Escaped, schema-qualified SQL text.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.table),
            None => f.write_str(&self.table),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableInput {
    Name(String),
    Qualified {
        table: String,
        schema: Option<String>,
    },
}

impl TryFrom<TableInput> for TableName {
    type Error = ColumnError;

    fn try_from(input: TableInput) -> ColumnResult<Self> {
        match input {
            TableInput::Name(table) => TableName::new(table),
            TableInput::Qualified {
                table,
                schema: Some(schema),
            } => TableName::with_schema(schema, table),
            TableInput::Qualified {
                table,
                schema: None,
            } => TableName::new(table),
        }
    }
}
