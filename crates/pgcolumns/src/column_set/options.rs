use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ColumnError, ColumnResult};
use crate::ident::TableName;

/// Options for building a [`ColumnSet`](super::ColumnSet).
///
/// By default there is no table and only own record properties are enumerated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnSetOptions {
    /// Destination table, used by statement builders when none is given explicitly.
    #[serde(deserialize_with = "table_option")]
    pub table: Option<TableName>,
    /// Include inherited property names when columns come from a record.
    pub inherit: bool,
}

impl ColumnSetOptions {
    /// Create options with defaults (no table, own properties only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the destination table.
    pub fn with_table(mut self, table: TableName) -> Self {
        self.table = Some(table);
        self
    }

    /// Enumerate inherited record properties as well.
    pub fn with_inherit(mut self, inherit: bool) -> Self {
        self.inherit = inherit;
        self
    }

    /// Decode options from a dynamic value.
    ///
    /// `null` yields the defaults; any other non-object value is rejected.
    pub fn from_value(value: &Value) -> ColumnResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Self::deserialize(value).map_err(|e| {
                ColumnError::invalid_argument(format!("Invalid parameter 'options' specified: {e}"))
            }),
            other => Err(ColumnError::invalid_argument(format!(
                "Invalid parameter 'options' specified: {other}"
            ))),
        }
    }
}

/// A non-empty string is a verbatim table name and an object is `{ table, schema }`.
/// Anything else (including `""`) leaves the table unset. Names containing NUL are
/// rejected.
fn table_option<'de, D>(deserializer: D) -> Result<Option<TableName>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => TableName::new(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        v @ Value::Object(_) => TableName::deserialize(v)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
