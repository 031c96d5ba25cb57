//! A single column mapping: destination column, source property, default and initializer.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ColumnError, ColumnResult};
use crate::format::{FormatMod, is_valid_property, parse_cast, placeholder_for, split_mod};
use crate::ident::{check_no_nul, escape_identifier};
use crate::record::Record;

/// Value initializer: receives the selected value (source value, default, or `None`) and the
/// source record, and returns the value to bind.
pub type Init = Arc<dyn Fn(Option<&Value>, &dyn Record) -> Value + Send + Sync>;

/// Input accepted by [`Column::new`].
#[derive(Clone)]
pub enum ColumnSpec {
    /// A bare column name, optionally carrying a trailing modifier (`"data:json"`).
    Bare(String),
    /// Explicit per-column details.
    Descriptor(ColumnDescriptor),
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::Bare(name.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(name: String) -> Self {
        ColumnSpec::Bare(name)
    }
}

impl From<&String> for ColumnSpec {
    fn from(name: &String) -> Self {
        ColumnSpec::Bare(name.clone())
    }
}

impl From<ColumnDescriptor> for ColumnSpec {
    fn from(desc: ColumnDescriptor) -> Self {
        ColumnSpec::Descriptor(desc)
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSpec::Bare(name) => f.debug_tuple("Bare").field(name).finish(),
            ColumnSpec::Descriptor(desc) => f.debug_tuple("Descriptor").field(desc).finish(),
        }
    }
}

/// Column details, built fluently.
///
/// ```
/// use pgcolumns::{Column, ColumnDescriptor};
/// use serde_json::{json, Value};
///
/// let col = Column::new(
///     ColumnDescriptor::new("login_count")
///         .prop("logins")
///         .def(0)
///         .cast("int")
///         .init(|v, _src| json!(v.and_then(Value::as_i64).unwrap_or(0) + 1)),
/// )?;
/// assert_eq!(col.escaped_name(), r#""login_count""#);
/// assert_eq!(col.variable(), "${logins}::int");
/// # Ok::<(), pgcolumns::ColumnError>(())
/// ```
#[derive(Clone, Default)]
pub struct ColumnDescriptor {
    pub name: String,
    pub prop: Option<String>,
    pub def: Option<Value>,
    pub init: Option<Init>,
    pub cast: Option<String>,
    pub format_mod: Option<FormatMod>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Source property, when it differs from the column name.
    pub fn prop(mut self, prop: impl Into<String>) -> Self {
        self.prop = Some(prop.into());
        self
    }

    /// Default used when the source record lacks the property.
    pub fn def(mut self, def: impl Into<Value>) -> Self {
        self.def = Some(def.into());
        self
    }

    /// Initializer applied to every value, including defaults and missing values.
    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(Option<&Value>, &dyn Record) -> Value + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }

    /// SQL type cast appended to the placeholder (`::` prefix optional).
    pub fn cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }

    pub fn format_mod(mut self, format_mod: FormatMod) -> Self {
        self.format_mod = Some(format_mod);
        self
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("name", &self.name)
            .field("prop", &self.prop)
            .field("def", &self.def)
            .field("init", &self.init.as_ref().map(|_| "<fn>"))
            .field("cast", &self.cast)
            .field("format_mod", &self.format_mod)
            .finish()
    }
}

/// JSON shape of a column descriptor. `init` has no JSON form.
#[derive(Deserialize)]
struct DescriptorInput {
    name: String,
    #[serde(default)]
    prop: Option<String>,
    #[serde(default, deserialize_with = "present")]
    def: Option<Value>,
    #[serde(default)]
    cast: Option<String>,
    #[serde(default, rename = "mod")]
    format_mod: Option<String>,
}

/// `"def": null` is a null default, not a missing one.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<DescriptorInput> for ColumnDescriptor {
    type Error = ColumnError;

    fn try_from(input: DescriptorInput) -> ColumnResult<Self> {
        let format_mod = input.format_mod.as_deref().map(FormatMod::parse).transpose()?;
        Ok(Self {
            name: input.name,
            prop: input.prop,
            def: input.def,
            init: None,
            cast: input.cast,
            format_mod,
        })
    }
}

/// One column of a [`ColumnSet`](crate::ColumnSet).
///
/// Immutable once built; `escaped_name` and `variable` are derived at construction.
#[derive(Clone)]
pub struct Column {
    name: String,
    prop: Option<String>,
    def: Option<Value>,
    init: Option<Init>,
    cast: Option<String>,
    format_mod: Option<FormatMod>,
    escaped_name: String,
    variable: String,
}

impl Column {
    /// Build a column from a bare name or a descriptor.
    ///
    /// ```
    /// use pgcolumns::Column;
    ///
    /// let col = Column::new("data:json")?;
    /// assert_eq!(col.name(), "data");
    /// assert_eq!(col.variable(), "${data:json}");
    /// assert!(Column::new("").is_err());
    /// # Ok::<(), pgcolumns::ColumnError>(())
    /// ```
    pub fn new(spec: impl Into<ColumnSpec>) -> ColumnResult<Self> {
        match spec.into() {
            ColumnSpec::Bare(text) => {
                let (name, format_mod) = split_mod(&text);
                Self::build(name.to_string(), None, None, None, None, format_mod)
            }
            ColumnSpec::Descriptor(desc) => {
                let (name, embedded) = split_mod(&desc.name);
                let cast = desc.cast.as_deref().map(parse_cast).transpose()?;
                Self::build(
                    name.to_string(),
                    desc.prop,
                    desc.def,
                    desc.init,
                    cast,
                    desc.format_mod.or(embedded),
                )
            }
        }
    }

    /// Build a column from a JSON string (bare name) or a JSON descriptor object.
    pub fn from_value(value: &Value) -> ColumnResult<Self> {
        match value {
            Value::String(name) => Self::new(name),
            Value::Object(_) => {
                let input = DescriptorInput::deserialize(value).map_err(|e| {
                    ColumnError::invalid_argument(format!("Invalid column details: {e}"))
                })?;
                Self::new(ColumnDescriptor::try_from(input)?)
            }
            other => Err(ColumnError::invalid_argument(format!(
                "Invalid column details: {other}"
            ))),
        }
    }

    fn build(
        name: String,
        prop: Option<String>,
        def: Option<Value>,
        init: Option<Init>,
        cast: Option<String>,
        format_mod: Option<FormatMod>,
    ) -> ColumnResult<Self> {
        if name.is_empty() {
            return Err(ColumnError::invalid_argument("Column name cannot be empty"));
        }
        check_no_nul(&name)?;
        if let Some(prop) = &prop {
            if !is_valid_property(prop) {
                return Err(ColumnError::invalid_argument(format!(
                    "Invalid property name: {prop:?}"
                )));
            }
        }
        let key = prop.as_deref().unwrap_or(&name);
        if !is_valid_property(key) {
            return Err(ColumnError::invalid_argument(format!(
                "Column {name:?} needs a valid property name for its placeholder"
            )));
        }

        let escaped_name = escape_identifier(&name);
        let variable = placeholder_for(key, format_mod, cast.as_deref());

        Ok(Self {
            name,
            prop,
            def,
            init,
            cast,
            format_mod,
            escaped_name,
            variable,
        })
    }

    /// Destination column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source property, if it differs from the column name.
    pub fn prop(&self) -> Option<&str> {
        self.prop.as_deref()
    }

    /// Property read from the source record: `prop`, else `name`.
    pub fn key(&self) -> &str {
        self.prop.as_deref().unwrap_or(&self.name)
    }

    pub fn def(&self) -> Option<&Value> {
        self.def.as_ref()
    }

    pub fn init(&self) -> Option<&Init> {
        self.init.as_ref()
    }

    pub fn cast(&self) -> Option<&str> {
        self.cast.as_deref()
    }

    pub fn format_mod(&self) -> Option<FormatMod> {
        self.format_mod
    }

    /// Column name quoted for SQL.
    pub fn escaped_name(&self) -> &str {
        &self.escaped_name
    }

    /// Placeholder token, with cast if any.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Value this column contributes for `source`, or `None` to leave it out.
    ///
    /// A value present in the source beats the default; the initializer, when set,
    /// always runs on whichever value was selected.
    pub fn resolve(&self, source: &dyn Record) -> Option<Value> {
        match (source.get(self.key()), &self.init) {
            (Some(raw), Some(init)) => Some(init(Some(raw), source)),
            (Some(raw), None) => Some(raw.clone()),
            (None, Some(init)) => Some(init(self.def.as_ref(), source)),
            (None, None) => self.def.clone(),
        }
    }

    /// Multi-line rendering, indented by `level`.
    pub fn render(&self, level: usize) -> String {
        let gap0 = message_gap(level);
        let gap1 = message_gap(level + 1);
        let mut lines = vec![
            format!("{gap0}Column {{"),
            format!("{gap1}name: {}", Value::from(self.name.as_str())),
        ];
        if let Some(prop) = &self.prop {
            lines.push(format!("{gap1}prop: {}", Value::from(prop.as_str())));
        }
        if let Some(m) = self.format_mod {
            lines.push(format!("{gap1}mod: {}", Value::from(m.as_str())));
        }
        if let Some(cast) = &self.cast {
            lines.push(format!("{gap1}cast: {}", Value::from(cast.as_str())));
        }
        if let Some(def) = &self.def {
            lines.push(format!("{gap1}def: {def}"));
        }
        if self.init.is_some() {
            lines.push(format!("{gap1}init: [Function]"));
        }
        lines.push(format!("{gap0}}}"));
        lines.join("\n")
    }
}

pub(crate) fn message_gap(level: usize) -> String {
    "    ".repeat(level)
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("prop", &self.prop)
            .field("def", &self.def)
            .field("init", &self.init.as_ref().map(|_| "<fn>"))
            .field("cast", &self.cast)
            .field("format_mod", &self.format_mod)
            .field("variable", &self.variable)
            .finish()
    }
}
