//! Placeholder tokens, formatting modifiers and type casts.
//!
//! A column's placeholder is a named-parameter token of the form
//! `${property<mod>}` with an optional `::cast` suffix:
//!
//! ```
//! use pgcolumns::format::{placeholder_for, FormatMod};
//!
//! assert_eq!(placeholder_for("id", None, None), "${id}");
//! assert_eq!(placeholder_for("data", Some(FormatMod::Json), Some("jsonb")), "${data:json}::jsonb");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ColumnError, ColumnResult};

/// Formatting modifier appended to a placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatMod {
    /// `^`: raw text, injected without escaping.
    Caret,
    /// `~`: SQL name.
    Tilde,
    /// `:raw`
    Raw,
    /// `:name`
    Name,
    /// `:alias`
    Alias,
    /// `:json`
    Json,
    /// `:csv`
    Csv,
    /// `:list`
    List,
    /// `:value`
    Value,
}

impl FormatMod {
    const ALL: [FormatMod; 9] = [
        FormatMod::Alias,
        FormatMod::Value,
        FormatMod::Name,
        FormatMod::Json,
        FormatMod::List,
        FormatMod::Raw,
        FormatMod::Csv,
        FormatMod::Caret,
        FormatMod::Tilde,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatMod::Caret => "^",
            FormatMod::Tilde => "~",
            FormatMod::Raw => ":raw",
            FormatMod::Name => ":name",
            FormatMod::Alias => ":alias",
            FormatMod::Json => ":json",
            FormatMod::Csv => ":csv",
            FormatMod::List => ":list",
            FormatMod::Value => ":value",
        }
    }

    /// Parse a modifier given on its own (`"^"`, `":json"`).
    pub fn parse(s: &str) -> ColumnResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ColumnError::invalid_argument(format!("Invalid format modifier: {s:?}")))
    }
}

impl FromStr for FormatMod {
    type Err = ColumnError;

    fn from_str(s: &str) -> ColumnResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatMod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a trailing modifier off a column string: `"data:json"` -> `("data", Some(Json))`.
///
/// The remaining name must be non-empty; `"^"` alone is returned unchanged.
pub fn split_mod(text: &str) -> (&str, Option<FormatMod>) {
    for m in FormatMod::ALL {
        if let Some(rest) = text.strip_suffix(m.as_str()) {
            if !rest.is_empty() {
                return (rest, Some(m));
            }
        }
    }
    (text, None)
}

/// Normalize a type cast: trims whitespace and one optional leading `::`.
pub fn parse_cast(text: &str) -> ColumnResult<String> {
    let trimmed = text.trim();
    let cast = trimmed.strip_prefix("::").unwrap_or(trimmed).trim();
    if cast.is_empty() || cast.starts_with(':') {
        return Err(ColumnError::invalid_argument(format!("Invalid cast: {text:?}")));
    }
    Ok(cast.to_string())
}

/// Whether `s` can be used as a source property in a placeholder token.
pub fn is_valid_property(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

/// Build the placeholder token for a column keyed by `key`.
pub fn placeholder_for(key: &str, format_mod: Option<FormatMod>, cast: Option<&str>) -> String {
    let mut out = String::with_capacity(key.len() + 8);
    out.push_str("${");
    out.push_str(key);
    if let Some(m) = format_mod {
        out.push_str(m.as_str());
    }
    out.push('}');
    if let Some(cast) = cast {
        out.push_str("::");
        out.push_str(cast);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_mods() {
        assert_eq!(FormatMod::parse("^").unwrap(), FormatMod::Caret);
        assert_eq!(":csv".parse::<FormatMod>().unwrap(), FormatMod::Csv);
        assert!(FormatMod::parse(":xml").unwrap_err().is_invalid_argument());
        assert!(FormatMod::parse("").is_err());
    }

    #[test]
    fn split_mod_variants() {
        assert_eq!(split_mod("data:json"), ("data", Some(FormatMod::Json)));
        assert_eq!(split_mod("price^"), ("price", Some(FormatMod::Caret)));
        assert_eq!(split_mod("col~"), ("col", Some(FormatMod::Tilde)));
        assert_eq!(split_mod("plain"), ("plain", None));
        assert_eq!(split_mod("^"), ("^", None));
        assert_eq!(split_mod(":json"), (":json", None));
    }

    #[test]
    fn cast_normalization() {
        assert_eq!(parse_cast("int").unwrap(), "int");
        assert_eq!(parse_cast("::int[]").unwrap(), "int[]");
        assert_eq!(parse_cast("  :: timestamptz ").unwrap(), "timestamptz");
        assert!(parse_cast("::").is_err());
        assert!(parse_cast(":int").is_err());
        assert!(parse_cast(":::int").is_err());
        assert!(parse_cast("::::int").is_err());
        assert!(parse_cast("   ").is_err());
    }

    #[test]
    fn property_validation() {
        assert!(is_valid_property("userId"));
        assert!(is_valid_property("_x$1"));
        assert!(is_valid_property("$row"));
        assert!(!is_valid_property(""));
        assert!(!is_valid_property("1a"));
        assert!(!is_valid_property("a-b"));
    }

    #[test]
    fn placeholder_tokens() {
        assert_eq!(placeholder_for("id", None, None), "${id}");
        assert_eq!(placeholder_for("id", None, Some("int")), "${id}::int");
        assert_eq!(placeholder_for("tags", Some(FormatMod::Csv), None), "${tags:csv}");
    }
}
