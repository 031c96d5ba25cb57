//! Source records read by [`ColumnSet::prepare`](crate::ColumnSet::prepare) and enumerated
//! by [`ColumnSet::from_record`](crate::ColumnSet::from_record).
//!
//! A record is a string-keyed structured value. Lookups see the record's own properties
//! and those of its parent chain; enumeration includes inherited names only on request.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// A string-keyed record with an optional parent chain.
pub trait Record {
    /// Value stored directly on this record.
    fn get_own(&self, key: &str) -> Option<&Value>;

    /// Own property names, in enumeration order.
    fn own_keys(&self) -> Vec<&str>;

    /// Record consulted when a key is not found on this one.
    fn parent(&self) -> Option<&dyn Record> {
        None
    }

    /// Value of `key`, own or inherited.
    fn get(&self, key: &str) -> Option<&Value> {
        match self.get_own(key) {
            Some(v) => Some(v),
            None => self.parent().and_then(|p| p.get(key)),
        }
    }

    /// Whether `key` is reachable, own or inherited.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Property names in enumeration order.
    ///
    /// With `inherit`, own names come first, then each ancestor's names that were not
    /// already listed.
    fn keys(&self, inherit: bool) -> Vec<&str> {
        let mut keys = self.own_keys();
        if !inherit {
            return keys;
        }
        let mut seen: HashSet<&str> = keys.iter().copied().collect();
        let mut next = self.parent();
        while let Some(record) = next {
            for key in record.own_keys() {
                if seen.insert(key) {
                    keys.push(key);
                }
            }
            next = record.parent();
        }
        keys
    }
}

impl Record for Map<String, Value> {
    fn get_own(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn own_keys(&self) -> Vec<&str> {
        Map::keys(self).map(String::as_str).collect()
    }
}

/// Only JSON objects have properties; any other value is an empty record.
impl Record for Value {
    fn get_own(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    fn own_keys(&self) -> Vec<&str> {
        match self.as_object() {
            Some(m) => m.keys().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }
}

/// An object layered on top of a parent record.
///
/// Own properties shadow the parent's; missing ones fall through to it.
///
/// ```
/// use pgcolumns::record::{Layered, Record};
/// use serde_json::json;
///
/// let base = json!({ "created_by": "system", "id": 0 });
/// let row = Layered::new(json!({ "id": 7 }), &base);
///
/// assert_eq!(row.get("id"), Some(&json!(7)));
/// assert_eq!(row.get("created_by"), Some(&json!("system")));
/// assert_eq!(row.keys(false), ["id"]);
/// assert_eq!(row.keys(true), ["id", "created_by"]);
/// ```
#[derive(Clone)]
pub struct Layered<'a, T: Record = Value> {
    own: T,
    parent: &'a dyn Record,
}

impl<'a, T: Record> Layered<'a, T> {
    pub fn new(own: T, parent: &'a dyn Record) -> Self {
        Self { own, parent }
    }

    pub fn own(&self) -> &T {
        &self.own
    }
}

impl<T: Record> Record for Layered<'_, T> {
    fn get_own(&self, key: &str) -> Option<&Value> {
        self.own.get_own(key)
    }

    fn own_keys(&self) -> Vec<&str> {
        self.own.own_keys()
    }

    fn parent(&self) -> Option<&dyn Record> {
        Some(self.parent)
    }
}

impl<T: Record + std::fmt::Debug> std::fmt::Debug for Layered<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layered")
            .field("own", &self.own)
            .field("parent", &self.parent.own_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_keep_insertion_order() {
        let v = json!({ "z": 1, "a": 2, "m": 3 });
        assert_eq!(v.keys(false), ["z", "a", "m"]);
    }

    #[test]
    fn non_objects_are_empty() {
        assert!(json!(5).keys(true).is_empty());
        assert!(!json!("a").contains("a"));
        assert!(!Value::Null.contains("x"));
    }

    #[test]
    fn null_valued_key_is_present() {
        let v = json!({ "a": null });
        assert!(v.contains("a"));
        assert_eq!(v.get("a"), Some(&Value::Null));
    }

    #[test]
    fn map_record() {
        let mut m = Map::new();
        m.insert("b".into(), json!(1));
        m.insert("a".into(), json!(2));
        assert_eq!(m.own_keys(), ["b", "a"]);
        assert_eq!(Record::get(&m, "a"), Some(&json!(2)));
    }

    #[test]
    fn layered_lookup_and_shadowing() {
        let grand = json!({ "g": 1, "shared": "grand" });
        let parent = Layered::new(json!({ "p": 2, "shared": "parent" }), &grand);
        let child = Layered::new(json!({ "c": 3 }), &parent);

        assert_eq!(child.get("shared"), Some(&json!("parent")));
        assert_eq!(child.get("g"), Some(&json!(1)));
        assert!(child.contains("p"));
        assert!(child.get_own("p").is_none());
        assert!(!child.contains("missing"));
        assert_eq!(child.keys(true), ["c", "p", "shared", "g"]);
        assert_eq!(child.keys(false), ["c"]);
    }
}
