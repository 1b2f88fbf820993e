//! In-memory KeyValues tree shared by the text and binary VDF readers.
//!
//! Steam's config files are nested string-keyed maps. Keys keep their file
//! order (shortcut entries are numbered `"0"`, `"1"`, ... `"10"` and callers
//! expect them in that order, not sorted), so the map is a small ordered
//! vector rather than a hash map.

/// Deepest map nesting the readers accept. Real files stay in single digits.
pub const MAX_DEPTH: usize = 256;

/// A single value in a KeyValues tree.
///
/// Text VDF only ever produces [`Value::String`] and [`Value::Map`]; the
/// numeric variants come from the binary format.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Map(KeyValues),
    String(String),
    Int32(i32),
    Float32(f32),
    Pointer(u32),
    Color(u32),
    UInt64(u64),
    Int64(i64),
}

impl Value {
    pub fn as_map(&self) -> Option<&KeyValues> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Signed 32-bit view. Strings holding a decimal number are accepted too,
    /// since text VDF stores every scalar as a string.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Unsigned 64-bit view over any integer-like value.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int32(v) => u64::try_from(*v).ok(),
            Value::Int64(v) => u64::try_from(*v).ok(),
            Value::UInt64(v) => Some(*v),
            Value::Pointer(v) | Value::Color(v) => Some(u64::from(*v)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// An ordered string-keyed map of [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValues {
    entries: Vec<(String, Value)>,
}

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up the first of several candidate keys that is present.
    ///
    /// Steam is inconsistent about key casing between versions (`Valve` vs
    /// `valve`, `AppName` vs `appname`), so lookups that must tolerate this
    /// list the spellings in priority order.
    pub fn get_any(&self, candidates: &[&str]) -> Option<&Value> {
        candidates.iter().find_map(|key| self.get(key))
    }

    pub fn get_map(&self, key: &str) -> Option<&KeyValues> {
        self.get(key).and_then(Value::as_map)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Walk a chain of nested maps, e.g. `["AppState", "installdir"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut node = self;
        for key in parents {
            node = node.get_map(key)?;
        }
        node.get(last)
    }

    /// Insert a value, replacing any existing value under the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert a value, merging into an existing map when both sides are maps.
    ///
    /// Text VDF files occasionally repeat a block key; Steam treats the
    /// repeated blocks as one.
    pub fn merge_insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match (self.entries.iter_mut().find(|(k, _)| *k == key), value) {
            (Some((_, Value::Map(existing))), Value::Map(incoming)) => {
                for (k, v) in incoming.entries {
                    existing.merge_insert(k, v);
                }
            }
            (Some((_, slot)), value) => *slot = value,
            (None, value) => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Value)> for KeyValues {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut kv = KeyValues::new();
        for (k, v) in iter {
            kv.insert(k, v);
        }
        kv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> KeyValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn get_any_respects_candidate_order() {
        let kv = map(&[
            ("valve", Value::String("lower".into())),
            ("Valve", Value::String("upper".into())),
        ]);
        assert_eq!(kv.get_any(&["Valve", "valve"]).and_then(Value::as_str), Some("upper"));
        assert_eq!(kv.get_any(&["missing", "valve"]).and_then(Value::as_str), Some("lower"));
        assert!(kv.get_any(&["nope"]).is_none());
    }

    #[test]
    fn get_path_walks_nested_maps() {
        let inner = map(&[("installdir", Value::String("Portal".into()))]);
        let kv = map(&[("AppState", Value::Map(inner))]);
        assert_eq!(
            kv.get_path(&["AppState", "installdir"]).and_then(Value::as_str),
            Some("Portal")
        );
        assert!(kv.get_path(&["AppState", "name"]).is_none());
        assert!(kv.get_path(&["AppState", "installdir", "deeper"]).is_none());
        assert!(kv.get_path(&[]).is_none());
    }

    #[test]
    fn insert_preserves_order_and_replaces() {
        let mut kv = KeyValues::new();
        kv.insert("2", Value::Int32(2));
        kv.insert("10", Value::Int32(10));
        kv.insert("2", Value::Int32(20));
        assert_eq!(kv.keys().collect::<Vec<_>>(), vec!["2", "10"]);
        assert_eq!(kv.get("2"), Some(&Value::Int32(20)));
    }

    #[test]
    fn merge_insert_combines_maps() {
        let mut kv = KeyValues::new();
        kv.merge_insert("apps", Value::Map(map(&[("10", Value::String("1".into()))])));
        kv.merge_insert("apps", Value::Map(map(&[("20", Value::String("2".into()))])));
        let apps = kv.get_map("apps").unwrap();
        assert_eq!(apps.len(), 2);
    }

    #[test]
    fn numeric_views() {
        assert_eq!(Value::String(" 42 ".into()).as_i32(), Some(42));
        assert_eq!(Value::Int32(-1).as_u64(), None);
        assert_eq!(Value::UInt64(7).as_u64(), Some(7));
        assert_eq!(Value::Map(KeyValues::new()).as_i32(), None);
    }
}
