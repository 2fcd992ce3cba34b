//! In-memory lookup from Bates/Control # to Document ID.

use std::collections::BTreeMap;

/// Header of the column holding the identifier found in file base names.
pub const SOURCE_COLUMN: &str = "Bates/Control #";

/// Header of the column holding the replacement identifier.
pub const TARGET_COLUMN: &str = "Document ID";

/// Mapping from source key (Bates/Control #) to replacement key (Document ID).
///
/// Built once per run. Inserting an existing key replaces its value, so the
/// last row of a mapping file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    entries: BTreeMap<String, String>,
}

impl RenameMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, returning the replacement it overwrote, if any.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(source.into(), replacement.into())
    }

    /// Returns the replacement key for `source`.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates pairs ordered by source key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, replacement)| (source.as_str(), replacement.as_str()))
    }
}

impl<S, R> FromIterator<(S, R)> for RenameMap
where
    S: Into<String>,
    R: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (source, replacement) in iter {
            map.insert(source, replacement);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_last_write_wins() {
        let mut map = RenameMap::new();
        assert_eq!(map.insert("ABC001", "DOC100"), None);
        assert_eq!(map.insert("ABC001", "DOC200"), Some("DOC100".to_string()));
        assert_eq!(map.get("ABC001"), Some("DOC200"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_lookup_is_exact() {
        let map: RenameMap = [("ABC001", "DOC100")].into_iter().collect();
        assert!(map.contains("ABC001"));
        assert!(!map.contains("abc001"));
        assert!(!map.contains("ABC001 "));
        assert_eq!(map.get("ABC00"), None);
    }

    #[test]
    fn test_iter_ordered_by_source() {
        let map: RenameMap = [("B", "2"), ("A", "1")].into_iter().collect();
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "2")]);
    }
}
