use crate::node::Node;

/// Ordered key/value entries with unique keys.
///
/// Insertion order is preserved so that a document decodes and re-encodes
/// with its keys where the author put them. Equality ignores order: two
/// mappings are equal when they hold the same keys with equal values.
///
/// Lookups are linear. Documents mapped onto domain types are small, and a
/// vector keeps iteration and re-serialization in order without extra
/// bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a value, returning the previous value for `key` if any.
    ///
    /// Replacing keeps the key at its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Append an entry whose key the caller knows is not yet present.
    ///
    /// Used when rebuilding a mapping from one that already had unique keys.
    pub fn push_unique(&mut self, key: String, value: Node) {
        debug_assert!(!self.contains_key(&key), "duplicate mapping key {key:?}");
        self.entries.push((key, value));
    }

    /// Remove a key, shifting later entries to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn into_values(self) -> impl Iterator<Item = Node> {
        self.entries.into_iter().map(|(_, v)| v)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a (String, Node);
    type IntoIter = std::slice::Iter<'a, (String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Later duplicates replace earlier ones, as with [`Mapping::insert`].
impl<K: Into<String>> FromIterator<(K, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mapping {
        [("a", Node::from(1)), ("b", Node::from(2)), ("c", Node::from(3))]
            .into_iter()
            .collect()
    }

    #[test]
    fn insert_preserves_order() {
        let map = sample();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = sample();
        let old = map.insert("b", Node::from("two"));
        assert_eq!(old, Some(Node::from(2)));
        assert_eq!(map.len(), 3);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(map.get("b"), Some(&Node::from("two")));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut map = sample();
        assert_eq!(map.remove("a"), Some(Node::from(1)));
        assert_eq!(map.remove("missing"), None);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn equality_ignores_order() {
        let forward = sample();
        let backward: Mapping = [("c", Node::from(3)), ("b", Node::from(2)), ("a", Node::from(1))]
            .into_iter()
            .collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn equality_detects_differences() {
        let mut other = sample();
        other.insert("c", Node::from(4));
        assert_ne!(sample(), other);

        let mut longer = sample();
        longer.insert("d", Node::Null);
        assert_ne!(sample(), longer);
    }

    #[test]
    fn from_iter_last_duplicate_wins() {
        let map: Mapping = [("k", Node::from(1)), ("k", Node::from(2))].into_iter().collect();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&Node::from(2)));
    }

    #[test]
    fn get_mut_updates_value() {
        let mut map = sample();
        if let Some(v) = map.get_mut("a") {
            *v = Node::Null;
        }
        assert!(map.get("a").is_some_and(Node::is_null));
    }
}
