//! Validated rename mapping handed to the engine.
//!
//! Sources are unique and destinations are unique. The engine relies on the
//! second property to tell a genuine cycle apart from a collision, so the only
//! way to build a map is through [`RenameMap::from_pairs`].

use std::collections::{HashMap, HashSet};

use crate::errors::MappingError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    order: Vec<String>,
    targets: HashMap<String, String>,
}

impl RenameMap {
    /// Build a map from `(source, destination)` pairs, keeping their order.
    pub fn from_pairs<I, S, D>(pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        let mut map = RenameMap::default();
        let mut seen_dsts = HashSet::new();
        for (src, dst) in pairs {
            let (src, dst) = (src.into(), dst.into());
            if map.targets.contains_key(&src) {
                return Err(MappingError::DuplicateSource(src));
            }
            if !seen_dsts.insert(dst.clone()) {
                return Err(MappingError::DuplicateDestination(dst));
            }
            map.order.push(src.clone());
            map.targets.insert(src, dst);
        }
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, src: &str) -> Option<&str> {
        self.targets.get(src).map(String::as_str)
    }

    /// Entries in the order they were supplied.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|src| (src.as_str(), self.targets[src].as_str()))
    }

    /// Entries that actually move a file.
    pub fn changes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(src, dst)| src != dst)
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, HashMap<String, String>) {
        (self.order, self.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_supplied_order() {
        let map = RenameMap::from_pairs([("b", "x"), ("a", "y"), ("c", "c")]).unwrap();
        let got: Vec<_> = map.iter().collect();
        assert_eq!(got, vec![("b", "x"), ("a", "y"), ("c", "c")]);
        assert_eq!(map.changes().count(), 2);
        assert_eq!(map.get("a"), Some("y"));
        assert_eq!(map.get("zzz"), None);
    }

    #[test]
    fn rejects_duplicate_destination() {
        let err = RenameMap::from_pairs([("a", "x"), ("b", "x")]).unwrap_err();
        assert_eq!(err, MappingError::DuplicateDestination("x".into()));
    }

    #[test]
    fn rejects_duplicate_source() {
        let err = RenameMap::from_pairs([("a", "x"), ("a", "y")]).unwrap_err();
        assert_eq!(err, MappingError::DuplicateSource("a".into()));
    }

    #[test]
    fn empty_map() {
        let map = RenameMap::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }
}
