use crate::error::{Result, SymscopeError};
use lasso::{Rodeo, Spur};

/// Interned handle for one name segment. Equal segments always intern to
/// the same id, so segment comparison inside the trie is id comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(Spur);

/// Append-only segment interner backing the search trie.
///
/// Every qualified name that enters the index is split into segments and
/// each segment is stored here exactly once. Nodes refer to their segment
/// by `NameId` and borrow the actual characters back at match time, so a
/// name shared by thousands of symbols ("get", "new", "impl") costs one
/// allocation total.
#[derive(Debug)]
pub struct Dictionary {
    rodeo: Rodeo,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::default(),
        }
    }

    /// Intern `segment`, returning the existing id when it was seen before.
    pub fn intern(&mut self, segment: &str) -> NameId {
        NameId(self.rodeo.get_or_intern(segment))
    }

    /// Look up a segment without interning it.
    pub fn get(&self, segment: &str) -> Option<NameId> {
        self.rodeo.get(segment).map(NameId)
    }

    pub fn resolve(&self, id: NameId) -> Result<&str> {
        self.rodeo
            .try_resolve(&id.0)
            .ok_or(SymscopeError::UnknownName(id))
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasso::Key;

    #[test]
    fn test_intern_is_idempotent() {
        let mut dictionary = Dictionary::new();
        let first = dictionary.intern("Connection");
        let second = dictionary.intern("Connection");
        assert_eq!(first, second);
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_resolve_round_trip() {
        let mut dictionary = Dictionary::new();
        let id = dictionary.intern("network");
        assert_eq!(dictionary.resolve(id).unwrap(), "network");
    }

    #[test]
    fn test_get_does_not_intern() {
        let mut dictionary = Dictionary::new();
        assert!(dictionary.get("open").is_none());
        assert!(dictionary.is_empty());
        let id = dictionary.intern("open");
        assert_eq!(dictionary.get("open"), Some(id));
    }

    #[test]
    fn test_resolve_unknown_id_errors() {
        let dictionary = Dictionary::new();
        let bogus = NameId(Spur::try_from_usize(41).unwrap());
        assert!(matches!(
            dictionary.resolve(bogus),
            Err(SymscopeError::UnknownName(_))
        ));
    }
}
