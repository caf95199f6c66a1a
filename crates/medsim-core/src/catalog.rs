//! # Catalog
//!
//! Ordered collection of item names whose positions are the row/column
//! indices of the similarity matrix.

use std::collections::HashMap;
use std::fmt;

use crate::error::{MedsimError, Result};

/// A single catalog item, borrowed from its [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    /// Dense 0-based index, equal to the item's matrix row/column.
    pub index: usize,
    /// Unique item name.
    pub name: &'a str,
}

impl fmt::Display for CatalogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.name)
    }
}

/// Immutable, ordered catalog with O(1) name → index lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog; the position of each name becomes its index.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::DuplicateName` if a name occurs more than once.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());

        for (position, name) in names.iter().enumerate() {
            if let Some(&first) = index.get(name) {
                return Err(MedsimError::DuplicateName {
                    name: name.clone(),
                    first,
                    second: position,
                });
            }
            index.insert(name.clone(), position);
        }

        Ok(Self { names, index })
    }

    /// All names in catalog order.
    #[must_use]
    pub fn all_names(&self) -> &[String] {
        &self.names
    }

    /// Exact, case-sensitive lookup of a name's index.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::NameNotFound` if the name is not in the catalog.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| MedsimError::NameNotFound {
                name: name.to_string(),
            })
    }

    /// Name stored at `index`, if any.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<CatalogEntry<'_>> {
        self.name(index).map(|name| CatalogEntry { index, name })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| CatalogEntry {
                index,
                name: name.as_str(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(["Aspirin", "Asprin", "Parol"]).unwrap()
    }

    #[test]
    fn all_names_keeps_order() {
        let catalog = sample();
        assert_eq!(catalog.all_names(), ["Aspirin", "Asprin", "Parol"]);
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn index_of_exact_match() {
        let catalog = sample();
        assert_eq!(catalog.index_of("Aspirin").unwrap(), 0);
        assert_eq!(catalog.index_of("Parol").unwrap(), 2);
    }

    #[test]
    fn index_of_is_case_sensitive() {
        let catalog = sample();
        let err = catalog.index_of("aspirin").unwrap_err();
        assert!(matches!(err, MedsimError::NameNotFound { ref name } if name == "aspirin"));
        assert!(catalog.index_of("Aspirin ").is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = Catalog::new(["A", "B", "A"]).unwrap_err();
        assert!(matches!(
            err,
            MedsimError::DuplicateName { first: 0, second: 2, .. }
        ));
    }

    #[test]
    fn entries_and_names() {
        let catalog = sample();
        assert_eq!(catalog.name(1), Some("Asprin"));
        assert_eq!(catalog.name(3), None);

        let entry = catalog.entry(2).unwrap();
        assert_eq!(entry.index, 2);
        assert_eq!(entry.name, "Parol");
        assert_eq!(entry.to_string(), "#2 Parol");

        let indices: Vec<usize> = catalog.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(catalog.contains("Asprin"));
        assert!(!catalog.contains("Ibuprofen"));
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::new(Vec::<String>::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.all_names().is_empty());
    }
}
